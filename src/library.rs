//! Built-in scripts for well-known question types
//!
//! Consulted only when a question carries no explicit script. Each built-in
//! script reads the question body through the parameter table ids in
//! [`refs`], so a question only needs to fill its table to be playable.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::script::{param, value};
use crate::types::{Script, Step, StepParameter, StepType};

/// Plain question: show the body, race on the button, reveal the answer
pub const SIMPLE: &str = "simple";
/// Stake auction decides the answerer and the price
pub const STAKE: &str = "stake";
/// Hidden question handed to a selected answerer with its own theme and price
pub const SECRET: &str = "secret";
/// The answerer keeps the nominal price and risks nothing
pub const NO_RISK: &str = "noRisk";
/// Everybody answers in writing
pub const FOR_ALL: &str = "forAll";

/// Parameter table ids the built-in scripts expect a question to provide
pub mod refs {
    /// Question body content
    pub const QUESTION: &str = "question";
    /// Price range for stake/secret play
    pub const PRICE: &str = "price";
    /// Real theme of a secret question
    pub const THEME: &str = "theme";
    /// Answer window duration override
    pub const TIME: &str = "time";
}

/// Look a built-in script up by question type name
pub fn script_for(type_name: &str) -> Option<&'static Script> {
    builtin_scripts().get(type_name)
}

/// Type names with a built-in script, in stable order
pub fn known_types() -> impl Iterator<Item = &'static str> {
    builtin_scripts().keys().copied()
}

fn builtin_scripts() -> &'static BTreeMap<&'static str, Script> {
    static SCRIPTS: OnceLock<BTreeMap<&'static str, Script>> = OnceLock::new();
    SCRIPTS.get_or_init(|| {
        BTreeMap::from([
            (
                SIMPLE,
                Script::new(vec![
                    show_question(),
                    ask_answer(value::MODE_BUTTON),
                    show_right_answer(),
                ]),
            ),
            (
                FOR_ALL,
                Script::new(vec![
                    show_question(),
                    ask_answer(value::MODE_DIRECT),
                    show_right_answer(),
                ]),
            ),
            (
                NO_RISK,
                Script::new(vec![
                    Step::new(StepType::SetPrice)
                        .with_parameter(param::MODE, StepParameter::simple(value::MODE_NO_RISK)),
                    show_question(),
                    ask_answer(value::MODE_DIRECT),
                    show_right_answer(),
                ]),
            ),
            (
                STAKE,
                Script::new(vec![
                    Step::new(StepType::SetAnswerer)
                        .with_parameter(param::MODE, StepParameter::simple(value::MODE_STAKE)),
                    Step::new(StepType::SetPrice)
                        .with_parameter(param::MODE, StepParameter::simple(value::MODE_STAKE)),
                    show_question(),
                    ask_answer(value::MODE_DIRECT),
                    show_right_answer(),
                ]),
            ),
            (
                SECRET,
                Script::new(vec![
                    Step::new(StepType::SetAnswerer)
                        .with_parameter(param::MODE, StepParameter::simple(value::MODE_SELECT)),
                    Step::new(StepType::SetTheme)
                        .with_parameter(param::THEME, StepParameter::reference(refs::THEME)),
                    Step::new(StepType::SetPrice)
                        .with_parameter(param::MODE, StepParameter::simple(value::MODE_SELECT))
                        .with_parameter(param::CONTENT, StepParameter::reference(refs::PRICE)),
                    show_question(),
                    ask_answer(value::MODE_DIRECT),
                    show_right_answer(),
                ]),
            ),
        ])
    })
}

fn show_question() -> Step {
    Step::new(StepType::ShowContent)
        .with_parameter(param::CONTENT, StepParameter::reference(refs::QUESTION))
}

fn ask_answer(mode: &str) -> Step {
    Step::new(StepType::AskAnswer)
        .with_parameter(param::MODE, StepParameter::simple(mode))
        .with_parameter(param::TIME, StepParameter::reference(refs::TIME))
}

fn show_right_answer() -> Step {
    Step::new(StepType::ShowContent).with_parameter(
        param::FALLBACK_REF_ID,
        StepParameter::simple(value::FALLBACK_RIGHT),
    )
}
