//! False-start positioning: computing where "press the button" becomes
//! legal ahead of the AskAnswer step

use crate::options::FalseStartMode;
use crate::types::script::{param, value};
use crate::types::{ContentItem, ParameterValue, Question, Script, StepType};

/// Compute the index of the earliest step at which button pressing should be
/// enabled, ahead of the first button-mode AskAnswer step.
///
/// Returns `None` when false starts are allowed (buttons activate at the
/// AskAnswer step itself), when no button-mode AskAnswer step exists, or when
/// the step immediately before it already disqualifies the backward walk.
///
/// Pure; called once at the start of playback.
pub fn early_button_index(
    script: &Script,
    question: &Question,
    mode: FalseStartMode,
) -> Option<usize> {
    if mode == FalseStartMode::Enabled {
        return None;
    }

    let ask_index = script.steps.iter().position(|step| {
        step.step_type == StepType::AskAnswer
            && step.resolve_simple(param::MODE, question) == Some(value::MODE_BUTTON)
    })?;

    let text_only = mode == FalseStartMode::TextContentOnly;
    let mut earliest = ask_index;

    for index in (0..ask_index).rev() {
        let step = &script.steps[index];
        if step.step_type != StepType::ShowContent {
            break;
        }

        let items = step
            .resolve_parameter(param::CONTENT, question)
            .and_then(ParameterValue::as_content);

        match items {
            Some(items) if !items.is_empty() => {
                if text_only && !items.iter().all(ContentItem::is_text) {
                    break;
                }
                earliest = index;
            }
            _ => break,
        }
    }

    (earliest < ask_index).then_some(earliest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Step, StepParameter};

    fn show_content(items: Vec<ContentItem>) -> Step {
        Step::new(StepType::ShowContent)
            .with_parameter(param::CONTENT, StepParameter::content(items))
    }

    fn ask_answer(mode: &str) -> Step {
        Step::new(StepType::AskAnswer).with_parameter(param::MODE, StepParameter::simple(mode))
    }

    #[test]
    fn enabled_mode_never_activates_early() {
        let script = Script::new(vec![show_content(vec![ContentItem::text("Q")]), ask_answer(value::MODE_BUTTON)]);
        let question = Question::new();
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Enabled),
            None
        );
    }

    #[test]
    fn disabled_mode_absorbs_preceding_content() {
        let script = Script::new(vec![show_content(vec![ContentItem::text("Q")]), ask_answer(value::MODE_BUTTON)]);
        let question = Question::new();
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Disabled),
            Some(0)
        );
    }

    #[test]
    fn nothing_before_ask_answer_yields_none() {
        let script = Script::new(vec![ask_answer(value::MODE_BUTTON)]);
        let question = Question::new();
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Disabled),
            None
        );
    }

    #[test]
    fn direct_mode_ask_answer_is_not_a_target() {
        let script = Script::new(vec![show_content(vec![ContentItem::text("Q")]), ask_answer(value::MODE_DIRECT)]);
        let question = Question::new();
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Disabled),
            None
        );
    }

    #[test]
    fn walk_stops_at_first_disqualifying_step() {
        let mut audio = ContentItem::text("melody.mp3")
            .with_placement(crate::types::ContentPlacement::Background);
        audio.content_type = crate::types::ContentType::Audio;

        let script = Script::new(vec![
            show_content(vec![ContentItem::text("intro")]),
            show_content(vec![audio]),
            show_content(vec![ContentItem::text("Q")]),
            ask_answer(value::MODE_BUTTON),
        ]);
        let question = Question::new();

        // text-only mode stops at the audio step but still absorbs the
        // text step after it
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::TextContentOnly),
            Some(2)
        );
        // plain disabled mode walks all the way back
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Disabled),
            Some(0)
        );
    }

    #[test]
    fn content_behind_reference_qualifies() {
        let script = Script::new(vec![
            Step::new(StepType::ShowContent)
                .with_parameter(param::CONTENT, StepParameter::reference("question")),
            ask_answer(value::MODE_BUTTON),
        ]);
        let question = Question::new().with_parameter(
            "question",
            StepParameter::content(vec![ContentItem::text("Q")]),
        );
        assert_eq!(
            early_button_index(&script, &question, FalseStartMode::Disabled),
            Some(0)
        );

        // unresolved reference behaves as absent content and disqualifies
        let empty = Question::new();
        assert_eq!(
            early_button_index(&script, &empty, FalseStartMode::Disabled),
            None
        );
    }
}
