//! Question envelope: an optional explicit script, the parameter table that
//! reference parameters resolve through, a type name and the accepted answers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::script::{Script, StepParameter};

/// One authored question, the unit a [`crate::engine::QuestionEngine`]
/// plays exactly once
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Question {
    /// Explicit playback script; when absent, the engine looks the question's
    /// type name up in the scripts library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    /// Flat parameter table, the indirection target for reference parameters
    #[serde(default)]
    pub parameters: BTreeMap<String, StepParameter>,
    /// Question type name; [`Question::DEFAULT_TYPE_MARKER`] stands for
    /// "whatever the engine's configured default is"
    #[serde(default)]
    pub type_name: String,
    /// Acceptable right answers, most canonical first
    #[serde(default)]
    pub right: Vec<String>,
}

impl Question {
    /// Type name standing for the configured default question type
    pub const DEFAULT_TYPE_MARKER: &'static str = "";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_parameter(mut self, id: impl Into<String>, parameter: StepParameter) -> Self {
        self.parameters.insert(id.into(), parameter);
        self
    }

    pub fn with_right_answer(mut self, answer: impl Into<String>) -> Self {
        self.right.push(answer.into());
        self
    }

    pub fn parameter(&self, id: &str) -> Option<&StepParameter> {
        self.parameters.get(id)
    }

    /// The canonical right answer, empty when none is authored
    pub fn main_right_answer(&self) -> &str {
        self.right.first().map(String::as_str).unwrap_or("")
    }
}
