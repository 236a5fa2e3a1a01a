//! Script model - the ordered step list a question is played from
//!
//! A script is a data document, not code: each step carries a type tag and a
//! name -> parameter mapping. Parameters are either literal values or
//! references into the owning question's parameter table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::answer::NumberSet;
use super::content::ContentItem;
use super::question::Question;

/// Well-known step parameter names
pub mod param {
    pub const MODE: &str = "mode";
    pub const THEME: &str = "theme";
    pub const CONTENT: &str = "content";
    pub const TYPE: &str = "type";
    pub const OPTIONS: &str = "options";
    pub const FALLBACK_REF_ID: &str = "fallbackRefId";
    pub const SELECT: &str = "select";
    pub const STAKE_VISIBILITY: &str = "stakeVisibility";
    pub const DEVIATION: &str = "deviation";
    pub const TIME: &str = "time";
}

/// Well-known simple parameter values
pub mod value {
    /// AskAnswer mode: answer by pressing the button
    pub const MODE_BUTTON: &str = "button";
    /// AskAnswer mode: answer by direct input
    pub const MODE_DIRECT: &str = "direct";
    /// Answer type: a number within an allowed deviation
    pub const TYPE_NUMERIC: &str = "numeric";
    /// Answer type: a point on an image within an allowed deviation
    pub const TYPE_POINT: &str = "point";
    /// Answer type: pick one of several labeled options
    pub const TYPE_SELECT: &str = "select";
    /// Fallback source naming the question's right answer
    pub const FALLBACK_RIGHT: &str = "right";
    /// SetAnswerer/SetPrice mode: decided by a stake auction
    pub const MODE_STAKE: &str = "stake";
    /// SetAnswerer/SetPrice mode: decided by an explicit selection
    pub const MODE_SELECT: &str = "select";
    /// SetPrice mode: keep the nominal price, answerer risks nothing
    pub const MODE_NO_RISK: &str = "noRisk";
}

/// Immutable ordered sequence of steps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn get_step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One typed instruction in a script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default)]
    pub parameters: BTreeMap<String, StepParameter>,
}

impl Step {
    pub fn new(step_type: StepType) -> Self {
        Self {
            step_type,
            parameters: BTreeMap::new(),
        }
    }

    /// Builder-style parameter attachment, used by the scripts library and tests
    pub fn with_parameter(mut self, name: impl Into<String>, parameter: StepParameter) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&StepParameter> {
        self.parameters.get(name)
    }

    /// Resolve a named parameter, following one level of reference
    /// indirection through the question's parameter table
    pub fn resolve_parameter<'a>(
        &'a self,
        name: &str,
        question: &'a Question,
    ) -> Option<&'a ParameterValue> {
        self.parameters.get(name)?.resolve(question)
    }

    /// Resolve a named parameter down to its simple string value
    pub fn resolve_simple<'a>(&'a self, name: &str, question: &'a Question) -> Option<&'a str> {
        self.resolve_parameter(name, question)?.as_simple()
    }
}

/// Type tag of a step
///
/// Serialized as a plain string; unrecognized tags round-trip into
/// [`StepType::Unknown`] so evolving documents keep playing (the engine
/// treats unknown steps as no-ops).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum StepType {
    SetAnswerer,
    AnnouncePrice,
    SetPrice,
    SetTheme,
    Accept,
    SetAnswerType,
    ShowContent,
    AskAnswer,
    Unknown,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::SetAnswerer => "setAnswerer",
            StepType::AnnouncePrice => "announcePrice",
            StepType::SetPrice => "setPrice",
            StepType::SetTheme => "setTheme",
            StepType::Accept => "accept",
            StepType::SetAnswerType => "setAnswerType",
            StepType::ShowContent => "showContent",
            StepType::AskAnswer => "askAnswer",
            StepType::Unknown => "unknown",
        }
    }
}

impl From<String> for StepType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "setAnswerer" => StepType::SetAnswerer,
            "announcePrice" => StepType::AnnouncePrice,
            "setPrice" => StepType::SetPrice,
            "setTheme" => StepType::SetTheme,
            "accept" => StepType::Accept,
            "setAnswerType" => StepType::SetAnswerType,
            "showContent" => StepType::ShowContent,
            "askAnswer" => StepType::AskAnswer,
            _ => StepType::Unknown,
        }
    }
}

impl From<StepType> for String {
    fn from(step_type: StepType) -> Self {
        step_type.as_str().to_string()
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named value attached to a step: either a literal or a reference id
/// into the owning question's parameter table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value")]
pub enum StepParameter {
    Literal(ParameterValue),
    Reference(String),
}

impl StepParameter {
    /// Literal simple string parameter
    pub fn simple(value: impl Into<String>) -> Self {
        Self::Literal(ParameterValue::Simple(value.into()))
    }

    /// Literal content list parameter
    pub fn content(items: Vec<ContentItem>) -> Self {
        Self::Literal(ParameterValue::Content(items))
    }

    /// Literal number range parameter
    pub fn number_set(set: NumberSet) -> Self {
        Self::Literal(ParameterValue::NumberSet(set))
    }

    /// Literal group of named sub-parameters
    pub fn group(entries: BTreeMap<String, StepParameter>) -> Self {
        Self::Literal(ParameterValue::Group(entries))
    }

    /// Reference into the question's parameter table
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }

    /// Resolve to a literal value, following at most one level of reference
    /// indirection through the question's parameter table. An unresolved
    /// reference behaves as "parameter absent", never as an error.
    pub fn resolve<'a>(&'a self, question: &'a Question) -> Option<&'a ParameterValue> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Reference(id) => match question.parameter(id) {
                Some(Self::Literal(value)) => Some(value),
                _ => None,
            },
        }
    }
}

/// The literal payload of a step parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum ParameterValue {
    /// Plain scalar value
    Simple(String),
    /// Ordered list of content items
    Content(Vec<ContentItem>),
    /// Named group of sub-parameters
    Group(BTreeMap<String, StepParameter>),
    /// Numeric range descriptor
    NumberSet(NumberSet),
}

impl ParameterValue {
    pub fn as_simple(&self) -> Option<&str> {
        match self {
            Self::Simple(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&[ContentItem]> {
        match self {
            Self::Content(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&BTreeMap<String, StepParameter>> {
        match self {
            Self::Group(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_number_set(&self) -> Option<&NumberSet> {
        match self {
            Self::NumberSet(set) => Some(set),
            _ => None,
        }
    }
}
