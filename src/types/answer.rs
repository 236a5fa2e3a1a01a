//! Answer-related value types: multiple-choice options and number ranges

use serde::{Deserialize, Serialize};

use super::content::ContentItem;

/// A labeled option for the multiple-choice answer kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    /// Label shown on the option button (also the value of a right answer)
    pub label: String,
    /// Option body content
    pub content: ContentItem,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, content: ContentItem) -> Self {
        Self {
            label: label.into(),
            content,
        }
    }
}

/// A (minimum, maximum, step) numeric range used for prices and stakes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NumberSet {
    pub minimum: i32,
    pub maximum: i32,
    pub step: i32,
}

impl NumberSet {
    pub fn new(minimum: i32, maximum: i32, step: i32) -> Self {
        Self {
            minimum,
            maximum,
            step,
        }
    }

    /// Fixed single value: minimum == maximum, no step
    pub fn fixed(value: i32) -> Self {
        Self::new(value, value, 0)
    }

    /// Clamp the range so that 0 <= minimum <= maximum and
    /// 0 <= step <= maximum - minimum, for arbitrary signed inputs.
    ///
    /// The handler only ever sees normalized ranges.
    pub fn normalized(self) -> Self {
        let mut set = self;
        if set.maximum < 0 {
            return Self::default();
        }
        if set.minimum < 0 {
            set.minimum = 0;
        }
        if set.maximum < set.minimum {
            set.maximum = set.minimum;
        }
        if set.step < 0 || set.step > set.maximum - set.minimum {
            set.step = 0;
        }
        set
    }
}
