//! Engine configuration

use serde::{Deserialize, Serialize};

/// False-start policy: how early "press the answer button" becomes legal
/// relative to content display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FalseStartMode {
    /// False starts are allowed; buttons activate only at the AskAnswer step
    #[default]
    Enabled,
    /// Buttons activate early only when the preceding content is all text
    TextContentOnly,
    /// Buttons activate as early as the content walk allows
    Disabled,
}

/// Playback configuration, fixed for the lifetime of an engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineOptions {
    /// False-start policy
    pub false_starts: FalseStartMode,
    /// Display the right answer as synthesized text content when a
    /// right-answer fallback cannot be served any richer way
    pub show_simple_right_answers: bool,
    /// Scripts-library type name used when a question carries the default
    /// type marker (or when special types are suppressed)
    pub default_type_name: String,
    /// Play special question types; when false every question collapses to
    /// the default type
    pub play_specials: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            false_starts: FalseStartMode::Enabled,
            show_simple_right_answers: false,
            default_type_name: crate::library::SIMPLE.to_string(),
            play_specials: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_rules() {
        let options = EngineOptions::default();
        assert_eq!(options.false_starts, FalseStartMode::Enabled);
        assert!(!options.show_simple_right_answers);
        assert_eq!(options.default_type_name, "simple");
        assert!(options.play_specials);
    }
}
