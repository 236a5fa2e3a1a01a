//! # quizplay
//!
//! A Rust library that plays back a single quiz question from a data-driven
//! script: an ordered sequence of typed steps (show content, ask for an
//! answer, set answerer/price/theme, declare answer type) whose parameters
//! may be literal or indirect references into the question's own parameter
//! table.
//!
//! The engine walks the script one observable action at a time, reporting
//! every user-visible action to a [`contracts::PlayHandler`] and pausing
//! whenever the handler (driven by UI, timers or network input) must be
//! consulted before continuing. There is no internal waiting: every pause
//! point is the tick operation returning `true`.
//!
//! ## Quick Start
//!
//! ```rust
//! use quizplay::contracts::PlayHandler;
//! use quizplay::engine::QuestionEngine;
//! use quizplay::library;
//! use quizplay::options::EngineOptions;
//! use quizplay::types::{ContentItem, Question, StepParameter};
//!
//! struct Printer;
//!
//! impl PlayHandler for Printer {
//!     fn on_question_content(&mut self, batch: &[ContentItem]) -> bool {
//!         for item in batch {
//!             println!("{}", item.value);
//!         }
//!         false
//!     }
//!
//!     fn on_ask_answer(&mut self, mode: &str, _duration_ms: u32) -> bool {
//!         println!("answer now ({mode})!");
//!         false
//!     }
//! }
//!
//! let question = Question::new()
//!     .with_type_name(library::SIMPLE)
//!     .with_parameter(
//!         library::refs::QUESTION,
//!         StepParameter::content(vec![ContentItem::text("What is big and blue?")]),
//!     )
//!     .with_right_answer("The sky");
//!
//! let mut engine = QuestionEngine::new(question, Box::new(Printer), EngineOptions::default());
//!
//! while engine.play_next() {
//!     // wait for the UI / timer / network event, then tick again
//! }
//! ```
//!
//! A question with no explicit script resolves one from [`library`] by its
//! type name; a question whose type cannot be resolved yields an engine that
//! is exhausted from the start — check [`engine::QuestionEngine::can_play_next`]
//! to present an "unsupported question" outcome.

pub mod cli;
pub mod contracts;
pub mod engine;
pub mod library;
pub mod options;
pub mod storage;
pub mod types;

// Stable public surface - the main API for library users
pub use contracts::{ContentSeek, PlayHandler, QuestionSkip};
pub use engine::QuestionEngine;
pub use engine::false_start::early_button_index;
pub use options::{EngineOptions, FalseStartMode};
pub use storage::DocumentError;
pub use types::{
    AnswerOption, ContentItem, ContentPlacement, ContentType, NumberSet, ParameterValue, Question,
    Script, Step, StepParameter, StepType,
};
