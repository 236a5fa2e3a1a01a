//! Public contracts - the play handler boundary
//!
//! The engine never renders, waits or talks to the network itself; it calls
//! into a [`PlayHandler`] for every user-visible action. Decision callbacks
//! return `true` to request a pause (the caller must wait for an external
//! event before ticking again); notification callbacks return nothing.
//!
//! The handler never calls back into the engine except through the two
//! handles it is explicitly given: [`QuestionSkip`] at question start and
//! [`ContentSeek`] at content start.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::{AnswerOption, ContentItem, NumberSet};

/// Handle for force-skipping the remainder of the question
///
/// Handed to the handler in [`PlayHandler::on_question_start`]; may be
/// invoked during the callback or stored and invoked later. The engine
/// observes the request at its next tick and moves the cursor to the
/// script's end.
#[derive(Debug, Clone)]
pub struct QuestionSkip {
    slot: Rc<Cell<bool>>,
}

impl QuestionSkip {
    pub(crate) fn new(slot: Rc<Cell<bool>>) -> Self {
        Self { slot }
    }

    /// Request that the rest of the question be skipped
    pub fn skip(&self) {
        self.slot.set(true);
    }
}

/// Handle for repositioning the content cursor within one ShowContent step
///
/// Handed to the handler in [`PlayHandler::on_content_start`]. The handle is
/// bound to the step and item count it was created for: requests out of
/// range, or delivered once the engine has moved to a different step, are
/// ignored.
#[derive(Debug, Clone)]
pub struct ContentSeek {
    step_index: usize,
    item_count: usize,
    slot: Rc<Cell<Option<(usize, usize)>>>,
}

impl ContentSeek {
    pub(crate) fn new(
        step_index: usize,
        item_count: usize,
        slot: Rc<Cell<Option<(usize, usize)>>>,
    ) -> Self {
        Self {
            step_index,
            item_count,
            slot,
        }
    }

    /// Request playback to continue from the given content-item index
    pub fn move_to(&self, item_index: usize) {
        if item_index < self.item_count {
            self.slot.set(Some((self.step_index, item_index)));
        }
    }
}

/// Synchronous callback boundary the engine reports every observable action to
///
/// Decision callbacks return `true` to pause playback after the call; pure
/// notifications are void. Every method has a no-op default so a handler only
/// implements the actions it cares about.
pub trait PlayHandler {
    /// The question has started. `buttons_required` tells whether any step
    /// will ask for an answer by button; `skip` force-skips the question.
    fn on_question_start(&mut self, buttons_required: bool, skip: QuestionSkip) {
        let _ = (buttons_required, skip);
    }

    /// Select who answers
    fn on_set_answerer(
        &mut self,
        mode: &str,
        select: Option<&str>,
        stake_visibility: Option<&str>,
    ) -> bool {
        let _ = (mode, select, stake_visibility);
        false
    }

    /// Announce the range the question can be played for
    fn on_announce_price(&mut self, range: &NumberSet) -> bool {
        let _ = range;
        false
    }

    /// Fix the question price
    fn on_set_price(&mut self, mode: &str, range: Option<&NumberSet>) -> bool {
        let _ = (mode, range);
        false
    }

    /// Announce the real question theme
    fn on_set_theme(&mut self, theme_name: &str) -> bool {
        let _ = theme_name;
        false
    }

    /// Ask the answerer to accept the question as-is
    fn on_accept(&mut self) -> bool {
        false
    }

    /// The answer will be a number within the given deviation
    fn on_numeric_answer(&mut self, deviation: u32) -> bool {
        let _ = deviation;
        false
    }

    /// The answer will be a point within the given deviation
    fn on_point_answer(&mut self, deviation: f64) -> bool {
        let _ = deviation;
        false
    }

    /// The answer will be one of the given options. `screen_batches` holds
    /// the question's screen-placed content split at wait boundaries, for
    /// previewing per-option timing.
    fn on_answer_options(
        &mut self,
        options: &[AnswerOption],
        screen_batches: &[Vec<ContentItem>],
    ) -> bool {
        let _ = (options, screen_batches);
        false
    }

    /// Content display within a ShowContent step has started; `seek` allows
    /// repositioning inside the same step
    fn on_content_start(&mut self, items: &[ContentItem], seek: ContentSeek) {
        let _ = (items, seek);
    }

    /// One batch of content items to present together
    fn on_question_content(&mut self, batch: &[ContentItem]) -> bool {
        let _ = batch;
        false
    }

    /// Button pressing is now allowed, ahead of the AskAnswer step
    fn on_button_press_allowed(&mut self) -> bool {
        false
    }

    /// An answer is being requested; the engine pauses after this call
    /// regardless of the returned value
    fn on_ask_answer(&mut self, mode: &str, duration_ms: u32) -> bool {
        let _ = (mode, duration_ms);
        false
    }

    /// The answer window's visible phase has begun
    fn on_answer_start(&mut self) {}

    /// Reveal of the right option in a multiple-choice question
    fn on_right_answer_option(&mut self, label: &str) -> bool {
        let _ = label;
        false
    }

    /// Reveal of the right point answer
    fn on_right_answer_point(&mut self, answer: &str) -> bool {
        let _ = answer;
        false
    }

    /// A plain-text right-answer display has begun
    fn on_simple_right_answer_start(&mut self) {}
}
