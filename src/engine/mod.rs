//! Engine module - step-by-step playback of a question script
//!
//! [`QuestionEngine`] walks a script one observable action per call. Each
//! [`QuestionEngine::play_next`] call performs exactly one unit of work and
//! returns `true` to tell the caller to wait for an external event before
//! calling again, or `false` once the question is finished. Resuming after a
//! pause is indistinguishable from a single uninterrupted run.

pub mod false_start;

use std::cell::Cell;
use std::rc::Rc;

use crate::contracts::{ContentSeek, PlayHandler, QuestionSkip};
use crate::library;
use crate::options::EngineOptions;
use crate::types::script::{param, value};
use crate::types::{
    AnswerOption, ContentItem, ContentPlacement, ParameterValue, Question, Script, Step,
    StepParameter, StepType,
};

/// Answer kind selected by a SetAnswerType step during the preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerKind {
    Numeric,
    Point,
    Select,
}

/// Outcome of playing one step
enum StepOutcome {
    /// Keep walking the script within the same tick
    Continue,
    /// Return control to the caller until an external event arrives
    Pause,
}

/// The script-stepping interpreter for one play-through of one question
///
/// Created once per question, ticked by [`Self::play_next`], discarded when
/// exhausted. Single-threaded; the handler may call back only through the
/// [`QuestionSkip`] and [`ContentSeek`] handles it is given.
pub struct QuestionEngine {
    question: Question,
    script: Option<Script>,
    handler: Box<dyn PlayHandler>,
    options: EngineOptions,
    step_index: usize,
    content_index: usize,
    started: bool,
    awaiting_answer: bool,
    buttons_enabled: bool,
    answer_kind: Option<AnswerKind>,
    false_start_index: Option<usize>,
    skip_slot: Rc<Cell<bool>>,
    seek_slot: Rc<Cell<Option<(usize, usize)>>>,
}

impl QuestionEngine {
    /// Build an engine for one question.
    ///
    /// The question's explicit script wins; otherwise the effective type name
    /// is looked up in the scripts library. A question whose type cannot be
    /// resolved yields an engine that is exhausted from the start
    /// ([`Self::can_play_next`] is `false` and ticking is a no-op).
    pub fn new(mut question: Question, handler: Box<dyn PlayHandler>, options: EngineOptions) -> Self {
        let script = match question.script.take() {
            Some(script) => Some(script),
            None => {
                let type_name = if question.type_name == Question::DEFAULT_TYPE_MARKER
                    || (!options.play_specials && question.type_name != options.default_type_name)
                {
                    options.default_type_name.as_str()
                } else {
                    question.type_name.as_str()
                };

                let script = library::script_for(type_name).cloned();
                if script.is_none() {
                    log::warn!("no built-in script for question type {type_name:?}");
                }
                script
            }
        };

        Self {
            question,
            script,
            handler,
            options,
            step_index: 0,
            content_index: 0,
            started: false,
            awaiting_answer: false,
            buttons_enabled: false,
            answer_kind: None,
            false_start_index: None,
            skip_slot: Rc::new(Cell::new(false)),
            seek_slot: Rc::new(Cell::new(None)),
        }
    }

    /// Whether another [`Self::play_next`] call can still do work
    pub fn can_play_next(&self) -> bool {
        self.script
            .as_ref()
            .is_some_and(|script| self.step_index < script.len())
    }

    /// Current step cursor position
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Whether button pressing is currently signaled as allowed
    pub fn buttons_enabled(&self) -> bool {
        self.buttons_enabled
    }

    /// Perform exactly one unit of observable work.
    ///
    /// Returns `true` when the caller must wait for an external event before
    /// ticking again, `false` once the question is finished.
    pub fn play_next(&mut self) -> bool {
        let Some(script) = self.script.as_ref() else {
            return false;
        };
        let script_len = script.len();

        if !self.started {
            self.started = true;
            self.false_start_index =
                false_start::early_button_index(script, &self.question, self.options.false_starts);
            let buttons_required = script.steps.iter().any(|step| {
                step.step_type == StepType::AskAnswer
                    && step.resolve_simple(param::MODE, &self.question) == Some(value::MODE_BUTTON)
            });
            log::debug!(
                "question started: {script_len} steps, buttons_required={buttons_required}, early_button_index={:?}",
                self.false_start_index
            );
            let skip = QuestionSkip::new(Rc::clone(&self.skip_slot));
            self.handler.on_question_start(buttons_required, skip);
        }

        if self.awaiting_answer {
            self.awaiting_answer = false;
            self.handler.on_answer_start();
        }

        loop {
            if self.skip_slot.get() {
                log::debug!("skip requested, finishing question");
                self.step_index = script_len;
            }
            self.apply_pending_seek();

            let Some(step) = self
                .script
                .as_ref()
                .and_then(|script| script.get_step(self.step_index))
                .cloned()
            else {
                return false;
            };
            log::trace!("step {} ({})", self.step_index, step.step_type);

            match self.play_step(&step) {
                StepOutcome::Pause => return true,
                StepOutcome::Continue => {}
            }
        }
    }

    /// Force the cursor just past the most recent AskAnswer step (or to the
    /// script's end when there is none). Used on hard timeouts.
    ///
    /// Never moves the cursor backward; calling it twice in a row is
    /// idempotent.
    pub fn move_to_answer(&mut self) {
        let Some(script) = &self.script else {
            return;
        };
        let len = script.len();
        if len == 0 {
            return;
        }

        let scan_from = self.step_index.max(len.saturating_sub(2)).min(len - 1);
        let found = (0..=scan_from)
            .rev()
            .find(|&index| script.steps[index].step_type == StepType::AskAnswer);
        let target = match found {
            Some(index) => index + 1,
            None => len,
        };

        if target <= self.step_index {
            return;
        }

        log::debug!("moving to answer: cursor {} -> {target}", self.step_index);
        self.step_index = target;
        self.content_index = 0;
        self.buttons_enabled = false;
        self.awaiting_answer = false;

        if found.is_some() {
            self.handler.on_answer_start();
        }
    }

    fn play_step(&mut self, step: &Step) -> StepOutcome {
        match step.step_type {
            StepType::SetAnswerer => self.play_set_answerer(step),
            StepType::AnnouncePrice => self.play_announce_price(step),
            StepType::SetPrice => self.play_set_price(step),
            StepType::SetTheme => self.play_set_theme(step),
            StepType::Accept => self.play_accept(),
            StepType::SetAnswerType => self.play_set_answer_type(step),
            StepType::ShowContent => self.play_show_content(step),
            StepType::AskAnswer => self.play_ask_answer(step),
            StepType::Unknown => self.skip_step(),
        }
    }

    /// Degrade the current step to a no-op: advance and keep walking
    fn skip_step(&mut self) -> StepOutcome {
        self.step_index += 1;
        StepOutcome::Continue
    }

    fn pause_if(requested: bool) -> StepOutcome {
        if requested {
            StepOutcome::Pause
        } else {
            StepOutcome::Continue
        }
    }

    fn play_set_answerer(&mut self, step: &Step) -> StepOutcome {
        let Some(mode) = step.resolve_simple(param::MODE, &self.question) else {
            return self.skip_step();
        };
        let select = step.resolve_simple(param::SELECT, &self.question);
        let stake_visibility = step.resolve_simple(param::STAKE_VISIBILITY, &self.question);

        self.step_index += 1;
        Self::pause_if(self.handler.on_set_answerer(mode, select, stake_visibility))
    }

    fn play_announce_price(&mut self, step: &Step) -> StepOutcome {
        let Some(range) = step
            .resolve_parameter(param::CONTENT, &self.question)
            .and_then(ParameterValue::as_number_set)
        else {
            return self.skip_step();
        };
        let range = range.normalized();

        self.step_index += 1;
        Self::pause_if(self.handler.on_announce_price(&range))
    }

    fn play_set_price(&mut self, step: &Step) -> StepOutcome {
        let Some(mode) = step.resolve_simple(param::MODE, &self.question) else {
            return self.skip_step();
        };
        let range = step
            .resolve_parameter(param::CONTENT, &self.question)
            .and_then(ParameterValue::as_number_set)
            .map(|set| set.normalized());

        self.step_index += 1;
        Self::pause_if(self.handler.on_set_price(mode, range.as_ref()))
    }

    fn play_set_theme(&mut self, step: &Step) -> StepOutcome {
        let Some(theme) = step.resolve_simple(param::THEME, &self.question) else {
            return self.skip_step();
        };

        self.step_index += 1;
        Self::pause_if(self.handler.on_set_theme(theme))
    }

    fn play_accept(&mut self) -> StepOutcome {
        self.step_index += 1;
        Self::pause_if(self.handler.on_accept())
    }

    fn play_set_answer_type(&mut self, step: &Step) -> StepOutcome {
        let Some(kind) = step.resolve_simple(param::TYPE, &self.question) else {
            return self.skip_step();
        };

        match kind {
            value::TYPE_NUMERIC => {
                let deviation = step
                    .resolve_simple(param::DEVIATION, &self.question)
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .unwrap_or(0);
                self.answer_kind = Some(AnswerKind::Numeric);
                self.step_index += 1;
                Self::pause_if(self.handler.on_numeric_answer(deviation))
            }
            value::TYPE_POINT => {
                let deviation = step
                    .resolve_simple(param::DEVIATION, &self.question)
                    .and_then(|raw| raw.parse::<f64>().ok())
                    .unwrap_or(0.0);
                self.answer_kind = Some(AnswerKind::Point);
                self.step_index += 1;
                Self::pause_if(self.handler.on_point_answer(deviation))
            }
            value::TYPE_SELECT => {
                let options = self.collect_answer_options(step);
                if options.len() < 2 {
                    return self.skip_step();
                }
                let screen_batches = self.screen_content_batches();
                self.answer_kind = Some(AnswerKind::Select);
                self.step_index += 1;
                Self::pause_if(self.handler.on_answer_options(&options, &screen_batches))
            }
            // only these three kinds are supported
            _ => self.skip_step(),
        }
    }

    /// Valid options of a SetAnswerType(select) step: each entry must resolve
    /// to at least one content item; only the first item is used
    fn collect_answer_options(&self, step: &Step) -> Vec<AnswerOption> {
        let Some(group) = step
            .resolve_parameter(param::OPTIONS, &self.question)
            .and_then(ParameterValue::as_group)
        else {
            return Vec::new();
        };

        let mut options = Vec::new();
        for (label, parameter) in group {
            let item = parameter
                .resolve(&self.question)
                .and_then(ParameterValue::as_content)
                .and_then(|items| items.first());
            if let Some(item) = item {
                options.push(AnswerOption::new(label.clone(), item.clone()));
            }
        }
        options
    }

    /// Screen-placed content of the question's parameter table, split into
    /// groups at wait boundaries. Lets the handler preview per-option
    /// content timing.
    fn screen_content_batches(&self) -> Vec<Vec<ContentItem>> {
        let mut batches = Vec::new();
        for parameter in self.question.parameters.values() {
            let StepParameter::Literal(ParameterValue::Content(items)) = parameter else {
                continue;
            };
            let mut batch = Vec::new();
            for item in items {
                if item.placement != ContentPlacement::Screen {
                    continue;
                }
                batch.push(item.clone());
                if item.wait_for_finish {
                    batches.push(std::mem::take(&mut batch));
                }
            }
            if !batch.is_empty() {
                batches.push(batch);
            }
        }
        batches
    }

    fn play_show_content(&mut self, step: &Step) -> StepOutcome {
        if self.false_start_index == Some(self.step_index) {
            // fires exactly once per question
            self.false_start_index = None;
            self.buttons_enabled = true;
            log::debug!("button press allowed ahead of step {}", self.step_index);
            if self.handler.on_button_press_allowed() {
                return StepOutcome::Pause;
            }
        }

        let resolved = step
            .resolve_parameter(param::CONTENT, &self.question)
            .and_then(ParameterValue::as_content)
            .map(|items| items.to_vec());

        let items = match resolved {
            Some(items) => items,
            None => match self.play_content_fallback(step) {
                FallbackOutcome::Synthesized(items) => items,
                FallbackOutcome::Pause => return StepOutcome::Pause,
                FallbackOutcome::NoOp => return self.skip_step(),
            },
        };

        self.play_content_items(&items)
    }

    /// A ShowContent step whose content did not resolve may still serve the
    /// question's right answer, depending on its declared fallback source
    /// and the selected answer kind
    fn play_content_fallback(&mut self, step: &Step) -> FallbackOutcome {
        if step.resolve_simple(param::FALLBACK_REF_ID, &self.question) != Some(value::FALLBACK_RIGHT)
        {
            return FallbackOutcome::NoOp;
        }

        match self.answer_kind {
            Some(AnswerKind::Select) => {
                let label = self.question.main_right_answer().to_string();
                self.step_index += 1;
                self.content_index = 0;
                self.handler.on_right_answer_option(&label);
                FallbackOutcome::Pause
            }
            Some(AnswerKind::Point) => {
                let answer = self.question.main_right_answer().to_string();
                self.step_index += 1;
                self.content_index = 0;
                self.handler.on_right_answer_point(&answer);
                FallbackOutcome::Pause
            }
            _ if self.options.show_simple_right_answers => {
                let items = vec![ContentItem::text(self.question.main_right_answer())];
                self.handler.on_simple_right_answer_start();
                FallbackOutcome::Synthesized(items)
            }
            _ => FallbackOutcome::NoOp,
        }
    }

    fn play_content_items(&mut self, items: &[ContentItem]) -> StepOutcome {
        if self.content_index == 0 && !items.is_empty() {
            let seek = ContentSeek::new(self.step_index, items.len(), Rc::clone(&self.seek_slot));
            self.handler.on_content_start(items, seek);
            // a seek issued during the notification takes effect right away
            self.apply_pending_seek();
        }

        let mut batch: Vec<ContentItem> = Vec::new();
        let mut index = self.content_index;
        while index < items.len() {
            let item = &items[index];
            batch.push(item.clone());
            index += 1;

            if item.wait_for_finish {
                // cursor state settles before the handler observes the batch
                if index == items.len() {
                    self.step_index += 1;
                    self.content_index = 0;
                } else {
                    self.content_index = index;
                }
                self.handler.on_question_content(&batch);
                return StepOutcome::Pause;
            }
        }

        // exhausted without a trailing wait boundary
        self.step_index += 1;
        self.content_index = 0;
        Self::pause_if(!batch.is_empty() && self.handler.on_question_content(&batch))
    }

    fn play_ask_answer(&mut self, step: &Step) -> StepOutcome {
        let Some(mode) = step.resolve_simple(param::MODE, &self.question) else {
            return self.skip_step();
        };
        let duration_ms = step
            .resolve_simple(param::TIME, &self.question)
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(0);

        self.step_index += 1;
        self.awaiting_answer = true;
        if mode == value::MODE_BUTTON {
            self.buttons_enabled = true;
        }
        self.handler.on_ask_answer(mode, duration_ms);
        StepOutcome::Pause
    }

    /// Apply a stored seek request if it still addresses the current step
    fn apply_pending_seek(&mut self) {
        if let Some((step_index, item_index)) = self.seek_slot.take() {
            if step_index == self.step_index {
                log::debug!("content cursor moved to item {item_index}");
                self.content_index = item_index;
            }
        }
    }
}

enum FallbackOutcome {
    /// Content synthesized from the right answer; continue the content walk
    Synthesized(Vec<ContentItem>),
    Pause,
    NoOp,
}
