//! CUI player mode for running a single question
//!
//! This module provides an interactive player mode where a question can be
//! experienced in the terminal: content batches print to the screen, every
//! pause point waits for input, and answers are checked against the
//! question's accepted right answers.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::contracts::{ContentSeek, PlayHandler, QuestionSkip};
use crate::engine::QuestionEngine;
use crate::options::EngineOptions;
use crate::types::{AnswerOption, ContentItem, ContentPlacement, NumberSet, Question};

/// State shared between the console handler and the input loop
#[derive(Default)]
struct Shared {
    awaiting_answer: bool,
    skip: Option<QuestionSkip>,
}

/// Play handler that renders every engine action to the terminal
struct ConsoleHandler {
    shared: Rc<RefCell<Shared>>,
}

impl ConsoleHandler {
    fn print_items(items: &[ContentItem]) {
        for item in items {
            let prefix = match item.placement {
                ContentPlacement::Screen => "",
                ContentPlacement::Background => "[background] ",
                ContentPlacement::Replic => "[showman] ",
            };
            println!("{prefix}{}", item.value);
        }
    }
}

impl PlayHandler for ConsoleHandler {
    fn on_question_start(&mut self, buttons_required: bool, skip: QuestionSkip) {
        self.shared.borrow_mut().skip = Some(skip);
        if buttons_required {
            println!("(get ready on the button)");
        }
    }

    fn on_set_answerer(
        &mut self,
        mode: &str,
        select: Option<&str>,
        _stake_visibility: Option<&str>,
    ) -> bool {
        match select {
            Some(select) => println!("* answerer: {mode} ({select})"),
            None => println!("* answerer: {mode}"),
        }
        true
    }

    fn on_announce_price(&mut self, range: &NumberSet) -> bool {
        println!(
            "* playing for {}..{} (step {})",
            range.minimum, range.maximum, range.step
        );
        true
    }

    fn on_set_price(&mut self, mode: &str, range: Option<&NumberSet>) -> bool {
        match range {
            Some(range) => println!("* price: {mode} ({}..{})", range.minimum, range.maximum),
            None => println!("* price: {mode}"),
        }
        true
    }

    fn on_set_theme(&mut self, theme_name: &str) -> bool {
        println!("* real theme: {theme_name}");
        true
    }

    fn on_accept(&mut self) -> bool {
        println!("* the question must be accepted as-is");
        true
    }

    fn on_numeric_answer(&mut self, deviation: u32) -> bool {
        println!("* answer with a number (allowed deviation {deviation})");
        true
    }

    fn on_point_answer(&mut self, deviation: f64) -> bool {
        println!("* answer with a point (allowed deviation {deviation})");
        true
    }

    fn on_answer_options(
        &mut self,
        options: &[AnswerOption],
        _screen_batches: &[Vec<ContentItem>],
    ) -> bool {
        println!("* choose one of:");
        for option in options {
            println!("    {}: {}", option.label, option.content.value);
        }
        true
    }

    fn on_content_start(&mut self, _items: &[ContentItem], _seek: ContentSeek) {
        println!();
    }

    fn on_question_content(&mut self, batch: &[ContentItem]) -> bool {
        Self::print_items(batch);
        false
    }

    fn on_button_press_allowed(&mut self) -> bool {
        println!("(buttons are live!)");
        false
    }

    fn on_ask_answer(&mut self, mode: &str, duration_ms: u32) -> bool {
        self.shared.borrow_mut().awaiting_answer = true;
        if duration_ms > 0 {
            println!("? your answer ({mode}, {duration_ms} ms):");
        } else {
            println!("? your answer ({mode}):");
        }
        false
    }

    fn on_right_answer_option(&mut self, label: &str) -> bool {
        println!("! the right option was: {label}");
        true
    }

    fn on_right_answer_point(&mut self, answer: &str) -> bool {
        println!("! the right point was: {answer}");
        true
    }

    fn on_simple_right_answer_start(&mut self) {
        println!("! the right answer:");
    }
}

/// Run the player mode for one question
pub fn run_play(question: Question, options: EngineOptions) -> anyhow::Result<()> {
    let shared = Rc::new(RefCell::new(Shared::default()));
    let right_answers = question.right.clone();
    let handler = ConsoleHandler {
        shared: Rc::clone(&shared),
    };
    let mut engine = QuestionEngine::new(question, Box::new(handler), options);

    if !engine.can_play_next() {
        anyhow::bail!("unsupported question type: no playable script");
    }

    println!("=== quizplay Question Player ===");
    println!();
    println!("Controls:");
    println!("  Enter: next");
    println!("  s:     skip the rest of the question");
    println!("  q:     quit");
    println!();

    while engine.play_next() {
        let input = read_input()?;
        match input.as_str() {
            "q" => {
                println!("Goodbye!");
                return Ok(());
            }
            "s" => {
                let shared = shared.borrow();
                if let Some(skip) = &shared.skip {
                    skip.skip();
                }
            }
            answer => {
                let mut shared = shared.borrow_mut();
                if shared.awaiting_answer {
                    shared.awaiting_answer = false;
                    if !answer.is_empty() {
                        let correct = right_answers
                            .iter()
                            .any(|right| right.eq_ignore_ascii_case(answer));
                        if correct {
                            println!("  -> correct!");
                        } else {
                            println!("  -> not accepted");
                        }
                    }
                }
            }
        }
    }

    println!();
    println!("Question finished.");
    Ok(())
}

fn read_input() -> anyhow::Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
