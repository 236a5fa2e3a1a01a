//! Integration tests for step dispatch: preamble steps, answer types,
//! AskAnswer and script resolution

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use quizplay::types::script::{param, value};
use quizplay::{
    AnswerOption, ContentItem, ContentPlacement, EngineOptions, NumberSet, PlayHandler, Question,
    QuestionEngine, QuestionSkip, Script, Step, StepParameter, StepType, library,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every callback into a shared log; decision callbacks pause when
/// `pause_decisions` is set, mimicking a UI that acknowledges each action
struct Recorder {
    log: Log,
    pause_decisions: bool,
}

impl Recorder {
    fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            pause_decisions: false,
        }
    }

    fn pausing(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            pause_decisions: true,
        }
    }

    fn push(&self, event: String) {
        self.log.borrow_mut().push(event);
    }
}

impl PlayHandler for Recorder {
    fn on_question_start(&mut self, buttons_required: bool, _skip: QuestionSkip) {
        self.push(format!("start buttons={buttons_required}"));
    }

    fn on_set_answerer(
        &mut self,
        mode: &str,
        select: Option<&str>,
        stake_visibility: Option<&str>,
    ) -> bool {
        self.push(format!(
            "answerer {mode} select={} stake={}",
            select.unwrap_or("-"),
            stake_visibility.unwrap_or("-")
        ));
        self.pause_decisions
    }

    fn on_announce_price(&mut self, range: &NumberSet) -> bool {
        self.push(format!(
            "announce-price {}..{}/{}",
            range.minimum, range.maximum, range.step
        ));
        self.pause_decisions
    }

    fn on_set_price(&mut self, mode: &str, range: Option<&NumberSet>) -> bool {
        match range {
            Some(range) => self.push(format!(
                "set-price {mode} {}..{}/{}",
                range.minimum, range.maximum, range.step
            )),
            None => self.push(format!("set-price {mode}")),
        }
        self.pause_decisions
    }

    fn on_set_theme(&mut self, theme_name: &str) -> bool {
        self.push(format!("theme {theme_name}"));
        self.pause_decisions
    }

    fn on_accept(&mut self) -> bool {
        self.push("accept".to_string());
        self.pause_decisions
    }

    fn on_numeric_answer(&mut self, deviation: u32) -> bool {
        self.push(format!("numeric dev={deviation}"));
        self.pause_decisions
    }

    fn on_point_answer(&mut self, deviation: f64) -> bool {
        self.push(format!("point dev={deviation}"));
        self.pause_decisions
    }

    fn on_answer_options(
        &mut self,
        options: &[AnswerOption],
        screen_batches: &[Vec<ContentItem>],
    ) -> bool {
        let labels: Vec<&str> = options.iter().map(|option| option.label.as_str()).collect();
        self.push(format!(
            "options {} screens={}",
            labels.join(","),
            screen_batches.len()
        ));
        self.pause_decisions
    }

    fn on_question_content(&mut self, batch: &[ContentItem]) -> bool {
        let values: Vec<&str> = batch.iter().map(|item| item.value.as_str()).collect();
        self.push(format!("content {}", values.join("+")));
        false
    }

    fn on_ask_answer(&mut self, mode: &str, duration_ms: u32) -> bool {
        self.push(format!("ask {mode} {duration_ms}"));
        false
    }

    fn on_answer_start(&mut self) {
        self.push("answer-start".to_string());
    }

    fn on_right_answer_option(&mut self, label: &str) -> bool {
        self.push(format!("right-option {label}"));
        self.pause_decisions
    }

    fn on_right_answer_point(&mut self, answer: &str) -> bool {
        self.push(format!("right-point {answer}"));
        self.pause_decisions
    }

    fn on_simple_right_answer_start(&mut self) {
        self.push("simple-right".to_string());
    }
}

fn engine_with(question: Question, handler: Recorder) -> QuestionEngine {
    QuestionEngine::new(question, Box::new(handler), EngineOptions::default())
}

fn drain(engine: &mut QuestionEngine) -> usize {
    let mut pauses = 0;
    for _ in 0..100 {
        if !engine.play_next() {
            return pauses;
        }
        pauses += 1;
    }
    panic!("engine did not finish within 100 ticks");
}

#[test]
fn preamble_steps_report_in_script_order() {
    let log = Log::default();
    let script = Script::new(vec![
        Step::new(StepType::SetAnswerer)
            .with_parameter(param::MODE, StepParameter::simple("current"))
            .with_parameter(param::SELECT, StepParameter::simple("any")),
        Step::new(StepType::AnnouncePrice).with_parameter(
            param::CONTENT,
            StepParameter::number_set(NumberSet::new(100, 500, 100)),
        ),
        Step::new(StepType::SetPrice)
            .with_parameter(param::MODE, StepParameter::simple(value::MODE_SELECT))
            .with_parameter(
                param::CONTENT,
                StepParameter::number_set(NumberSet::new(-10, 50, 200)),
            ),
        Step::new(StepType::SetTheme)
            .with_parameter(param::THEME, StepParameter::simple("History")),
        Step::new(StepType::Accept),
    ]);
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert_eq!(drain(&mut engine), 5);
    assert_eq!(
        log.borrow().as_slice(),
        [
            "start buttons=false",
            "answerer current select=any stake=-",
            "announce-price 100..500/100",
            // the malformed range reaches the handler normalized
            "set-price select 0..50/0",
            "theme History",
            "accept",
        ]
    );
}

#[test]
fn steps_with_unresolvable_parameters_are_pure_no_ops() {
    let log = Log::default();
    let script = Script::new(vec![
        Step::new(StepType::SetAnswerer),
        Step::new(StepType::SetAnswerer)
            .with_parameter(param::MODE, StepParameter::reference("missing")),
        Step::new(StepType::AnnouncePrice),
        Step::new(StepType::SetPrice),
        Step::new(StepType::SetTheme),
        Step::new(StepType::SetAnswerType),
        Step::new(StepType::ShowContent),
        Step::new(StepType::AskAnswer),
        Step::new(StepType::Unknown),
    ]);
    let len = script.len();
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert_eq!(drain(&mut engine), 0);
    assert_eq!(engine.step_index(), len);
    // only the start notification; no step ever reached the handler
    assert_eq!(log.borrow().as_slice(), ["start buttons=false"]);
}

#[test]
fn step_index_is_monotone_for_every_builtin_type() {
    for type_name in library::known_types() {
        let log = Log::default();
        let question = Question::new()
            .with_type_name(type_name)
            .with_parameter(
                library::refs::QUESTION,
                StepParameter::content(vec![ContentItem::text("Q")]),
            )
            .with_parameter(
                library::refs::PRICE,
                StepParameter::number_set(NumberSet::new(10, 100, 10)),
            )
            .with_parameter(library::refs::THEME, StepParameter::simple("Space"))
            .with_right_answer("A");
        let mut engine = engine_with(question, Recorder::pausing(&log));

        let mut previous = engine.step_index();
        for _ in 0..100 {
            let paused = engine.play_next();
            assert!(
                engine.step_index() >= previous,
                "{type_name}: cursor moved backward"
            );
            previous = engine.step_index();
            if !paused {
                break;
            }
        }
        assert!(!engine.can_play_next(), "{type_name}: did not finish");
    }
}

#[test]
fn numeric_answer_type_parses_deviation() {
    for (raw, expected) in [("5", "numeric dev=5"), ("oops", "numeric dev=0"), ("-3", "numeric dev=0")] {
        let log = Log::default();
        let script = Script::new(vec![
            Step::new(StepType::SetAnswerType)
                .with_parameter(param::TYPE, StepParameter::simple(value::TYPE_NUMERIC))
                .with_parameter(param::DEVIATION, StepParameter::simple(raw)),
        ]);
        let question = Question::new().with_script(script);
        let mut engine = engine_with(question, Recorder::pausing(&log));

        drain(&mut engine);
        assert_eq!(log.borrow().as_slice(), ["start buttons=false", expected]);
    }
}

#[test]
fn point_answer_type_parses_fractional_deviation() {
    let log = Log::default();
    let script = Script::new(vec![
        Step::new(StepType::SetAnswerType)
            .with_parameter(param::TYPE, StepParameter::simple(value::TYPE_POINT))
            .with_parameter(param::DEVIATION, StepParameter::simple("2.5")),
    ]);
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    drain(&mut engine);
    assert_eq!(log.borrow().as_slice(), ["start buttons=false", "point dev=2.5"]);
}

#[test]
fn unsupported_answer_type_is_a_no_op() {
    let log = Log::default();
    let script = Script::new(vec![
        Step::new(StepType::SetAnswerType)
            .with_parameter(param::TYPE, StepParameter::simple("essay")),
    ]);
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert_eq!(drain(&mut engine), 0);
    assert_eq!(log.borrow().as_slice(), ["start buttons=false"]);
}

fn select_step(options: BTreeMap<String, StepParameter>) -> Step {
    Step::new(StepType::SetAnswerType)
        .with_parameter(param::TYPE, StepParameter::simple(value::TYPE_SELECT))
        .with_parameter(param::OPTIONS, StepParameter::group(options))
}

/// Scenario: a select step with fewer than two valid options never reaches
/// the handler.
#[test]
fn select_with_one_valid_option_is_a_no_op() {
    let log = Log::default();
    let options = BTreeMap::from([
        ("A".to_string(), StepParameter::content(vec![ContentItem::text("first")])),
        // resolves to an empty list, so it is not a valid option
        ("B".to_string(), StepParameter::content(vec![])),
        // dangling reference, not a valid option either
        ("C".to_string(), StepParameter::reference("missing")),
    ]);
    let script = Script::new(vec![select_step(options)]);
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert_eq!(drain(&mut engine), 0);
    assert_eq!(engine.step_index(), 1);
    assert_eq!(log.borrow().as_slice(), ["start buttons=false"]);
}

#[test]
fn select_reports_options_and_screen_batches() {
    let log = Log::default();
    let options = BTreeMap::from([
        (
            "A".to_string(),
            StepParameter::content(vec![
                ContentItem::text("first"),
                // extra items beyond the first are ignored
                ContentItem::text("unused"),
            ]),
        ),
        ("B".to_string(), StepParameter::reference("shared")),
    ]);
    let script = Script::new(vec![select_step(options)]);
    let question = Question::new()
        .with_script(script)
        .with_parameter("shared", StepParameter::content(vec![ContentItem::text("second")]))
        .with_parameter(
            "body",
            StepParameter::content(vec![
                ContentItem::text("part one").with_wait_for_finish(false),
                ContentItem::text("part two"),
                ContentItem::text("tune.mp3")
                    .with_placement(ContentPlacement::Background)
                    .with_wait_for_finish(false),
                ContentItem::text("coda").with_wait_for_finish(false),
            ]),
        );
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert_eq!(drain(&mut engine), 1);
    // screen items of the table split at the wait boundary: [part one, part
    // two] and [coda]; the background item is filtered out, and "shared"
    // contributes a third batch
    assert_eq!(
        log.borrow().as_slice(),
        ["start buttons=false", "options A,B screens=3"]
    );
}

#[test]
fn ask_answer_parses_duration_and_always_pauses() {
    for (raw, expected) in [("5000", "ask button 5000"), ("-3", "ask button 0"), ("oops", "ask button 0")] {
        let log = Log::default();
        let script = Script::new(vec![
            Step::new(StepType::AskAnswer)
                .with_parameter(param::MODE, StepParameter::simple(value::MODE_BUTTON))
                .with_parameter(param::TIME, StepParameter::simple(raw)),
        ]);
        let question = Question::new().with_script(script);
        // the recorder's on_ask_answer returns false, yet the step pauses
        let mut engine = engine_with(question, Recorder::new(&log));

        assert!(engine.play_next());
        assert!(!engine.play_next());
        assert_eq!(
            log.borrow().as_slice(),
            ["start buttons=true", expected, "answer-start"]
        );
    }
}

#[test]
fn answer_window_notification_is_deferred_to_the_next_tick() {
    let log = Log::default();
    let script = Script::new(vec![
        Step::new(StepType::AskAnswer)
            .with_parameter(param::MODE, StepParameter::simple(value::MODE_DIRECT)),
        Step::new(StepType::SetTheme)
            .with_parameter(param::THEME, StepParameter::simple("Late theme")),
    ]);
    let question = Question::new().with_script(script);
    let mut engine = engine_with(question, Recorder::pausing(&log));

    assert!(engine.play_next());
    assert_eq!(log.borrow().last().unwrap(), "ask direct 0");

    // the visible phase of the answer window opens first on the next tick
    assert!(engine.play_next());
    assert_eq!(&log.borrow()[2..], ["answer-start", "theme Late theme"]);
}

#[test]
fn special_types_collapse_to_the_default_when_suppressed() {
    let question = || {
        Question::new()
            .with_type_name(library::STAKE)
            .with_parameter(
                library::refs::QUESTION,
                StepParameter::content(vec![ContentItem::text("Q")]),
            )
            .with_right_answer("A")
    };

    // specials enabled: the stake script announces an answerer first
    let log = Log::default();
    let mut engine = engine_with(question(), Recorder::pausing(&log));
    drain(&mut engine);
    assert_eq!(log.borrow()[1], "answerer stake select=- stake=-");

    // specials suppressed: the question plays as a simple one
    let log = Log::default();
    let options = EngineOptions {
        play_specials: false,
        ..EngineOptions::default()
    };
    let mut engine = QuestionEngine::new(question(), Box::new(Recorder::pausing(&log)), options);
    drain(&mut engine);
    assert_eq!(log.borrow()[0], "start buttons=true");
    assert_eq!(log.borrow()[1], "content Q");
}

#[test]
fn default_marker_resolves_to_the_configured_default_type() {
    let log = Log::default();
    let question = Question::new()
        // type name left as the default marker
        .with_parameter(
            library::refs::QUESTION,
            StepParameter::content(vec![ContentItem::text("Q")]),
        )
        .with_right_answer("A");
    let mut engine = engine_with(question, Recorder::new(&log));

    drain(&mut engine);
    assert_eq!(
        log.borrow().as_slice(),
        ["start buttons=true", "content Q", "ask button 0", "answer-start"]
    );
}
