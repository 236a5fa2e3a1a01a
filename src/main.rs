//! CLI entry point for quizplay
//!
//! Plays a single question document in the terminal, or a built-in demo
//! question when no file is given.

use std::fs;
use std::path::PathBuf;
use std::process;

use quizplay::options::{EngineOptions, FalseStartMode};
use quizplay::types::{ContentItem, Question, StepParameter};
use quizplay::{cli, library, storage};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            if args.len() < 3 {
                eprintln!("Error: Missing question file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let file_path = PathBuf::from(&args[2]);
            let no_false_starts = args.get(3).map(|s| s == "--no-false-starts").unwrap_or(false);
            run_play(Some(file_path), no_false_starts);
        }
        "demo" => {
            let no_false_starts = args.get(2).map(|s| s == "--no-false-starts").unwrap_or(false);
            run_play(None, no_false_starts);
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("quizplay - Quiz Question Playback Engine");
    println!();
    println!("USAGE:");
    println!("    cargo run -- <command> [options]");
    println!();
    println!("COMMANDS:");
    println!("    play <file> [--no-false-starts]    Play a question document (JSON)");
    println!("    demo [--no-false-starts]           Play the built-in demo question");
    println!("    --help, -h                         Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --no-false-starts    Enable the button as soon as content allows it");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- demo");
    println!("    cargo run -- play questions/example.json --no-false-starts");
}

fn run_play(file_path: Option<PathBuf>, no_false_starts: bool) {
    let question = match file_path {
        Some(path) => {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    eprintln!("Error: Failed to read file '{}'", path.display());
                    eprintln!("Reason: {}", err);
                    process::exit(1);
                }
            };
            match storage::load(&bytes) {
                Ok(question) => question,
                Err(err) => {
                    eprintln!("Error: Failed to load question '{}'", path.display());
                    eprintln!("Reason: {}", err);
                    process::exit(1);
                }
            }
        }
        None => demo_question(),
    };

    let options = EngineOptions {
        false_starts: if no_false_starts {
            FalseStartMode::Disabled
        } else {
            FalseStartMode::Enabled
        },
        show_simple_right_answers: true,
        ..EngineOptions::default()
    };

    if let Err(err) = cli::play::run_play(question, options) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}

fn demo_question() -> Question {
    Question::new()
        .with_type_name(library::SIMPLE)
        .with_parameter(
            library::refs::QUESTION,
            StepParameter::content(vec![
                ContentItem::text("Science fiction.").with_wait_for_finish(false),
                ContentItem::text("This planet is the only one in the Solar system not named after a deity."),
            ]),
        )
        .with_parameter(library::refs::TIME, StepParameter::simple("30000"))
        .with_right_answer("Earth")
}
