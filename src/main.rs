use std::{env::args_os, fs, path::Path, process::ExitCode};

use lesebuch::parser::Parser;
use lesebuch::report::Reporter;
use lesebuch::scanner::{scan, ScannerConfig};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() -> ExitCode {
    if args_os().len() > 2 {
        eprintln!("usage: lesebuch [script]");
        return ExitCode::from(64);
    }

    if let Some(arg) = args_os().nth(1) {
        run_file(Path::new(&arg))
    } else {
        run_prompt()
    }
}

fn run_file(path: &Path) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error reading {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = Reporter::new();
    let tokens = scan(&content, &ScannerConfig::default(), &mut reporter);
    for token in &tokens {
        println!("{token}");
    }

    let mut parser = Parser::new(&tokens, &mut reporter);
    if let Ok(expr) = parser.parse() {
        println!("{expr:?}");
    }

    // Errors anywhere in the file fail the run.
    if reporter.had_error() {
        ExitCode::from(65)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_prompt() -> ExitCode {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = Reporter::new();
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                // Errors on one line must not suppress reporting on the next.
                reporter.reset();
                for token in scan(&line, &ScannerConfig::default(), &mut reporter) {
                    println!("{token}");
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
}
