use std::io::{self};
use std::{env, fs, process};

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};

use rocks_lang::error::Diagnostics;
use rocks_lang::Rocks;

const HISTORY_FILE: &str = ".rocks_history";

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: rocks [script]");
            process::exit(64);
        }
        2 => run_file(&args[1]),
        _ => run_prompt(),
    }
}

/// Reads `path`, runs it once, and exits with a code reflecting how far it
/// got: `0` on success, `65` if scanning/parsing/resolving produced any
/// error, `70` if the evaluator aborted on a runtime error (checked second,
/// so a program that never reached the evaluator can't be reported as a
/// runtime failure).
fn run_file(path: &str) {
    let contents = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Cannot read file {path}: {err}");
        process::exit(64);
    });

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut rocks = Rocks::new(&mut stdout);
    let mut diagnostics = Diagnostics::new(&mut stderr);

    let outcome = rocks.run(&contents, &mut diagnostics);

    if outcome.had_error() {
        process::exit(65);
    }
    if outcome.had_runtime_error {
        process::exit(70);
    }
}

/// Interactive prompt: prints `> `, reads a line via `rustyline` (so history
/// and basic line editing work), runs it through [`Rocks::run_line`], and
/// loops until `exit` or EOF. Diagnostic flags are per-call, so there is
/// nothing to reset between lines the way the book's global flags needed.
fn run_prompt() {
    let mut stdout = io::stdout();
    let mut rocks = Rocks::new(&mut stdout);

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to start line editor: {err}");
            process::exit(70);
        }
    };

    let history_path = history_file_path();
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line == "exit" {
                    break;
                }

                let _ = editor.add_history_entry(line.as_str());

                let mut stderr = io::stderr();
                let mut diagnostics = Diagnostics::new(&mut stderr);
                rocks.run_line(&line, &mut diagnostics);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    let _ = save_history(&mut editor, &history_path);
}

fn save_history(editor: &mut DefaultEditor, path: &std::path::Path) -> RustylineResult<()> {
    editor.save_history(path)
}

fn history_file_path() -> std::path::PathBuf {
    match home::home_dir() {
        Some(dir) => dir.join(HISTORY_FILE),
        None => std::path::PathBuf::from(HISTORY_FILE),
    }
}
