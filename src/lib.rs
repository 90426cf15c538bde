#![allow(clippy::needless_return)]

//! `rocks` is a tree-walking interpreter for Lox, a small dynamically-typed
//! object-oriented scripting language: classes with single inheritance,
//! first-class functions with lexical closures, numbers/strings/booleans/nil.
//!
//! The pipeline runs leaves first:
//!
//! ## Scanning
//! The [`scanner`] module turns source text into a [`Token`](token::Token)
//! stream. It is a simple three-index state machine (lexeme start, current
//! position, line) that keeps scanning past lexical errors — an unterminated
//! string or an unexpected character — so a single run can surface more than
//! one scan error at once.
//!
//! ## Parsing
//! The [`parser`] module is a hand-written recursive-descent predictive
//! parser that turns the token stream into a list of [`Stmt`](stmt::Stmt)
//! trees built out of [`Expr`](expr::Expr) nodes. A parse error resynchronizes
//! at the next statement boundary instead of aborting, for the same reason.
//!
//! ## Resolving
//! The [`resolver`] module performs a single static pass over the AST before
//! evaluation, recording how many enclosing scopes separate every variable
//! reference from its binding (its *scope distance*), and rejecting a
//! handful of errors that are easier to catch statically: duplicate locals,
//! `return`/`this`/`super` misuse, a class inheriting from itself.
//!
//! ## Interpreting
//! The [`interpreter`] module walks the AST, consulting the resolver's
//! side-table for local lookups, threading a chain of
//! [`Environment`](environment::Environment)s for lexical scoping, and
//! building [`Value`](object::Value)s out of the [`function`] and [`class`]
//! object model. A runtime error aborts the statement currently running.
//!
//! [`Rocks`] wires these four stages together behind a small facade so that
//! global state (top-level variables, function and class declarations)
//! persists across repeated calls, as a REPL needs.

use std::collections::HashMap;
use std::io::Write;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Which diagnostic flags, if any, a call to [`Rocks::run`] or
/// [`Rocks::run_line`] set. Mirrors the book's global `hadError`/
/// `hadRuntimeError` flags as an owned value instead of process-wide mutable
/// state, so a `Rocks` instance can be driven from a REPL loop without
/// resetting anything between lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// A scan or parse error occurred.
    pub had_syntax_error: bool,
    /// A resolver error occurred.
    pub had_static_error: bool,
    /// The evaluator aborted on a runtime error.
    pub had_runtime_error: bool,
}

impl RunOutcome {
    /// Whether any static error (syntax or resolver) occurred, meaning the
    /// program was never handed to the evaluator at all.
    pub fn had_error(&self) -> bool {
        self.had_syntax_error || self.had_static_error
    }
}

/// Facade over the scan/parse/resolve/interpret pipeline. Owns the single
/// [`Interpreter`] (and therefore the global environment) that every `run`
/// call shares, so variable and function declarations made in one call are
/// visible to the next — the property an interactive session depends on.
pub struct Rocks<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> Rocks<'a> {
    /// `output` receives every `print` statement's text for the lifetime of
    /// this `Rocks` instance.
    pub fn new(output: &'a mut dyn Write) -> Self {
        Rocks { interpreter: Interpreter::new(output) }
    }

    /// Runs a complete program: scan, parse, resolve, and — absent any
    /// static error — interpret. Diagnostics are written to `diagnostics`'s
    /// sink as they're produced.
    pub fn run(&mut self, source: &str, diagnostics: &mut Diagnostics) -> RunOutcome {
        self.run_source(source, diagnostics)
    }

    /// Runs a single line of REPL input. Identical to [`Rocks::run`]; the
    /// separate name lets an embedding CLI apply distinct exit-code policy
    /// to file vs. interactive mode without the library reaching into
    /// process state.
    pub fn run_line(&mut self, source: &str, diagnostics: &mut Diagnostics) -> RunOutcome {
        self.run_source(source, diagnostics)
    }

    fn run_source(&mut self, source: &str, diagnostics: &mut Diagnostics) -> RunOutcome {
        let scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(diagnostics);

        if diagnostics.had_error() {
            return RunOutcome {
                had_syntax_error: diagnostics.had_syntax_error,
                had_static_error: diagnostics.had_static_error,
                had_runtime_error: false,
            };
        }

        let parser = Parser::new(tokens);
        let statements = parser.parse(diagnostics);

        if diagnostics.had_error() {
            return RunOutcome {
                had_syntax_error: diagnostics.had_syntax_error,
                had_static_error: diagnostics.had_static_error,
                had_runtime_error: false,
            };
        }

        let resolver = Resolver::new();
        let locals: HashMap<_, _> = resolver.resolve(&statements, diagnostics);

        if diagnostics.had_error() {
            return RunOutcome {
                had_syntax_error: diagnostics.had_syntax_error,
                had_static_error: diagnostics.had_static_error,
                had_runtime_error: false,
            };
        }

        self.interpreter.interpret(&statements, locals, diagnostics);

        RunOutcome {
            had_syntax_error: diagnostics.had_syntax_error,
            had_static_error: diagnostics.had_static_error,
            had_runtime_error: diagnostics.had_runtime_error,
        }
    }
}
