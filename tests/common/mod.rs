use rocks_lang::error::Diagnostics;
use rocks_lang::{Rocks, RunOutcome};

/// Runs one Lox program through the full pipeline with in-memory sinks for
/// both `print` output and diagnostics, and hands back all three so a test
/// can assert on whichever it cares about.
pub fn run(source: &str) -> (RunOutcome, String, String) {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();

    let outcome = {
        let mut rocks = Rocks::new(&mut stdout);
        let mut diagnostics = Diagnostics::new(&mut stderr);
        rocks.run(source, &mut diagnostics)
    };

    (outcome, String::from_utf8(stdout).unwrap(), String::from_utf8(stderr).unwrap())
}

/// Declares one test that runs a Lox snippet and checks either its printed
/// output (`stdout = "..."`) or its diagnostic text (`stderr = "..."`), one
/// macro invocation per case, named after the behavior under test, with the
/// Lox source inline rather than read from a fixture file since `Rocks` runs
/// directly against in-memory sinks instead of a path on disk.
#[macro_export]
macro_rules! lox_test {
    ($name:ident, $source:expr, stdout = $expected:expr) => {
        #[test]
        fn $name() {
            let (outcome, stdout, stderr) = common::run($source);
            assert!(!outcome.had_error(), "expected no static error, got: {stderr}");
            assert!(!outcome.had_runtime_error, "expected no runtime error, got: {stderr}");
            assert_eq!(stdout, $expected);
        }
    };
    ($name:ident, $source:expr, stderr = $expected:expr) => {
        #[test]
        fn $name() {
            let (_outcome, _stdout, stderr) = common::run($source);
            assert_eq!(stderr, $expected);
        }
    };
}
