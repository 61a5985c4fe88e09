use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

/// Writes `source` to a temp `.rocks` file and runs the `rocks` binary
/// against it, returning the finished assertion so callers can check
/// stdout/stderr/exit code with `assert_cmd`'s fluent API.
pub fn run(source: &str) -> assert_cmd::assert::Assert {
    let mut file = NamedTempFile::with_suffix(".rocks").expect("failed to create temp script");
    file.write_all(source.as_bytes()).expect("failed to write temp script");

    Command::cargo_bin("rocks")
        .expect("rocks binary should build")
        .arg(file.path())
        .assert()
}

/// Asserts the program exits successfully and writes exactly `expected`
/// (newline-joined, trailing newline added) to stdout.
pub fn assert_stdout(source: &str, expected: &[&str]) {
    let mut joined = expected.join("\n");
    if !expected.is_empty() {
        joined.push('\n');
    }

    run(source).success().stdout(joined);
}

/// Asserts the program fails and stderr contains `needle` somewhere (exact
/// line numbers in fixtures are brittle to maintain by hand, so this checks
/// the message text rather than the full `[line N]` prefix).
pub fn assert_stderr_contains(source: &str, needle: &str) {
    run(source).failure().stderr(contains(needle));
}

/// Like [`assert_stderr_contains`] but also pins the exit code, distinguishing
/// a static error (65) from a runtime error (70).
pub fn assert_fails_with(source: &str, code: i32, needle: &str) {
    run(source).failure().code(code).stderr(contains(needle));
}
