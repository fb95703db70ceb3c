//! Unit tests for runtime error types.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::error::ErrorKind;
use rstest::rstest;

use super::*;

#[test]
fn input_errors_name_the_path() {
    let error = InputError::Read {
        path: PathBuf::from("/tmp/config.json"),
        source: Arc::new(io::Error::new(io::ErrorKind::NotFound, "missing")),
    };
    let message = error.to_string();
    assert!(
        message.contains("/tmp/config.json"),
        "expected path in message: {message}"
    );
    assert!(message.contains("missing"), "expected cause: {message}");
}

#[test]
fn structural_error_names_the_verb() {
    let error = RunError::Structural {
        verb: Verb::Discover,
        source: "upstream unavailable".into(),
    };
    assert_eq!(error.to_string(), "discover failed: upstream unavailable");
}

#[rstest]
#[case::structural(RunError::Structural { verb: Verb::Read, source: "boom".into() }, EXIT_FAILURE)]
#[case::write(
    RunError::Write(WriteError::Io(Arc::new(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))),
    EXIT_FAILURE
)]
#[case::usage(
    RunError::Usage(clap::Error::new(ErrorKind::MissingRequiredArgument)),
    EXIT_USAGE
)]
#[case::help(RunError::Usage(clap::Error::new(ErrorKind::DisplayHelp)), 0)]
fn exit_status_distinguishes_failure_classes(#[case] error: RunError, #[case] expected: u8) {
    assert_eq!(error.exit_status(), expected);
}
