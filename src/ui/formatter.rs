//! Pure formatting functions for terminal output.
//!
//! Progress is logged through `tracing`; these helpers print the lines a
//! person running the bot by hand is meant to read.

use crate::domain::PublicationOutcome;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the run summary: a checkmark when something was published, an
/// arrow when the run was skipped.
pub fn display_outcome(outcome: &PublicationOutcome) {
    let line = outcome.to_string();
    match outcome {
        PublicationOutcome::DirectRelease(_) | PublicationOutcome::PullRequestOpened(_) => {
            display_success(&line)
        }
        PublicationOutcome::SkippedNoUpdate | PublicationOutcome::SkippedDuplicate => {
            display_status(&line)
        }
    }
}
