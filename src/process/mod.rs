//! External tool execution
//!
//! Sync, formatting, test and install commands go through [CommandRunner] so
//! that the pipeline can be driven by [MockRunner] in tests.

pub mod executor;
pub mod mock;

pub use executor::SystemRunner;
pub use mock::MockRunner;

use crate::error::Result;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a command line and blocks until it exits
pub trait CommandRunner {
    /// `command[0]` is the program, the rest its arguments.
    ///
    /// A non-zero exit is returned as a normal [CommandOutput]; only failing
    /// to start the process is an error.
    fn run(&self, command: &[String]) -> Result<CommandOutput>;
}
