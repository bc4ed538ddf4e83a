use crate::error::{BotBumpError, Result};
use crate::process::{CommandOutput, CommandRunner};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Runs commands as child processes inside the tracked repository checkout
pub struct SystemRunner {
    workdir: PathBuf,
}

impl SystemRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        SystemRunner {
            workdir: workdir.into(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[String]) -> Result<CommandOutput> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BotBumpError::config("empty command"))?;

        debug!(command = command.join(" "), workdir = %self.workdir.display(), "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| BotBumpError::tool(format!("Failed to execute {}: {}", program, e)))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = ?result.code, "finished {}", program);

        Ok(result)
    }
}
