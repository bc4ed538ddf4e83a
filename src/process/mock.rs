use crate::error::{BotBumpError, Result};
use crate::process::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::collections::HashMap;

/// Scripted command runner: every command exits 0 unless told otherwise.
pub struct MockRunner {
    exit_codes: HashMap<String, i32>,
    commands: RefCell<Vec<Vec<String>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner {
            exit_codes: HashMap::new(),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Exit with `code` whenever the program (first element) is `program`
    pub fn with_exit(mut self, program: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(program.into(), code);
        self
    }

    /// Commands run so far, in order
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.borrow().clone()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &[String]) -> Result<CommandOutput> {
        let program = command
            .first()
            .ok_or_else(|| BotBumpError::config("empty command"))?;
        self.commands.borrow_mut().push(command.to_vec());

        let code = self.exit_codes.get(program).copied().unwrap_or(0);
        Ok(CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: if code == 0 {
                String::new()
            } else {
                format!("{} exited with {}", program, code)
            },
        })
    }
}
