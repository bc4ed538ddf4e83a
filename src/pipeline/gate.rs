use crate::config::expand_command;
use crate::domain::{Verdict, VersionTag};
use crate::error::{BotBumpError, Result};
use crate::pipeline::applier::run_tool;
use crate::process::CommandRunner;
use tracing::{debug, info, warn};

/// Runs the project's tests against the new version
pub struct GateRunner<'a> {
    runner: &'a dyn CommandRunner,
    install: &'a [String],
    test: &'a [String],
}

impl<'a> GateRunner<'a> {
    pub fn new(runner: &'a dyn CommandRunner, install: &'a [String], test: &'a [String]) -> Self {
        GateRunner {
            runner,
            install,
            test,
        }
    }

    /// Install the upstream runtime the tests should run on. Skipped when no
    /// install command is configured.
    pub fn provision(&self, tag: &VersionTag) -> Result<()> {
        if self.install.is_empty() {
            debug!("no install command configured");
            return Ok(());
        }
        info!("Installing {}...", tag);
        run_tool(self.runner, "install", self.install, tag)?;
        info!("Installed {}", tag);
        Ok(())
    }

    /// Runs the tests with `{version}` expanded to `tag`.
    ///
    /// A test failure, or a test command that cannot be started, is an
    /// [Verdict::Incompatible] verdict. Only a missing test command is an error.
    pub fn run_tests(&self, tag: &VersionTag) -> Result<Verdict> {
        if self.test.is_empty() {
            return Err(BotBumpError::config("test command is empty"));
        }

        info!("Running tests to check compatibility with {}", tag);
        let command = expand_command(self.test, tag.as_str());
        let success = match self.runner.run(&command) {
            Ok(output) if output.success() => true,
            Ok(output) => {
                warn!(code = ?output.code, "tests failed");
                debug!("test stderr:\n{}", output.stderr);
                false
            }
            Err(e) => {
                warn!("could not run tests: {}", e);
                false
            }
        };
        Ok(Verdict::from_success(success))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockRunner, SystemRunner};

    fn cmd(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn tag() -> VersionTag {
        VersionTag::new("v1.0.1")
    }

    #[test]
    fn test_zero_exit_is_compatible() {
        let runner = MockRunner::new();
        let test = cmd(&["deno", "test"]);
        let gate = GateRunner::new(&runner, &[], &test);
        assert_eq!(gate.run_tests(&tag()).unwrap(), Verdict::Compatible);
    }

    #[test]
    fn test_non_zero_exit_is_incompatible() {
        let runner = MockRunner::new().with_exit("deno", 1);
        let test = cmd(&["deno", "test"]);
        let gate = GateRunner::new(&runner, &[], &test);
        assert_eq!(gate.run_tests(&tag()).unwrap(), Verdict::Incompatible);
    }

    #[cfg(unix)]
    #[test]
    fn test_unrunnable_test_command_is_incompatible() {
        let runner = SystemRunner::new(".");
        let test = cmd(&["/nonexistent/path/to/deno", "test"]);
        let gate = GateRunner::new(&runner, &[], &test);
        assert_eq!(gate.run_tests(&tag()).unwrap(), Verdict::Incompatible);
    }

    #[test]
    fn test_empty_test_command_is_config_error() {
        let runner = MockRunner::new();
        let gate = GateRunner::new(&runner, &[], &[]);

        let result = gate.run_tests(&tag());
        assert!(matches!(result, Err(BotBumpError::Config(_))));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_test_command_expands_version() {
        let runner = MockRunner::new();
        let test = cmd(&["deno", "test", "--runtime", "{version}"]);
        let gate = GateRunner::new(&runner, &[], &test);

        gate.run_tests(&tag()).unwrap();
        assert_eq!(
            runner.commands(),
            vec![vec!["deno", "test", "--runtime", "v1.0.1"]]
        );
    }

    #[test]
    fn test_provision_expands_version() {
        let runner = MockRunner::new();
        let install = cmd(&["sh", "install.sh", "{version}"]);
        let gate = GateRunner::new(&runner, &install, &[]);

        gate.provision(&VersionTag::new("v1.0.1")).unwrap();
        assert_eq!(runner.commands(), vec![vec!["sh", "install.sh", "v1.0.1"]]);
    }

    #[test]
    fn test_provision_without_command_is_skipped() {
        let runner = MockRunner::new();
        let gate = GateRunner::new(&runner, &[], &[]);

        gate.provision(&VersionTag::new("v1.0.1")).unwrap();
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_provision_failure_is_tool_error() {
        let runner = MockRunner::new().with_exit("sh", 127);
        let install = cmd(&["sh", "install.sh"]);
        let gate = GateRunner::new(&runner, &install, &[]);

        let result = gate.provision(&VersionTag::new("v1.0.1"));
        assert!(matches!(result, Err(BotBumpError::Tool(_))));
    }
}
