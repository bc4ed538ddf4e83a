use crate::config::{expand_command, CommandsConfig, ManifestConfig};
use crate::domain::VersionTag;
use crate::error::{BotBumpError, Result};
use crate::process::CommandRunner;
use crate::workspace::Workspace;
use tracing::info;

/// Writes the new version into the tracked files and re-normalises the tree
pub struct ChangeApplier<'a> {
    workspace: &'a Workspace,
    runner: &'a dyn CommandRunner,
    marker_file: &'a str,
    manifest: &'a ManifestConfig,
    commands: &'a CommandsConfig,
}

impl<'a> ChangeApplier<'a> {
    pub fn new(
        workspace: &'a Workspace,
        runner: &'a dyn CommandRunner,
        marker_file: &'a str,
        manifest: &'a ManifestConfig,
        commands: &'a CommandsConfig,
    ) -> Self {
        ChangeApplier {
            workspace,
            runner,
            marker_file,
            manifest,
            commands,
        }
    }

    /// Marker file, manifest entry, dependency sync, formatting, in that
    /// order. The first failing step aborts the rest.
    pub fn apply_version(&self, tag: &VersionTag) -> Result<()> {
        info!("Updating {} to {}", self.marker_file, tag);
        self.workspace.write_marker(self.marker_file, tag.as_str())?;

        if self.workspace.update_manifest(self.manifest, tag.as_str())? {
            info!(
                "Updated {} {} version to {}",
                self.manifest.path, self.manifest.dependency_key, tag
            );
        }

        run_tool(self.runner, "dependency sync", &self.commands.sync, tag)?;
        run_tool(self.runner, "format", &self.commands.format, tag)?;

        Ok(())
    }
}

/// Runs a required tool; anything but exit 0 is a [BotBumpError::Tool].
pub(crate) fn run_tool(
    runner: &dyn CommandRunner,
    label: &str,
    command: &[String],
    tag: &VersionTag,
) -> Result<()> {
    if command.is_empty() {
        return Err(BotBumpError::config(format!("{} command is empty", label)));
    }

    let command = expand_command(command, tag.as_str());
    let output = runner.run(&command)?;
    if !output.success() {
        return Err(BotBumpError::tool(format!(
            "{} failed ({}) with exit code {}\nStderr: {}",
            label,
            command.join(" "),
            output
                .code
                .map_or_else(|| "none".to_string(), |c| c.to_string()),
            output.stderr.trim_end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockRunner;
    use std::fs;
    use tempfile::TempDir;

    fn commands() -> CommandsConfig {
        CommandsConfig {
            sync: vec!["dink".to_string()],
            format: vec!["fmt".to_string(), "--all".to_string()],
            test: vec!["test".to_string()],
        }
    }

    #[test]
    fn test_apply_version_runs_every_step_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("modules.json"),
            r#"{"https://deno.land/std": {"version": "@v0.9.0"}}"#,
        )
        .unwrap();
        let ws = Workspace::new(dir.path());
        let runner = MockRunner::new();
        let manifest = ManifestConfig::default();
        let commands = commands();

        ChangeApplier::new(&ws, &runner, ".denov", &manifest, &commands)
            .apply_version(&VersionTag::new("v1.0.1"))
            .unwrap();

        assert_eq!(ws.read_marker(".denov").unwrap(), "v1.0.1");
        let manifest_text = fs::read_to_string(dir.path().join("modules.json")).unwrap();
        assert!(manifest_text.contains("@v1.0.1"));
        assert_eq!(runner.commands(), vec![vec!["dink"], vec!["fmt", "--all"]]);
    }

    #[test]
    fn test_sync_failure_stops_before_format() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        let runner = MockRunner::new().with_exit("dink", 2);
        let manifest = ManifestConfig::default();
        let commands = commands();

        let err = ChangeApplier::new(&ws, &runner, ".denov", &manifest, &commands)
            .apply_version(&VersionTag::new("v1.0.1"))
            .unwrap_err();

        assert!(matches!(err, BotBumpError::Tool(_)));
        assert!(err.to_string().contains("exit code 2"));
        assert_eq!(runner.commands(), vec![vec!["dink"]]);
    }

    #[test]
    fn test_format_failure_is_tool_error() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        let runner = MockRunner::new().with_exit("fmt", 1);
        let manifest = ManifestConfig::default();
        let commands = commands();

        let result = ChangeApplier::new(&ws, &runner, ".denov", &manifest, &commands)
            .apply_version(&VersionTag::new("v1.0.1"));
        assert!(matches!(result, Err(BotBumpError::Tool(_))));
    }

    #[test]
    fn test_empty_command_is_config_error() {
        let runner = MockRunner::new();
        let result = run_tool(&runner, "format", &[], &VersionTag::new("v1.0.1"));
        assert!(matches!(result, Err(BotBumpError::Config(_))));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_version_placeholder_is_expanded() {
        let runner = MockRunner::new();
        let command = vec!["install".to_string(), "{version}".to_string()];
        run_tool(&runner, "install", &command, &VersionTag::new("v1.0.1")).unwrap();
        assert_eq!(runner.commands(), vec![vec!["install", "v1.0.1"]]);
    }
}
