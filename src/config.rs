use crate::error::{BotBumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder substituted with the target upstream version in command arrays
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Represents the complete configuration for botbump.
///
/// Every section has defaults tuned for tracking the Deno runtime, so an empty
/// file (or no file at all) yields a working configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub component: ComponentConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_component_name() -> String {
    "deno".to_string()
}

fn default_release_feed() -> String {
    "https://api.github.com/repos/denoland/deno/releases".to_string()
}

fn default_marker_file() -> String {
    ".denov".to_string()
}

fn default_install_command() -> Vec<String> {
    strings(&[
        "sh",
        "-c",
        "curl -fsSL https://deno.land/x/install/install.sh | sh -s {version}",
    ])
}

/// The upstream component being tracked.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComponentConfig {
    /// Short name used in the bump branch and commit message
    #[serde(default = "default_component_name")]
    pub name: String,

    /// Release list whose first entry is the newest upstream version
    #[serde(default = "default_release_feed")]
    pub release_feed: String,

    /// File holding the last applied upstream version
    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    /// Installs the new runtime before the test gate; empty to skip
    #[serde(default = "default_install_command")]
    pub install: Vec<String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        ComponentConfig {
            name: default_component_name(),
            release_feed: default_release_feed(),
            marker_file: default_marker_file(),
            install: default_install_command(),
        }
    }
}

fn default_manifest_path() -> String {
    "modules.json".to_string()
}

fn default_dependency_key() -> String {
    "https://deno.land/std".to_string()
}

fn default_version_field() -> String {
    "version".to_string()
}

fn default_version_prefix() -> String {
    "@".to_string()
}

/// The JSON dependency manifest entry pinned to the upstream version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,

    #[serde(default = "default_dependency_key")]
    pub dependency_key: String,

    #[serde(default = "default_version_field")]
    pub version_field: String,

    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
            dependency_key: default_dependency_key(),
            version_field: default_version_field(),
            version_prefix: default_version_prefix(),
        }
    }
}

fn default_sync_command() -> Vec<String> {
    strings(&[
        "deno",
        "run",
        "-A",
        "https://denopkg.com/keroxp/dink@v0.6.2/main.ts",
    ])
}

fn default_format_command() -> Vec<String> {
    strings(&["deno", "fmt"])
}

fn default_test_command() -> Vec<String> {
    strings(&["deno", "test", "-A"])
}

/// External tools run against the working tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_sync_command")]
    pub sync: Vec<String>,

    #[serde(default = "default_format_command")]
    pub format: Vec<String>,

    #[serde(default = "default_test_command")]
    pub test: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            sync: default_sync_command(),
            format: default_format_command(),
            test: default_test_command(),
        }
    }
}

fn default_mainline_branch() -> String {
    "master".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_git_host() -> String {
    "github.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bot_name() -> String {
    "Github Actions".to_string()
}

fn default_bot_email() -> String {
    "actions@github.com".to_string()
}

/// Where and how the bump is published.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_mainline_branch")]
    pub mainline_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_git_host")]
    pub git_host: String,

    /// When false every bump goes through a pull request without running tests
    #[serde(default = "default_true")]
    pub gate_on_tests: bool,

    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    #[serde(default = "default_bot_email")]
    pub bot_email: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            mainline_branch: default_mainline_branch(),
            remote: default_remote(),
            api_base_url: default_api_base_url(),
            git_host: default_git_host(),
            gate_on_tests: true,
            bot_name: default_bot_name(),
            bot_email: default_bot_email(),
        }
    }
}

/// Where the target repository and access token come from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    #[default]
    Args,
    Env,
}

fn default_repository_env() -> String {
    "GITHUB_REPOSITORY".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub source: CredentialSource,

    #[serde(default = "default_repository_env")]
    pub repository_env: String,

    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        CredentialsConfig {
            source: CredentialSource::default(),
            repository_env: default_repository_env(),
            token_env: default_token_env(),
        }
    }
}

/// Replaces every `{version}` in a command array.
pub fn expand_command(command: &[String], version: &str) -> Vec<String> {
    command
        .iter()
        .map(|arg| arg.replace(VERSION_PLACEHOLDER, version))
        .collect()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `botbump.toml` in current directory
/// 3. `.botbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read(Path::new(path))?
    } else if Path::new("./botbump.toml").exists() {
        read(Path::new("./botbump.toml"))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".botbump.toml");
        if config_path.exists() {
            read(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| BotBumpError::config(e.to_string()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| BotBumpError::config(format!("cannot read {}: {}", path.display(), e)))
}
