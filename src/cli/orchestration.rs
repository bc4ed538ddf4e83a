//! Wiring between the command line and the pipeline
//!
//! Builds the real collaborators (libgit2 repository, GitHub client,
//! subprocess runner, working tree) so the bump workflow can be called
//! programmatically without depending on clap.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{PublicationOutcome, RunTarget};
use crate::error::Result;
use crate::git::Git2Repository;
use crate::pipeline::Pipeline;
use crate::process::SystemRunner;
use crate::upstream::GitHubClient;
use crate::workspace::Workspace;

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// `owner/repo`, used when credentials come from arguments
    pub repository: Option<String>,

    /// Access token, used when credentials come from arguments
    pub token: Option<String>,

    /// Checkout of the tracked repository
    pub workdir: PathBuf,
}

/// Resolve the run target, open the checkout and run one bump.
///
/// The target is resolved before anything touches the network or the
/// repository, so missing credentials fail fast.
pub fn run_bump_workflow(args: &BumpWorkflowArgs, config: &Config) -> Result<PublicationOutcome> {
    let target = RunTarget::resolve(
        &config.credentials,
        args.repository.as_deref(),
        args.token.as_deref(),
        |key| std::env::var(key).ok(),
    )?;

    let repo = Git2Repository::open(&args.workdir)?;
    let host = GitHubClient::new(&config.publish.api_base_url, target.credential.clone())?;
    let runner = SystemRunner::new(&args.workdir);
    let workspace = Workspace::new(&args.workdir);

    Pipeline::new(config, &repo, &host, &runner, &workspace).run(target)
}
