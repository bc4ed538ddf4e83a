//! Version-bump pipeline
//!
//! VersionSource → DuplicateWorkGuard → ChangeApplier → GateRunner → publish.
//! Every stage can end the run early; nothing is mutated before the guard has
//! confirmed that no bump for the same version is already on the remote.

pub mod applier;
pub mod gate;
pub mod guard;
pub mod publish;
pub mod version_source;

pub use applier::ChangeApplier;
pub use gate::GateRunner;
pub use guard::DuplicateWorkGuard;
pub use publish::Publisher;
pub use version_source::VersionSource;

use crate::config::Config;
use crate::domain::{BumpBranch, PublicationOutcome, RunContext, RunTarget, Verdict};
use crate::error::Result;
use crate::git::Repository;
use crate::process::CommandRunner;
use crate::upstream::ReleaseHost;
use crate::workspace::Workspace;
use tracing::info;

/// States of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Start,
    Gated(Verdict),
    DirectPublish,
    ReviewPublish,
    Done(PublicationOutcome),
}

/// Drives one run against injected collaborators
pub struct Pipeline<'a> {
    config: &'a Config,
    repo: &'a dyn Repository,
    host: &'a dyn ReleaseHost,
    runner: &'a dyn CommandRunner,
    workspace: &'a Workspace,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        repo: &'a dyn Repository,
        host: &'a dyn ReleaseHost,
        runner: &'a dyn CommandRunner,
        workspace: &'a Workspace,
    ) -> Self {
        Pipeline {
            config,
            repo,
            host,
            runner,
            workspace,
        }
    }

    /// Resolve versions for `target` and run the bump to completion.
    pub fn run(&self, target: RunTarget) -> Result<PublicationOutcome> {
        let source = VersionSource::new(
            self.workspace,
            self.host,
            &self.config.component.marker_file,
            &self.config.component.release_feed,
        );
        let ctx = RunContext {
            current_version: source.current_version()?,
            latest_version: source.latest_version()?,
            slug: target.slug,
            credential: target.credential,
        };
        let branch = BumpBranch::new(&self.config.component.name, ctx.latest_version.clone());

        let mut stage = Stage::Start;
        loop {
            stage = match stage {
                Stage::Start => self.prepare(&ctx, &branch)?,
                Stage::Gated(Verdict::Compatible) => {
                    info!("Test passed. Commit changes and publish new release");
                    Stage::DirectPublish
                }
                Stage::Gated(Verdict::Incompatible) => {
                    info!("Test failed. Check out to head branch and create new pull request");
                    Stage::ReviewPublish
                }
                Stage::DirectPublish => Stage::Done(self.publish_direct(&ctx, &branch)?),
                Stage::ReviewPublish => Stage::Done(self.publish_review(&ctx, &branch)?),
                Stage::Done(outcome) => {
                    info!("Workflow completed: {}", outcome);
                    return Ok(outcome);
                }
            };
        }
    }

    fn prepare(&self, ctx: &RunContext, branch: &BumpBranch) -> Result<Stage> {
        if !ctx.needs_update() {
            info!(
                "You are using latest {}: {}",
                self.config.component.name, ctx.latest_version
            );
            return Ok(Stage::Done(PublicationOutcome::SkippedNoUpdate));
        }
        info!(
            "Needs update: current={}, latest={}",
            ctx.current_version, ctx.latest_version
        );

        let guard = DuplicateWorkGuard::new(self.repo, &self.config.publish.remote);
        if guard.has_in_flight_work(branch)? {
            return Ok(Stage::Done(PublicationOutcome::SkippedDuplicate));
        }

        let gate = GateRunner::new(
            self.runner,
            &self.config.component.install,
            &self.config.commands.test,
        );
        gate.provision(&ctx.latest_version)?;

        ChangeApplier::new(
            self.workspace,
            self.runner,
            &self.config.component.marker_file,
            &self.config.manifest,
            &self.config.commands,
        )
        .apply_version(&ctx.latest_version)?;

        if !self.config.publish.gate_on_tests {
            info!("Test gate disabled, routing bump through review");
            return Ok(Stage::ReviewPublish);
        }
        Ok(Stage::Gated(gate.run_tests(&ctx.latest_version)?))
    }

    fn publisher(&self) -> Publisher<'_> {
        Publisher::new(self.repo, self.host, &self.config.publish)
    }

    fn publish_direct(&self, ctx: &RunContext, branch: &BumpBranch) -> Result<PublicationOutcome> {
        let publisher = self.publisher();
        let message = branch.commit_message();

        publisher.commit_and_push(ctx, &self.config.publish.mainline_branch, &message, false)?;
        let tag = publisher.create_release(ctx, &message)?;

        Ok(PublicationOutcome::DirectRelease(tag))
    }

    fn publish_review(&self, ctx: &RunContext, branch: &BumpBranch) -> Result<PublicationOutcome> {
        let publisher = self.publisher();
        let message = branch.commit_message();
        let name = branch.name();

        publisher.commit_and_push(ctx, &name, &message, true)?;
        publisher.open_pull_request(ctx, &name, &message)?;

        Ok(PublicationOutcome::PullRequestOpened(name))
    }
}
