use crate::config::PublishConfig;
use crate::domain::{RunContext, VersionTag};
use crate::error::{BotBumpError, Result};
use crate::git::Repository;
use crate::upstream::{NewPullRequest, NewRelease, ReleaseHost};
use tracing::info;

/// Commit/push mechanics and remote objects shared by both publish paths
pub struct Publisher<'a> {
    repo: &'a dyn Repository,
    host: &'a dyn ReleaseHost,
    settings: &'a PublishConfig,
}

impl<'a> Publisher<'a> {
    pub fn new(
        repo: &'a dyn Repository,
        host: &'a dyn ReleaseHost,
        settings: &'a PublishConfig,
    ) -> Self {
        Publisher {
            repo,
            host,
            settings,
        }
    }

    /// Commit every working-tree change as the bot and push `branch`.
    ///
    /// With `create_branch` the branch is created at HEAD first; otherwise
    /// `branch` must already be checked out, so the pushed ref carries the commit.
    pub fn commit_and_push(
        &self,
        ctx: &RunContext,
        branch: &str,
        message: &str,
        create_branch: bool,
    ) -> Result<()> {
        if !create_branch {
            self.ensure_checked_out(branch)?;
        }
        self.repo
            .configure_identity(&self.settings.bot_name, &self.settings.bot_email)?;
        if create_branch {
            self.repo.create_branch(branch)?;
        }
        self.repo.stage_all()?;
        self.repo.commit(message)?;
        self.repo
            .set_remote_url(&self.settings.remote, &self.authenticated_remote_url(ctx))?;
        self.repo.push_branch(&self.settings.remote, branch)?;
        info!("Pushed {} to {}", branch, self.settings.remote);
        Ok(())
    }

    /// Release the mainline branch under the next patch of the target
    /// repository's own latest release.
    pub fn create_release(&self, ctx: &RunContext, description: &str) -> Result<VersionTag> {
        let latest = VersionTag::new(self.host.latest_release(&ctx.slug)?);
        let next = latest.next_patch()?;

        self.host.create_release(
            &ctx.slug,
            &NewRelease {
                tag_name: next.to_string(),
                target_commitish: self.settings.mainline_branch.clone(),
                name: next.to_string(),
                body: description.to_string(),
                draft: false,
                prerelease: false,
            },
        )?;
        info!("Released {} (previous {})", next, latest);
        Ok(next)
    }

    /// Open a pull request from `branch` against the mainline branch.
    pub fn open_pull_request(&self, ctx: &RunContext, branch: &str, title: &str) -> Result<()> {
        info!(
            "Creating pull request on https://{}/{}/pulls",
            self.settings.git_host, ctx.slug
        );
        self.host.create_pull_request(
            &ctx.slug,
            &NewPullRequest {
                title: title.to_string(),
                head: format!("{}:{}", ctx.slug.owner, branch),
                base: self.settings.mainline_branch.clone(),
            },
        )?;
        info!("Pull request created");
        Ok(())
    }

    fn ensure_checked_out(&self, branch: &str) -> Result<()> {
        match self.repo.current_branch()? {
            Some(current) if current == branch => Ok(()),
            Some(current) => Err(BotBumpError::vcs(format!(
                "expected {} to be checked out, found {}",
                branch, current
            ))),
            None => Err(BotBumpError::vcs(format!(
                "expected {} to be checked out, found a detached HEAD",
                branch
            ))),
        }
    }

    /// `https://<owner>:<token>@<host>/<owner>/<repo>.git`
    fn authenticated_remote_url(&self, ctx: &RunContext) -> String {
        format!(
            "https://{}:{}@{}/{}/{}.git",
            ctx.slug.owner,
            ctx.credential.expose(),
            self.settings.git_host,
            ctx.slug.owner,
            ctx.slug.repo
        )
    }
}
