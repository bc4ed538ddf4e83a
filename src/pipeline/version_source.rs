use crate::domain::VersionTag;
use crate::error::{BotBumpError, Result};
use crate::upstream::ReleaseHost;
use crate::workspace::Workspace;

/// Resolves the locally recorded and the newest upstream version
pub struct VersionSource<'a> {
    workspace: &'a Workspace,
    host: &'a dyn ReleaseHost,
    marker_file: &'a str,
    release_feed: &'a str,
}

impl<'a> VersionSource<'a> {
    pub fn new(
        workspace: &'a Workspace,
        host: &'a dyn ReleaseHost,
        marker_file: &'a str,
        release_feed: &'a str,
    ) -> Self {
        VersionSource {
            workspace,
            host,
            marker_file,
            release_feed,
        }
    }

    /// Trimmed content of the marker file
    pub fn current_version(&self) -> Result<VersionTag> {
        let content = self.workspace.read_marker(self.marker_file)?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(BotBumpError::format(format!(
                "{} is empty",
                self.marker_file
            )));
        }
        Ok(VersionTag::new(trimmed))
    }

    /// Display name of the newest entry in the upstream release feed
    pub fn latest_version(&self) -> Result<VersionTag> {
        let name = self.host.latest_feed_release(self.release_feed)?;
        Ok(VersionTag::new(name))
    }
}
