use crate::domain::BumpBranch;
use crate::error::Result;
use crate::git::Repository;
use tracing::info;

/// Detects a bump that is already waiting on the remote
pub struct DuplicateWorkGuard<'a> {
    repo: &'a dyn Repository,
    remote: &'a str,
}

impl<'a> DuplicateWorkGuard<'a> {
    pub fn new(repo: &'a dyn Repository, remote: &'a str) -> Self {
        DuplicateWorkGuard { repo, remote }
    }

    /// Refreshes remote refs (pruning stale ones), then looks for an exact
    /// `remotes/<remote>/<branch>` match. A failed refresh is an error, never
    /// a silent "not found".
    pub fn has_in_flight_work(&self, branch: &BumpBranch) -> Result<bool> {
        self.repo.fetch_prune(self.remote)?;

        let wanted = branch.remote_ref(self.remote);
        let found = self
            .repo
            .list_remote_branches()?
            .iter()
            .any(|b| *b == wanted);

        if found {
            info!("Remote branch {} exists. Skip bumping", branch);
        } else {
            info!("No pending bump found for {}. Continue", branch);
        }
        Ok(found)
    }
}
