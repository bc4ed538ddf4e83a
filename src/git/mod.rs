//! Version-control abstraction layer
//!
//! The pipeline only talks to the [Repository] trait. Implementations:
//!
//! - [repository::Git2Repository]: real repository backed by the `git2` crate
//! - [mock::MockRepository]: records every call, for pipeline tests
//!
//! ```rust
//! # use botbump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> botbump::Result<()> {
//! repo.fetch_prune("origin")?;
//! let exists = repo
//!     .list_remote_branches()?
//!     .iter()
//!     .any(|b| b == "remotes/origin/botbump-deno@v1.0.1");
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations needed to detect, commit and push a bump
///
/// All methods block until the operation completes. Any failure maps to
/// [crate::error::BotBumpError::Vcs].
pub trait Repository {
    /// Fetch from `remote`, pruning remote-tracking references that no
    /// longer exist upstream
    fn fetch_prune(&self, remote: &str) -> Result<()>;

    /// List remote-tracking branches as `remotes/<remote>/<branch>`
    fn list_remote_branches(&self) -> Result<Vec<String>>;

    /// Short name of the checked-out branch, `None` on a detached HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Set the committer identity in the repository-local configuration
    fn configure_identity(&self, name: &str, email: &str) -> Result<()>;

    /// Stage every change in the working tree, including deletions
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged changes on top of HEAD
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a branch at HEAD and switch to it, keeping the working tree
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Replace the fetch/push URL of `remote`
    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()>;

    /// Push the local `branch` to the same name on `remote`
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
}
