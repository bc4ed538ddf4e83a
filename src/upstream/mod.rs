//! Release-hosting API
//!
//! [ReleaseHost] covers the four calls a run makes: reading the upstream
//! release feed, reading the target repository's latest release, and creating
//! either a release or a pull request.

pub mod github;
pub mod mock;

pub use github::GitHubClient;
pub use mock::MockReleaseHost;

use crate::domain::RepoSlug;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Release as returned by the hosting API
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResponse {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ReleaseResponse {
    /// Display name, falling back to the tag when the release has no name
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

/// Body of a create-release request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// Body of a create-pull-request request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    /// `owner:branch`
    pub head: String,
    pub base: String,
}

pub trait ReleaseHost {
    /// Display name of the first (newest) release listed at `feed_url`
    fn latest_feed_release(&self, feed_url: &str) -> Result<String>;

    /// Display name of the repository's latest published release
    fn latest_release(&self, slug: &RepoSlug) -> Result<String>;

    fn create_release(&self, slug: &RepoSlug, release: &NewRelease) -> Result<()>;

    fn create_pull_request(&self, slug: &RepoSlug, pull_request: &NewPullRequest) -> Result<()>;
}
