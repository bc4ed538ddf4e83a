use crate::domain::RepoSlug;
use crate::error::{BotBumpError, Result};
use crate::upstream::{NewPullRequest, NewRelease, ReleaseHost};
use std::cell::RefCell;

/// In-memory release host that records what would have been created
pub struct MockReleaseHost {
    feed: Vec<String>,
    repo_latest: String,
    fail_on: Option<&'static str>,
    feed_reads: RefCell<usize>,
    releases: RefCell<Vec<NewRelease>>,
    pull_requests: RefCell<Vec<NewPullRequest>>,
}

impl MockReleaseHost {
    /// `feed` lists upstream release names newest first; `repo_latest` is the
    /// target repository's latest release
    pub fn new(feed: &[&str], repo_latest: &str) -> Self {
        MockReleaseHost {
            feed: feed.iter().map(|s| s.to_string()).collect(),
            repo_latest: repo_latest.to_string(),
            fail_on: None,
            feed_reads: RefCell::new(0),
            releases: RefCell::new(Vec::new()),
            pull_requests: RefCell::new(Vec::new()),
        }
    }

    /// Make the named call (`"latest_feed_release"`, `"create_release"`, ...) answer 500
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn feed_reads(&self) -> usize {
        *self.feed_reads.borrow()
    }

    pub fn releases(&self) -> Vec<NewRelease> {
        self.releases.borrow().clone()
    }

    pub fn pull_requests(&self) -> Vec<NewPullRequest> {
        self.pull_requests.borrow().clone()
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.fail_on == Some(operation) {
            return Err(BotBumpError::upstream_status(500, "mock failure"));
        }
        Ok(())
    }
}

impl ReleaseHost for MockReleaseHost {
    fn latest_feed_release(&self, feed_url: &str) -> Result<String> {
        *self.feed_reads.borrow_mut() += 1;
        self.check("latest_feed_release")?;
        self.feed
            .first()
            .cloned()
            .ok_or_else(|| BotBumpError::format(format!("release feed is empty: {}", feed_url)))
    }

    fn latest_release(&self, _slug: &RepoSlug) -> Result<String> {
        self.check("latest_release")?;
        Ok(self.repo_latest.clone())
    }

    fn create_release(&self, _slug: &RepoSlug, release: &NewRelease) -> Result<()> {
        self.check("create_release")?;
        self.releases.borrow_mut().push(release.clone());
        Ok(())
    }

    fn create_pull_request(&self, _slug: &RepoSlug, pull_request: &NewPullRequest) -> Result<()> {
        self.check("create_pull_request")?;
        self.pull_requests.borrow_mut().push(pull_request.clone());
        Ok(())
    }
}
