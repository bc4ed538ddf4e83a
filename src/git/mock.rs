use crate::error::{BotBumpError, Result};
use crate::git::Repository;
use std::cell::RefCell;

/// A single recorded call on [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    FetchPrune(String),
    ListRemoteBranches,
    CurrentBranch,
    ConfigureIdentity { name: String, email: String },
    StageAll,
    Commit(String),
    CreateBranch(String),
    SetRemoteUrl { remote: String, url: String },
    PushBranch { remote: String, branch: String },
}

impl GitCall {
    /// Whether the call changes local or remote repository state
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            GitCall::FetchPrune(_) | GitCall::ListRemoteBranches | GitCall::CurrentBranch
        )
    }
}

/// Mock repository for testing without actual git operations
///
/// Every call is recorded in order. A call can be made to fail by name with
/// [MockRepository::fail_on].
pub struct MockRepository {
    remote_branches: Vec<String>,
    current_branch: Option<String>,
    fail_on: Option<&'static str>,
    calls: RefCell<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a new mock repository on `master` with no remote branches
    pub fn new() -> Self {
        MockRepository {
            remote_branches: Vec::new(),
            current_branch: Some("master".to_string()),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Add a remote-tracking branch, e.g. `remotes/origin/main`
    pub fn with_remote_branch(mut self, name: impl Into<String>) -> Self {
        self.remote_branches.push(name.into());
        self
    }

    /// Check out `name`, or detach HEAD with `None`
    pub fn on_branch(mut self, name: Option<&str>) -> Self {
        self.current_branch = name.map(str::to_string);
        self
    }

    /// Make the named operation (`"fetch_prune"`, `"commit"`, `"push_branch"`, ...) fail
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Calls recorded so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, operation: &'static str, call: GitCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(operation) {
            return Err(BotBumpError::vcs(format!("{} failed", operation)));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch_prune(&self, remote: &str) -> Result<()> {
        self.record("fetch_prune", GitCall::FetchPrune(remote.to_string()))
    }

    fn list_remote_branches(&self) -> Result<Vec<String>> {
        self.record("list_remote_branches", GitCall::ListRemoteBranches)?;
        Ok(self.remote_branches.clone())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.record("current_branch", GitCall::CurrentBranch)?;
        Ok(self.current_branch.clone())
    }

    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        self.record(
            "configure_identity",
            GitCall::ConfigureIdentity {
                name: name.to_string(),
                email: email.to_string(),
            },
        )
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage_all", GitCall::StageAll)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record("commit", GitCall::Commit(message.to_string()))
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record("create_branch", GitCall::CreateBranch(name.to_string()))
    }

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.record(
            "set_remote_url",
            GitCall::SetRemoteUrl {
                remote: remote.to_string(),
                url: url.to_string(),
            },
        )
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(
            "push_branch",
            GitCall::PushBranch {
                remote: remote.to_string(),
                branch: branch.to_string(),
            },
        )
    }
}
