use crate::domain::version::VersionTag;
use std::fmt;

/// Result of the test gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Compatible,
    Incompatible,
}

impl Verdict {
    pub fn from_success(success: bool) -> Self {
        if success {
            Verdict::Compatible
        } else {
            Verdict::Incompatible
        }
    }
}

/// Terminal result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationOutcome {
    /// Changes were committed to the mainline branch and released under this tag
    DirectRelease(VersionTag),
    /// Changes were pushed to this branch and a pull request was opened
    PullRequestOpened(String),
    /// The recorded version already matches the latest upstream release
    SkippedNoUpdate,
    /// A branch for this bump already exists on the remote
    SkippedDuplicate,
}

impl fmt::Display for PublicationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationOutcome::DirectRelease(tag) => write!(f, "Published release {}", tag),
            PublicationOutcome::PullRequestOpened(branch) => {
                write!(f, "Opened pull request from {}", branch)
            }
            PublicationOutcome::SkippedNoUpdate => write!(f, "Already up to date"),
            PublicationOutcome::SkippedDuplicate => {
                write!(f, "Bump already in flight, nothing to do")
            }
        }
    }
}
