//! Domain logic - pure rules independent of git, HTTP and the filesystem

pub mod branch;
pub mod context;
pub mod outcome;
pub mod version;

pub use branch::BumpBranch;
pub use context::{Credential, RepoSlug, RunContext, RunTarget};
pub use outcome::{PublicationOutcome, Verdict};
pub use version::{next_patch, VersionTag};
