use crate::domain::version::VersionTag;
use std::fmt;

/// Work-in-progress identity of a bump: the branch name and the commit
/// message are both derived from the component and the target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpBranch {
    component: String,
    version: VersionTag,
}

impl BumpBranch {
    pub fn new(component: impl Into<String>, version: VersionTag) -> Self {
        BumpBranch {
            component: component.into(),
            version,
        }
    }

    /// `botbump-<component>@<version>`
    pub fn name(&self) -> String {
        format!("botbump-{}@{}", self.component, self.version)
    }

    /// `bump: <component>@<version>`, used for the commit, PR title and release body
    pub fn commit_message(&self) -> String {
        format!("bump: {}@{}", self.component, self.version)
    }

    /// How the branch shows up among remote-tracking references
    pub fn remote_ref(&self, remote: &str) -> String {
        format!("remotes/{}/{}", remote, self.name())
    }
}

impl fmt::Display for BumpBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_name() {
        let branch = BumpBranch::new("deno", VersionTag::new("v1.0.1"));
        assert_eq!(branch.name(), "botbump-deno@v1.0.1");
        assert_eq!(branch.to_string(), "botbump-deno@v1.0.1");
    }

    #[test]
    fn test_commit_message() {
        let branch = BumpBranch::new("deno", VersionTag::new("v1.0.1"));
        assert_eq!(branch.commit_message(), "bump: deno@v1.0.1");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let a = BumpBranch::new("deno", VersionTag::new("v1.2.3"));
        let b = BumpBranch::new("deno", VersionTag::new("v1.2.3"));
        assert_eq!(a.name(), b.name());
        assert_eq!(a.commit_message(), b.commit_message());
    }

    #[test]
    fn test_remote_ref() {
        let branch = BumpBranch::new("node", VersionTag::new("20.1.0"));
        assert_eq!(
            branch.remote_ref("origin"),
            "remotes/origin/botbump-node@20.1.0"
        );
    }
}
