use crate::error::{BotBumpError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// `MAJOR.MINOR.` prefix (with optional `v`) followed by the patch digits.
/// Anchored at the start only, so pre-release suffixes are ignored.
fn semver_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(v?\d+\.\d+\.)(\d+)").ok())
        .as_ref()
}

/// A version identifier such as `v1.2.3` or `1.2.3-rc.1`.
///
/// The text is kept verbatim; nothing is validated until [`VersionTag::next_patch`]
/// is asked to increment it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(tag: impl Into<String>) -> Self {
        VersionTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag with its patch component incremented by one.
    pub fn next_patch(&self) -> Result<VersionTag> {
        next_patch(&self.0).map(VersionTag)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Increments the patch component of a tag.
///
/// The `v` prefix and the major/minor text are carried over untouched, and
/// anything after the patch digits (e.g. `-rc.1`) is dropped.
///
/// # Example
/// ```
/// # use botbump::domain::version::next_patch;
/// assert_eq!(next_patch("v3.11.110").unwrap(), "v3.11.111");
/// assert_eq!(next_patch("1.2.3-beta").unwrap(), "1.2.4");
/// assert!(next_patch("v0.1").is_err());
/// ```
pub fn next_patch(tag: &str) -> Result<String> {
    let captures = semver_prefix()
        .and_then(|re| re.captures(tag))
        .ok_or_else(|| BotBumpError::invalid_semver(tag))?;

    let prefix = &captures[1];
    let patch = captures[2]
        .parse::<u64>()
        .ok()
        .and_then(|p| p.checked_add(1))
        .ok_or_else(|| BotBumpError::invalid_semver(tag))?;

    Ok(format!("{}{}", prefix, patch))
}
