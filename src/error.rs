use thiserror::Error;

/// Unified error type for botbump operations
#[derive(Error, Debug)]
pub enum BotBumpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid semver: {0}")]
    InvalidSemver(String),

    #[error("Version control operation failed: {0}")]
    Vcs(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Tool failed: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in botbump
pub type Result<T> = std::result::Result<T, BotBumpError>;

impl BotBumpError {
    /// Create a format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        BotBumpError::Format(msg.into())
    }

    /// Create an invalid semver error for the offending tag
    pub fn invalid_semver(tag: impl Into<String>) -> Self {
        BotBumpError::InvalidSemver(format!("given tag is not valid semver: {}", tag.into()))
    }

    /// Create a version control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        BotBumpError::Vcs(msg.into())
    }

    /// Create an upstream error with context
    pub fn upstream(msg: impl Into<String>) -> Self {
        BotBumpError::Upstream(msg.into())
    }

    /// Create an upstream error from an unexpected HTTP status and its response body
    pub fn upstream_status(status: u16, body: &str) -> Self {
        BotBumpError::Upstream(format!("status={}, body={}", status, body))
    }

    /// Create a tool error with context
    pub fn tool(msg: impl Into<String>) -> Self {
        BotBumpError::Tool(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BotBumpError::Config(msg.into())
    }
}

impl From<git2::Error> for BotBumpError {
    fn from(err: git2::Error) -> Self {
        BotBumpError::Vcs(err.message().to_string())
    }
}

impl From<reqwest::Error> for BotBumpError {
    fn from(err: reqwest::Error) -> Self {
        BotBumpError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for BotBumpError {
    fn from(err: serde_json::Error) -> Self {
        BotBumpError::Format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BotBumpError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BotBumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_semver_names_the_tag() {
        let err = BotBumpError::invalid_semver("v0.1");
        assert_eq!(
            err.to_string(),
            "Invalid semver: given tag is not valid semver: v0.1"
        );
    }

    #[test]
    fn test_upstream_status_includes_status_and_body() {
        let err = BotBumpError::upstream_status(422, r#"{"message":"Validation Failed"}"#);
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("Validation Failed"));
    }

    #[test]
    fn test_git2_error_maps_to_vcs() {
        let err: BotBumpError = git2::Error::from_str("remote rejected").into();
        assert!(matches!(err, BotBumpError::Vcs(ref m) if m == "remote rejected"));
    }

    #[test]
    fn test_json_error_maps_to_format() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BotBumpError = json_err.into();
        assert!(err.to_string().starts_with("Format error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (BotBumpError::format("x"), "Format error"),
            (BotBumpError::vcs("x"), "Version control operation failed"),
            (BotBumpError::upstream("x"), "Upstream request failed"),
            (BotBumpError::tool("x"), "Tool failed"),
            (BotBumpError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
