use crate::config::{CredentialSource, CredentialsConfig};
use crate::domain::version::VersionTag;
use crate::error::{BotBumpError, Result};
use std::fmt;

/// Target repository as `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo`; both halves must be non-empty and only one `/` is allowed.
    pub fn parse(repository: &str) -> Result<Self> {
        match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(BotBumpError::config(format!(
                "repository must be owner/repo style: {}",
                repository
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Access token for the hosting API and the git remote.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Repository and credential a run acts on, before any version is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub slug: RepoSlug,
    pub credential: Credential,
}

impl RunTarget {
    /// Resolve the target from positional arguments or the environment,
    /// depending on the configured credential source.
    ///
    /// `env` is the variable lookup, normally `|k| std::env::var(k).ok()`.
    pub fn resolve<F>(
        credentials: &CredentialsConfig,
        repository_arg: Option<&str>,
        token_arg: Option<&str>,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (repository, token) = match credentials.source {
            CredentialSource::Args => (
                repository_arg.map(str::to_string),
                token_arg.map(str::to_string),
            ),
            CredentialSource::Env => (
                env(&credentials.repository_env),
                env(&credentials.token_env),
            ),
        };

        let repository = repository.filter(|r| !r.is_empty()).ok_or_else(|| {
            BotBumpError::config(match credentials.source {
                CredentialSource::Args => "missing REPOSITORY argument (owner/repo)".to_string(),
                CredentialSource::Env => format!("{} is not set", credentials.repository_env),
            })
        })?;
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            BotBumpError::config(match credentials.source {
                CredentialSource::Args => "missing TOKEN argument".to_string(),
                CredentialSource::Env => format!("{} is not set", credentials.token_env),
            })
        })?;

        Ok(RunTarget {
            slug: RepoSlug::parse(&repository)?,
            credential: Credential::new(token),
        })
    }
}

/// Everything one run knows once both versions are resolved. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub slug: RepoSlug,
    pub credential: Credential,
    pub current_version: VersionTag,
    pub latest_version: VersionTag,
}

impl RunContext {
    pub fn needs_update(&self) -> bool {
        self.current_version != self.latest_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn creds(source: CredentialSource) -> CredentialsConfig {
        CredentialsConfig {
            source,
            ..CredentialsConfig::default()
        }
    }

    #[test]
    fn test_repo_slug_parse() {
        let slug = RepoSlug::parse("keroxp/servest").unwrap();
        assert_eq!(slug.owner, "keroxp");
        assert_eq!(slug.repo, "servest");
        assert_eq!(slug.to_string(), "keroxp/servest");
    }

    #[test]
    fn test_repo_slug_parse_invalid() {
        for bad in ["servest", "/servest", "keroxp/", "a/b/c", ""] {
            let err = RepoSlug::parse(bad).unwrap_err();
            assert!(err.to_string().contains("owner/repo"), "{}", bad);
        }
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("ghp_secret");
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.authorization_header(), "token ghp_secret");
    }

    #[test]
    fn test_resolve_from_args() {
        let target = RunTarget::resolve(
            &creds(CredentialSource::Args),
            Some("keroxp/servest"),
            Some("abc"),
            |_| None,
        )
        .unwrap();
        assert_eq!(target.slug.owner, "keroxp");
        assert_eq!(target.credential.expose(), "abc");
    }

    #[test]
    fn test_resolve_from_env_ignores_args() {
        let env: HashMap<&str, &str> = [
            ("GITHUB_REPOSITORY", "denoland/std"),
            ("GITHUB_TOKEN", "from-env"),
        ]
        .into_iter()
        .collect();

        let target = RunTarget::resolve(
            &creds(CredentialSource::Env),
            Some("ignored/repo"),
            Some("ignored"),
            |k| env.get(k).map(|v| v.to_string()),
        )
        .unwrap();
        assert_eq!(target.slug.to_string(), "denoland/std");
        assert_eq!(target.credential.expose(), "from-env");
    }

    #[test]
    fn test_resolve_missing_token() {
        let err = RunTarget::resolve(
            &creds(CredentialSource::Args),
            Some("keroxp/servest"),
            None,
            |_| None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("TOKEN"));

        let err = RunTarget::resolve(
            &creds(CredentialSource::Env),
            None,
            None,
            |k| (k == "GITHUB_REPOSITORY").then(|| "a/b".to_string()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN is not set"));
    }

    #[test]
    fn test_needs_update() {
        let ctx = RunContext {
            slug: RepoSlug::parse("a/b").unwrap(),
            credential: Credential::new("t"),
            current_version: VersionTag::new("v1.0.0"),
            latest_version: VersionTag::new("v1.0.1"),
        };
        assert!(ctx.needs_update());

        let same = RunContext {
            latest_version: VersionTag::new("v1.0.0"),
            ..ctx
        };
        assert!(!same.needs_update());
    }
}
