//! GitHub REST API client

use crate::domain::{Credential, RepoSlug};
use crate::error::{BotBumpError, Result};
use crate::upstream::{NewPullRequest, NewRelease, ReleaseHost, ReleaseResponse};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use tracing::{debug, warn};

pub struct GitHubClient {
    client: Client,
    base_url: String,
    credential: Credential,
}

impl GitHubClient {
    pub fn new(base_url: &str, credential: Credential) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("botbump/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    fn repo_url(&self, slug: &RepoSlug, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url, slug.owner, slug.repo, path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", self.credential.authorization_header())
    }

    /// Sends the request and checks for the one status the endpoint answers on success.
    fn send(request: RequestBuilder, expected: StatusCode) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();

        if status != expected {
            let url = response.url().to_string();
            let body = response
                .text()
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            warn!("{} answered {} (expected {})", url, status, expected);
            return Err(BotBumpError::upstream_status(status.as_u16(), &body));
        }

        Ok(response)
    }
}

impl ReleaseHost for GitHubClient {
    fn latest_feed_release(&self, feed_url: &str) -> Result<String> {
        debug!("GET {}", feed_url);
        let request = self
            .client
            .get(feed_url)
            .header("Accept", "application/vnd.github+json");
        let response = Self::send(request, StatusCode::OK)?;

        let releases: Vec<ReleaseResponse> = serde_json::from_str(&response.text()?)?;
        let latest = releases
            .first()
            .ok_or_else(|| BotBumpError::format(format!("release feed is empty: {}", feed_url)))?;

        Ok(latest.display_name().to_string())
    }

    fn latest_release(&self, slug: &RepoSlug) -> Result<String> {
        let url = self.repo_url(slug, "releases/latest");
        debug!("GET {}", url);
        let response = Self::send(self.authorized(self.client.get(&url)), StatusCode::OK)?;

        let release: ReleaseResponse = serde_json::from_str(&response.text()?)?;
        Ok(release.display_name().to_string())
    }

    fn create_release(&self, slug: &RepoSlug, release: &NewRelease) -> Result<()> {
        let url = self.repo_url(slug, "releases");
        debug!(tag = %release.tag_name, "POST {}", url);
        Self::send(
            self.authorized(self.client.post(&url)).json(release),
            StatusCode::CREATED,
        )?;
        Ok(())
    }

    fn create_pull_request(&self, slug: &RepoSlug, pull_request: &NewPullRequest) -> Result<()> {
        let url = self.repo_url(slug, "pulls");
        debug!(head = %pull_request.head, "POST {}", url);
        Self::send(
            self.authorized(self.client.post(&url)).json(pull_request),
            StatusCode::CREATED,
        )?;
        Ok(())
    }
}
