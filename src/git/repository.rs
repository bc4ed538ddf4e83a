use crate::error::{BotBumpError, Result};
use git2::{
    BranchType, Cred, CredentialType, FetchOptions, FetchPrune, IndexAddOption, PushOptions,
    RemoteCallbacks, Repository as Git2Repo,
};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Callbacks answering credential requests with the user/password
    /// embedded in the remote's URL, if any.
    fn remote_callbacks(remote_url: Option<&str>) -> RemoteCallbacks<'static> {
        let userinfo = remote_url
            .and_then(|u| Url::parse(u).ok())
            .and_then(|u| {
                u.password()
                    .map(|p| (u.username().to_string(), p.to_string()))
            });

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed| {
            match &userinfo {
                Some((user, password)) if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) => {
                    Cred::userpass_plaintext(user, password)
                }
                _ if allowed.contains(CredentialType::USERNAME) => {
                    Cred::username(username_from_url.unwrap_or("git"))
                }
                _ => Cred::default(),
            }
        });
        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn fetch_prune(&self, remote: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| BotBumpError::vcs(format!("Cannot find remote: {}", e)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options
            .prune(FetchPrune::On)
            .remote_callbacks(Self::remote_callbacks(remote.url()));

        debug!(remote = remote.name().unwrap_or_default(), "git fetch --prune");
        remote
            .fetch::<&str>(&[], Some(&mut fetch_options), None)
            .map_err(|e| BotBumpError::vcs(format!("Fetch failed: {}", e)))?;

        Ok(())
    }

    fn list_remote_branches(&self) -> Result<Vec<String>> {
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.get().name() {
                let name = name.strip_prefix("refs/").unwrap_or(name);
                branches.push(name.to_string());
            }
        }

        branches.sort();
        Ok(branches)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        if self.repo.head_detached()? {
            return Ok(None);
        }

        let head = self
            .repo
            .head()
            .map_err(|e| BotBumpError::vcs(format!("Cannot resolve HEAD: {}", e)))?;
        Ok(head.shorthand().map(str::to_string))
    }

    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        let mut config = self
            .repo
            .config()?
            .open_level(git2::ConfigLevel::Local)?;

        config.set_str("user.email", email)?;
        config.set_str("user.name", name)?;

        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;

        let signature = self.repo.signature()?;
        let parent = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| BotBumpError::vcs(format!("Cannot resolve HEAD: {}", e)))?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!(%oid, "committed: {}", message);

        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;

        self.repo
            .branch(name, &head, false)
            .map_err(|e| BotBumpError::vcs(format!("Cannot create branch '{}': {}", name, e)))?;
        self.repo.set_head(&format!("refs/heads/{}", name))?;

        Ok(())
    }

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.repo
            .remote_set_url(remote, url)
            .map_err(|e| BotBumpError::vcs(format!("Cannot set url of remote '{}': {}", remote, e)))
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| BotBumpError::vcs(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = Self::remote_callbacks(remote.url());
        callbacks.push_update_reference(|refname, status| match status {
            Some(reason) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, reason
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        debug!(branch, "git push");
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| BotBumpError::vcs(format!("Push failed: {}", e)))?;

        Ok(())
    }
}
