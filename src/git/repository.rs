use std::path::Path;

use chrono::{DateTime, NaiveDate};
use git2::Repository as RawRepository;

use crate::error::{Result, TaggerError};
use crate::git::{Repository, TagInfo};

/// Real [Repository] implementation backed by the `git2` crate.
///
/// Discovers the repository from a working directory (walking up parent
/// directories, like the git CLI) and performs tag and push operations
/// against it.
pub struct Git2Repository {
    repo: RawRepository,
}

impl std::fmt::Debug for Git2Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Repository")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git2Repository {
    /// Discover the repository containing the current directory.
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - Successfully discovered repository
    /// * `Err` - If the current directory is not inside a git repository
    pub fn discover() -> Result<Self> {
        Self::discover_at(".")
    }

    /// Discover the repository containing `path`.
    pub fn discover_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = RawRepository::discover(path).map_err(|_| {
            TaggerError::repository("not a git repository (or any of the parent directories)")
        })?;
        Ok(Git2Repository { repo })
    }

    /// Name of the remote used for push and URL lookup.
    ///
    /// Prefers "origin" when it exists, otherwise the first configured
    /// remote.
    fn preferred_remote(&self) -> Result<String> {
        let remotes = self.repo.remotes()?;
        let names: Vec<&str> = remotes.iter().flatten().collect();

        if names.is_empty() {
            return Err(TaggerError::remote("no remote repository found"));
        }
        if names.contains(&"origin") {
            return Ok("origin".to_string());
        }
        Ok(names[0].to_string())
    }

    fn head_object(&self) -> Result<git2::Object<'_>> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.into_object())
    }
}

impl Repository for Git2Repository {
    fn is_repository(&self) -> bool {
        // Discovery already succeeded when this instance was constructed.
        true
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        Ok(names.iter().flatten().map(|name| name.to_string()).collect())
    }

    fn list_tags_with_dates(&self) -> Result<Vec<TagInfo>> {
        let mut infos = Vec::new();

        for name in self.list_tags()? {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Peeling handles both lightweight and annotated tags.
            let commit = reference.peel_to_commit()?;
            let date = DateTime::from_timestamp(commit.time().seconds(), 0)
                .map(|dt| dt.date_naive())
                .unwrap_or(NaiveDate::MIN);

            infos.push(TagInfo { name, date });
        }

        Ok(infos)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self
            .repo
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let target = self.head_object()?;
        self.repo.tag_lightweight(name, &target, false)?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let target = self.head_object()?;
        let signature = self.repo.signature()?;
        self.repo.tag(name, &target, &signature, message, false)?;
        Ok(())
    }

    fn has_remote(&self) -> Result<bool> {
        Ok(!self.repo.remotes()?.is_empty())
    }

    fn remote_url(&self) -> Result<String> {
        let name = self.preferred_remote()?;
        let remote = self.repo.find_remote(&name)?;
        remote
            .url()
            .map(|url| url.to_string())
            .ok_or_else(|| TaggerError::remote(format!("remote '{}' URL is not valid UTF-8", name)))
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        let remote_name = self.preferred_remote()?;
        let mut remote = self.repo.find_remote(&remote_name)?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = git2::RemoteCallbacks::new();

        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = [
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in &key_paths {
                    let path = std::path::Path::new(key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections that the push call itself reports
        // as success.
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        remote
            .push(
                &[&format!("refs/tags/{}", name)],
                Some(&mut push_options),
            )
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    TaggerError::remote(format!("network error during push: {}", e))
                } else {
                    TaggerError::remote(format!("failed to push tag '{}': {}", name, e))
                }
            })
    }
}
