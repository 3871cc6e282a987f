use std::sync::Mutex;

use chrono::NaiveDate;

use crate::error::{Result, TaggerError};
use crate::git::{Repository, TagInfo};

/// Mock repository for testing without actual git operations.
///
/// Records every mutating call so tests can assert on side effects (or
/// their absence), and supports failure injection for the listing and
/// push operations.
pub struct MockRepository {
    is_repository: bool,
    dirty: bool,
    remote_url: Option<String>,
    fail_list_tags: bool,
    fail_push: bool,
    tags: Mutex<Vec<TagInfo>>,
    unlisted_tags: Mutex<Vec<String>>,
    created: Mutex<Vec<(String, Option<String>)>>,
    pushed: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a clean mock repository with no tags and no remote.
    pub fn new() -> Self {
        MockRepository {
            is_repository: true,
            dirty: false,
            remote_url: None,
            fail_list_tags: false,
            fail_push: false,
            tags: Mutex::new(Vec::new()),
            unlisted_tags: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
        }
    }

    /// Pretend the working directory is not a repository.
    pub fn not_a_repository(mut self) -> Self {
        self.is_repository = false;
        self
    }

    /// Mark the worktree as having uncommitted changes.
    pub fn with_dirty_worktree(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Configure a remote with the given URL.
    pub fn with_remote(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Seed a tag with a fixed placeholder date.
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.with_dated_tag(name, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    /// Seed a tag with an explicit creation date.
    pub fn with_dated_tag(self, name: impl Into<String>, date: NaiveDate) -> Self {
        self.tags.lock().unwrap().push(TagInfo {
            name: name.into(),
            date,
        });
        self
    }

    /// Seed a tag that `tag_exists` sees but `list_tags` does not,
    /// modeling a tag created concurrently between the listing and the
    /// existence guard.
    pub fn with_unlisted_tag(self, name: impl Into<String>) -> Self {
        self.unlisted_tags.lock().unwrap().push(name.into());
        self
    }

    /// Make `list_tags` / `list_tags_with_dates` fail.
    pub fn with_failing_tag_listing(mut self) -> Self {
        self.fail_list_tags = true;
        self
    }

    /// Make `push_tag` fail.
    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Tags created through this mock, as (name, message) pairs.
    pub fn created_tags(&self) -> Vec<(String, Option<String>)> {
        self.created.lock().unwrap().clone()
    }

    /// Tags pushed through this mock.
    pub fn pushed_tags(&self) -> Vec<String> {
        self.pushed.lock().unwrap().clone()
    }

    fn record_created(&self, name: &str, message: Option<&str>) {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), message.map(|m| m.to_string())));
        self.tags.lock().unwrap().push(TagInfo {
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_repository(&self) -> bool {
        self.is_repository
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        if self.fail_list_tags {
            return Err(TaggerError::tag("mock tag listing failure"));
        }
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .map(|info| info.name.clone())
            .collect())
    }

    fn list_tags_with_dates(&self) -> Result<Vec<TagInfo>> {
        if self.fail_list_tags {
            return Err(TaggerError::tag("mock tag listing failure"));
        }
        Ok(self.tags.lock().unwrap().clone())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let listed = self.tags.lock().unwrap().iter().any(|info| info.name == name);
        let unlisted = self
            .unlisted_tags
            .lock()
            .unwrap()
            .iter()
            .any(|unlisted| unlisted == name);
        Ok(listed || unlisted)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record_created(name, None);
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record_created(name, Some(message));
        Ok(())
    }

    fn has_remote(&self) -> Result<bool> {
        Ok(self.remote_url.is_some())
    }

    fn remote_url(&self) -> Result<String> {
        self.remote_url
            .clone()
            .ok_or_else(|| TaggerError::remote("no remote repository found"))
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        if self.fail_push {
            return Err(TaggerError::remote("mock push failure"));
        }
        self.pushed.lock().unwrap().push(name.to_string());
        Ok(())
    }
}
