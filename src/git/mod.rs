//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! tagger needs, allowing for multiple implementations including real
//! repositories and mock implementations for testing.
//!
//! The primary abstraction is the [Repository] trait. Concrete
//! implementations:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a mock implementation for testing
//!
//! Workflow code depends on the trait rather than a concrete type, so the
//! whole release sequence can be driven against a mock.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use chrono::NaiveDate;

/// A tag name together with its creation date, as shown by `history`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagInfo {
    pub name: String,
    pub date: NaiveDate,
}

/// Common git operation trait for abstraction
///
/// Each mutating call either succeeds or fails with an infrastructure
/// error; none partially apply. Implementations map underlying errors
/// (like `git2::Error`) to [crate::error::TaggerError] variants.
pub trait Repository: Send {
    /// Whether the working directory belongs to a git repository.
    fn is_repository(&self) -> bool;

    /// Whether the worktree has uncommitted changes (staged, unstaged,
    /// or untracked).
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// All tag names in the repository, in no particular order.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// All tags together with their creation dates.
    fn list_tags_with_dates(&self) -> Result<Vec<TagInfo>>;

    /// Whether a tag with the given name already exists.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a lightweight tag at HEAD.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Create an annotated tag at HEAD carrying a message.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Whether any remote is configured.
    fn has_remote(&self) -> Result<bool>;

    /// The URL of the preferred remote (origin if present, otherwise the
    /// first configured remote). Returned verbatim; SSH shorthand is
    /// normalized by the caller.
    fn remote_url(&self) -> Result<String>;

    /// Push a single tag to the preferred remote.
    fn push_tag(&self, name: &str) -> Result<()>;
}
