//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! primitives floating tags need, allowing a real repository backed by `git2`
//! and an in-memory implementation for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation that records pushes
//!
//! Code that drives tags should depend on the [Repository] trait rather than
//! a concrete implementation.
//!
//! ```rust
//! # use floating_tags::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let commit = repo.resolve_commit("v1.2.3")?;
//! if repo.resolve_tag_commit("v1")? != Some(commit) {
//!     repo.create_tag("v1", commit, true)?;
//!     repo.push_tag("origin", "v1", true)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, PushRecord};
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Git primitives used by the tag synchronizer.
///
/// ## Error Handling
///
/// Implementations return raw failures ([crate::error::FloatingTagError::Git]
/// or [crate::error::FloatingTagError::Remote]); the caller classifies them
/// into the run's error taxonomy.
pub trait Repository {
    /// Resolve any reference (tag, branch, SHA) to the commit it points at
    ///
    /// Annotated tags are peeled to their commit.
    ///
    /// # Returns
    /// * `Ok(Oid)` - The commit
    /// * `Err` - If the reference does not exist or is not a commit
    fn resolve_commit(&self, reference: &str) -> Result<Oid>;

    /// Get the commit a local tag points to
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Commit the tag resolves to
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a Git error
    fn resolve_tag_commit(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Check whether a local tag exists
    fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        Ok(self.resolve_tag_commit(tag_name)?.is_some())
    }

    /// Create a lightweight tag at `oid`, replacing an existing one when `force` is set
    fn create_tag(&self, name: &str, oid: Oid, force: bool) -> Result<()>;

    /// Push a single tag to a remote, overwriting the remote ref when `force` is set
    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()>;
}

/// Refspec for pushing a tag, `+`-prefixed when forced.
pub fn tag_refspec(tag_name: &str, force: bool) -> String {
    format!(
        "{}refs/tags/{}:refs/tags/{}",
        if force { "+" } else { "" },
        tag_name,
        tag_name
    )
}
