//! Per-tag create/move/push/verify protocol.

use git2::Oid;

use crate::boundary::{short_sha, SyncWarning};
use crate::domain::{TagAction, TagNames, TagOperationResult, TagTarget};
use crate::error::{FloatingTagError, Result};
use crate::git::Repository;
use crate::logger::Logger;

/// Floating tag names for a version: `{prefix}{major}` and, when
/// `include_minor` is set, `{prefix}{major}.{minor}`.
pub fn derive_tag_names(prefix: &str, major: u64, minor: u64, include_minor: bool) -> TagNames {
    TagNames::derive(prefix, major, minor, include_minor)
}

/// Points floating tags at a commit and publishes them to one remote.
///
/// Each tag goes through the same steps: look up where it currently points,
/// create / move / leave it, push it (forced only when it moved), and verify it
/// when the logger is verbose. There are no retries; any failure is returned to
/// the caller and aborts the remaining tags.
pub struct TagSynchronizer<'a, R: Repository> {
    repo: &'a R,
    logger: &'a Logger,
    remote: String,
}

impl<'a, R: Repository> TagSynchronizer<'a, R> {
    pub fn new(repo: &'a R, logger: &'a Logger, remote: impl Into<String>) -> Self {
        TagSynchronizer {
            repo,
            logger,
            remote: remote.into(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Make the local tag point at the target commit.
    ///
    /// # Returns
    /// * `created` - The tag did not exist and was created
    /// * `updated` - The tag existed elsewhere and was moved
    /// * neither - The tag already pointed at the commit
    ///
    /// # Errors
    /// `TagOperationFailed` if the lookup or the local mutation fails.
    pub fn synchronize_tag(&self, target: &TagTarget) -> Result<TagOperationResult> {
        let name = target.name.as_str();
        let exists = self
            .repo
            .tag_exists(name)
            .map_err(|e| FloatingTagError::tag_operation(name, e))?;
        let existing = if exists {
            self.repo
                .resolve_tag_commit(name)
                .map_err(|e| FloatingTagError::tag_operation(name, e))?
        } else {
            None
        };

        let action = TagAction::decide(existing, target.commit);
        match action {
            TagAction::Create => {
                self.logger.verbose_info(format!(
                    "Tag {} does not exist, creating at {}",
                    name,
                    short_sha(&target.commit)
                ));
                self.repo
                    .create_tag(name, target.commit, false)
                    .map_err(|e| FloatingTagError::tag_operation(name, e))?;
            }
            TagAction::Move { from } => {
                self.logger.verbose_info(format!(
                    "Tag {} exists at {}, moving to {}",
                    name,
                    short_sha(&from),
                    short_sha(&target.commit)
                ));
                self.repo
                    .create_tag(name, target.commit, true)
                    .map_err(|e| FloatingTagError::tag_operation(name, e))?;
            }
            TagAction::Unchanged => {
                self.logger.verbose_info(format!(
                    "Tag {} already points to {}, nothing to move",
                    name,
                    short_sha(&target.commit)
                ));
            }
        }

        let result = action.result();
        self.logger.debug(format!(
            "Tag {} result: created={}, updated={}",
            name, result.created, result.updated
        ));
        Ok(result)
    }

    /// Push a tag to the remote; a moved tag is force-pushed.
    ///
    /// # Errors
    /// `PushFailed` if the remote rejects the tag or cannot be reached.
    pub fn publish(&self, name: &str, was_updated: bool) -> Result<()> {
        self.logger.verbose_info(format!(
            "Pushing tag {} to {}{}",
            name,
            self.remote,
            if was_updated { " (force)" } else { "" }
        ));

        self.repo
            .push_tag(&self.remote, name, was_updated)
            .map_err(|e| FloatingTagError::push(name, e))?;

        self.logger.debug(format!("Pushed tag {} to {}", name, self.remote));
        Ok(())
    }

    /// Compare where the tag resolves against the expected commit.
    pub fn check(&self, name: &str, expected: Oid) -> Option<SyncWarning> {
        match self.repo.resolve_tag_commit(name) {
            Ok(Some(actual)) if actual == expected => None,
            Ok(Some(actual)) => Some(SyncWarning::VerificationMismatch {
                tag: name.to_string(),
                expected,
                actual,
            }),
            Ok(None) => Some(SyncWarning::TagMissing {
                tag: name.to_string(),
                expected,
            }),
            Err(e) => Some(SyncWarning::VerificationFailed {
                tag: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Verify the tag points at `expected`. A mismatch is logged as a warning
    /// and never fails the run.
    pub fn verify(&self, name: &str, expected: Oid) -> bool {
        match self.check(name, expected) {
            None => {
                self.logger
                    .verbose_info(format!("✓ Verified {} → {}", name, short_sha(&expected)));
                true
            }
            Some(warning) => {
                self.logger.warning(warning.to_string());
                false
            }
        }
    }

    /// Run the whole protocol for one tag: synchronize, publish, then verify
    /// when verbose.
    pub fn process(&self, target: &TagTarget) -> Result<TagOperationResult> {
        let result = self.synchronize_tag(target)?;
        self.publish(&target.name, result.updated)?;

        if self.logger.is_verbose() {
            self.verify(&target.name, target.commit);
        }

        Ok(result)
    }
}
