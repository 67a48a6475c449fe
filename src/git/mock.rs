use crate::error::{FloatingTagError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// A push as observed by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRecord {
    pub remote: String,
    pub tag: String,
    pub force: bool,
}

/// In-memory repository for testing without actual git operations
///
/// Local tags are mutable; every mutation and push is recorded in call order so
/// tests can assert on sequencing.
#[derive(Default)]
pub struct MockRepository {
    refs: HashMap<String, Oid>,
    tags: RefCell<HashMap<String, Oid>>,
    pushes: RefCell<Vec<PushRecord>>,
    events: RefCell<Vec<String>>,
    failing_tags: HashSet<String>,
    failing_pushes: HashSet<String>,
    /// Tags whose lookup after creation reports this commit instead
    drifted_tags: HashMap<String, Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a reference (branch, tag, sha) resolvable to a commit
    pub fn add_ref(&mut self, name: impl Into<String>, oid: Oid) {
        self.refs.insert(name.into(), oid);
    }

    /// Add an existing local tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Make local creation/move of this tag fail
    pub fn fail_tag_operation(&mut self, name: impl Into<String>) {
        self.failing_tags.insert(name.into());
    }

    /// Make pushing this tag fail
    pub fn fail_push(&mut self, name: impl Into<String>) {
        self.failing_pushes.insert(name.into());
    }

    /// After the tag is written, report it at `oid` when it is looked up
    pub fn drift_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.drifted_tags.insert(name.into(), oid);
    }

    pub fn tag(&self, name: &str) -> Option<Oid> {
        self.tags.borrow().get(name).copied()
    }

    pub fn pushes(&self) -> Vec<PushRecord> {
        self.pushes.borrow().clone()
    }

    /// Mutations and pushes in call order, e.g. `create v1 force=false`, `push v1 force=false`
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        let tag = self.tags.borrow().get(reference).copied();
        self.refs
            .get(reference)
            .copied()
            .or(tag)
            .ok_or_else(|| {
                FloatingTagError::Git(git2::Error::new(
                    git2::ErrorCode::NotFound,
                    git2::ErrorClass::Reference,
                    format!("revspec '{}' not found", reference),
                ))
            })
    }

    fn resolve_tag_commit(&self, tag_name: &str) -> Result<Option<Oid>> {
        let tag = self.tags.borrow().get(tag_name).copied();
        Ok(tag.map(|oid| self.drifted_tags.get(tag_name).copied().unwrap_or(oid)))
    }

    fn create_tag(&self, name: &str, oid: Oid, force: bool) -> Result<()> {
        self.events
            .borrow_mut()
            .push(format!("create {} force={}", name, force));

        if self.failing_tags.contains(name) {
            return Err(FloatingTagError::Git(git2::Error::from_str(
                "cannot lock ref",
            )));
        }

        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) && !force {
            return Err(FloatingTagError::Git(git2::Error::new(
                git2::ErrorCode::Exists,
                git2::ErrorClass::Tag,
                format!("tag '{}' already exists", name),
            )));
        }
        tags.insert(name.to_string(), oid);

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str, force: bool) -> Result<()> {
        self.events
            .borrow_mut()
            .push(format!("push {} force={}", tag_name, force));

        if self.failing_pushes.contains(tag_name) {
            return Err(FloatingTagError::remote("Push failed: connection reset"));
        }

        self.pushes.borrow_mut().push(PushRecord {
            remote: remote.to_string(),
            tag: tag_name.to_string(),
            force,
        });

        Ok(())
    }
}
