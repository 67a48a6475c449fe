use git2::Oid;

/// Build a floating tag name: `{prefix}{major}` or `{prefix}{major}.{minor}`.
pub fn create_tag_name(prefix: &str, major: u64, minor: Option<u64>) -> String {
    match minor {
        Some(minor) => format!("{}{}.{}", prefix, major, minor),
        None => format!("{}{}", prefix, major),
    }
}

/// The floating tags managed in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNames {
    pub major: String,
    pub minor: Option<String>,
}

impl TagNames {
    /// Derive the floating tag names for a version.
    ///
    /// The minor name is only produced when `include_minor` is set.
    pub fn derive(prefix: &str, major: u64, minor: u64, include_minor: bool) -> Self {
        TagNames {
            major: create_tag_name(prefix, major, None),
            minor: include_minor.then(|| create_tag_name(prefix, major, Some(minor))),
        }
    }

    /// Names in processing order, major first.
    pub fn in_order(&self) -> Vec<&str> {
        std::iter::once(self.major.as_str())
            .chain(self.minor.as_deref())
            .collect()
    }
}

/// A floating tag and the commit it must point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget {
    pub name: String,
    pub commit: Oid,
}

impl TagTarget {
    pub fn new(name: impl Into<String>, commit: Oid) -> Self {
        TagTarget {
            name: name.into(),
            commit,
        }
    }
}

/// What has to happen to a floating tag, given where it currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Create,
    Move { from: Oid },
    Unchanged,
}

impl TagAction {
    pub fn decide(existing: Option<Oid>, target: Oid) -> Self {
        match existing {
            None => TagAction::Create,
            Some(current) if current == target => TagAction::Unchanged,
            Some(current) => TagAction::Move { from: current },
        }
    }

    pub fn result(&self) -> TagOperationResult {
        match self {
            TagAction::Create => TagOperationResult::created(),
            TagAction::Move { .. } => TagOperationResult::updated(),
            TagAction::Unchanged => TagOperationResult::unchanged(),
        }
    }
}

/// Outcome of synchronizing one floating tag.
///
/// `created` and `updated` are never both set; neither set means the tag was
/// already at the target commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOperationResult {
    pub created: bool,
    pub updated: bool,
}

impl TagOperationResult {
    pub fn created() -> Self {
        TagOperationResult {
            created: true,
            updated: false,
        }
    }

    pub fn updated() -> Self {
        TagOperationResult {
            created: false,
            updated: true,
        }
    }

    pub fn unchanged() -> Self {
        TagOperationResult::default()
    }

    pub fn is_noop(&self) -> bool {
        !self.created && !self.updated
    }
}

/// A processed floating tag and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub tag: String,
    pub result: TagOperationResult,
}
