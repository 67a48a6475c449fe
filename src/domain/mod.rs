//! Domain logic - pure business rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::{create_tag_name, TagAction, TagNames, TagOperationResult, TagOutcome, TagTarget};
pub use version::{Extraction, VersionInfo};
