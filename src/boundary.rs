use git2::Oid;
use std::fmt;

/// Non-fatal issues found while synchronizing floating tags.
/// These are reported as warnings and never fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// The tag resolves to a different commit than the one it was just set to
    VerificationMismatch {
        tag: String,
        expected: Oid,
        actual: Oid,
    },
    /// The tag could not be found when verifying it
    TagMissing { tag: String, expected: Oid },
    /// The tag lookup itself failed while verifying
    VerificationFailed { tag: String, reason: String },
}

/// First seven characters of a commit id, as git abbreviates it.
pub fn short_sha(oid: &Oid) -> String {
    let full = oid.to_string();
    full[..7.min(full.len())].to_string()
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::VerificationMismatch {
                tag,
                expected,
                actual,
            } => write!(
                f,
                "Tag {} verification failed: points to {} (expected {})",
                tag,
                short_sha(actual),
                short_sha(expected)
            ),
            SyncWarning::TagMissing { tag, expected } => write!(
                f,
                "Tag {} verification failed: tag not found (expected {})",
                tag,
                short_sha(expected)
            ),
            SyncWarning::VerificationFailed { tag, reason } => {
                write!(f, "Tag {} verification failed: {}", tag, reason)
            }
        }
    }
}
