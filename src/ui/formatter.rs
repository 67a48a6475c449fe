//! Pure formatting functions for run output.
//!
//! Functions here only build lines; the caller decides where they go.

use git2::Oid;

use crate::boundary::short_sha;
use crate::domain::{TagNames, TagOutcome};

/// Lines announcing which floating tags will be pointed at which commit.
pub fn format_plan(commit: &Oid, names: &TagNames) -> Vec<String> {
    let mut lines = vec![
        format!(
            "📋 Plan: Will create/update floating tags pointing to commit {}",
            short_sha(commit)
        ),
        format!("   - Major tag: {}", names.major),
    ];
    if let Some(minor) = &names.minor {
        lines.push(format!("   - Minor tag: {}", minor));
    }
    lines
}

/// One summary line per processed tag.
///
/// - Created: `✓ Created: v1`
/// - Moved: `↻ Updated: v1`
/// - Unchanged: `= Unchanged: v1`
pub fn format_outcome(outcome: &TagOutcome) -> String {
    let (marker, label) = if outcome.result.created {
        ("✓", "Created")
    } else if outcome.result.updated {
        ("↻", "Updated")
    } else {
        ("=", "Unchanged")
    };
    format!("   {} {}: {}", marker, label, outcome.tag)
}

/// Closing summary of a successful run.
pub fn format_summary(commit: &Oid, outcomes: &[TagOutcome]) -> Vec<String> {
    let mut lines = vec![
        "✅ Successfully completed floating version tag operations".to_string(),
        format!(
            "📊 Summary (all tags point to commit {}):",
            short_sha(commit)
        ),
    ];
    lines.extend(outcomes.iter().map(format_outcome));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagOperationResult;

    fn oid() -> Oid {
        Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap()
    }

    fn outcome(tag: &str, result: TagOperationResult) -> TagOutcome {
        TagOutcome {
            tag: tag.to_string(),
            result,
        }
    }

    #[test]
    fn test_plan_without_minor() {
        let names = TagNames::derive("v", 1, 2, false);
        let lines = format_plan(&oid(), &names);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("commit 0123456"));
        assert_eq!(lines[1], "   - Major tag: v1");
    }

    #[test]
    fn test_plan_with_minor() {
        let names = TagNames::derive("v", 1, 2, true);
        let lines = format_plan(&oid(), &names);
        assert_eq!(lines.last().unwrap(), "   - Minor tag: v1.2");
    }

    #[test]
    fn test_outcome_markers() {
        assert_eq!(
            format_outcome(&outcome("v1", TagOperationResult::created())),
            "   ✓ Created: v1"
        );
        assert_eq!(
            format_outcome(&outcome("v1", TagOperationResult::updated())),
            "   ↻ Updated: v1"
        );
        assert_eq!(
            format_outcome(&outcome("v1.2", TagOperationResult::unchanged())),
            "   = Unchanged: v1.2"
        );
    }

    #[test]
    fn test_summary_lists_every_tag() {
        let outcomes = vec![
            outcome("v1", TagOperationResult::updated()),
            outcome("v1.2", TagOperationResult::created()),
        ];
        let lines = format_summary(&oid(), &outcomes);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("0123456"));
        assert!(lines[2].contains("v1"));
        assert!(lines[3].contains("v1.2"));
    }
}
