//! Main workflow orchestration logic
//!
//! Drives one run from validated inputs to pushed floating tags, independent of
//! how the inputs were gathered. `main` only parses arguments, builds the
//! repository and logger, and reports the outcome.

use git2::Oid;

use crate::boundary::short_sha;
use crate::config::ActionInputs;
use crate::domain::{TagOutcome, TagTarget, VersionInfo};
use crate::error::{FloatingTagError, Result};
use crate::git::Repository;
use crate::logger::Logger;
use crate::sync::{derive_tag_names, TagSynchronizer};
use crate::ui::{self, ActionOutputs, MAJOR_TAG_OUTPUT, MINOR_TAG_OUTPUT};
use crate::version::VersionParser;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version parsed from the input tag
    pub version: VersionInfo,

    /// Commit every floating tag now points to
    pub commit: Oid,

    /// The major floating tag
    pub major_tag: String,

    /// The minor floating tag, when requested
    pub minor_tag: Option<String>,

    /// Per-tag outcomes, major first
    pub outcomes: Vec<TagOutcome>,
}

/// Main floating tag workflow
///
/// 1. Parse the version from `tag` (never from the ref-tag)
/// 2. Stop on a prerelease when asked to and the ref-tag is not separate
/// 3. Resolve the target commit once from the ref-tag
/// 4. Synchronize, push and verify the major tag, then the minor tag
///
/// The major tag output is written as soon as the major tag is done, so it is
/// set even if the minor tag later fails.
///
/// # Errors
///
/// Any fatal error aborts immediately; tags already pushed are left in place.
pub fn run_workflow<R: Repository>(
    inputs: &ActionInputs,
    repo: &R,
    logger: &Logger,
    outputs: &mut ActionOutputs,
) -> Result<WorkflowResult> {
    if logger.is_verbose() {
        logger.info("🔍 Verbose logging enabled");
    }
    logger.debug("Action inputs:");
    logger.debug(format!("  tag: {}", inputs.tag));
    logger.debug(format!("  ref-tag: {}", inputs.commit_ref()));
    logger.debug(format!("  prefix: {}", inputs.prefix));
    logger.debug(format!("  update-minor: {}", inputs.update_minor));
    logger.debug(format!("  ignore-prerelease: {}", inputs.ignore_prerelease));
    logger.debug(format!("  verbose: {}", inputs.verbose));
    logger.debug(format!("  remote: {}", inputs.remote));

    let separate_ref = inputs.uses_separate_ref();
    if separate_ref {
        logger.info(format!(
            "Using ref-tag \"{}\" to find commit SHA (different from version tag \"{}\")",
            inputs.commit_ref(),
            inputs.tag
        ));
        logger.debug("ref-tag is used only to resolve the commit SHA, not parsed for a version");
    }

    logger.info(format!("Extracting version from tag: {}", inputs.tag));
    let version = VersionParser::new(logger).parse(&inputs.tag)?;

    if let Some(prerelease) = &version.prerelease {
        if inputs.ignore_prerelease && !separate_ref {
            logger.warning(format!(
                "Tag {} is a prerelease version ({}). Skipping due to ignore-prerelease=true",
                inputs.tag, prerelease
            ));
            return Err(FloatingTagError::PrereleaseIgnored {
                tag: inputs.tag.clone(),
                prerelease: prerelease.clone(),
            });
        }

        if separate_ref {
            logger.verbose_info(format!(
                "ℹ️  Prerelease version detected in tag \"{}\" but proceeding (using separate ref-tag \"{}\" for commit reference): {}",
                inputs.tag,
                inputs.commit_ref(),
                prerelease
            ));
        } else {
            logger.debug(format!(
                "Prerelease version detected but proceeding (ignore-prerelease=false): {}",
                prerelease
            ));
        }
    }

    let commit = resolve_target_commit(repo, inputs.commit_ref(), logger)?;

    let names = derive_tag_names(
        &inputs.prefix,
        version.major,
        version.minor,
        inputs.update_minor,
    );
    for line in ui::format_plan(&commit, &names) {
        logger.info(line);
    }

    let synchronizer = TagSynchronizer::new(repo, logger, inputs.remote.as_str());
    let mut outcomes = Vec::new();

    // Major first; its output is set before the minor tag is touched.
    for (tag, (kind, output)) in names.in_order().into_iter().zip([
        ("major", MAJOR_TAG_OUTPUT),
        ("minor", MINOR_TAG_OUTPUT),
    ]) {
        logger.info(format!("Creating/updating {} tag: {}", kind, tag));
        let result = synchronizer.process(&TagTarget::new(tag, commit))?;
        set_output(outputs, logger, output, tag)?;
        outcomes.push(TagOutcome {
            tag: tag.to_string(),
            result,
        });
    }

    for line in ui::format_summary(&commit, &outcomes) {
        logger.info(line);
    }
    logger.debug("Action completed successfully");

    Ok(WorkflowResult {
        version,
        commit,
        major_tag: names.major,
        minor_tag: names.minor,
        outcomes,
    })
}

fn set_output(outputs: &mut ActionOutputs, logger: &Logger, name: &str, value: &str) -> Result<()> {
    outputs.set(name, value)?;
    match outputs.path() {
        Some(path) => logger.debug(format!("Wrote output {}={} to {}", name, value, path.display())),
        None => logger.info(format!("Output {}={}", name, value)),
    }
    Ok(())
}

/// Resolve the commit every floating tag of this run will point to.
fn resolve_target_commit<R: Repository>(repo: &R, reference: &str, logger: &Logger) -> Result<Oid> {
    logger.debug(format!("Resolving commit for reference: {}", reference));

    let commit = repo
        .resolve_commit(reference)
        .map_err(|e| FloatingTagError::commit_resolution(reference, e))?;

    logger.verbose_info(format!(
        "Resolved {} to commit {}",
        reference,
        short_sha(&commit)
    ));
    Ok(commit)
}
