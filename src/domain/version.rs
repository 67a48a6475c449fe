use crate::error::{FloatingTagError, Result};
use std::fmt;
use std::str::FromStr;

/// Full-string pattern tried after the conventional prefixes are stripped.
const EXACT_VERSION_PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)(?:-([^+]+))?(?:\+(.+))?$";

/// Same pattern anchored only at the end, for tags such as `release-5.1.0`.
const TRAILING_VERSION_PATTERN: &str = r"(\d+)\.(\d+)\.(\d+)(?:-([^+]+))?(?:\+(.+))?$";

/// Semantic version fields extracted from a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// The tag exactly as it was handed in
    pub original: String,
    /// Text after `-` and before any `+`
    pub prerelease: Option<String>,
    /// Text after `+`
    pub build: Option<String>,
}

/// How the version was located inside the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// A leading `v` was stripped before matching
    pub had_v_prefix: bool,
    /// Set when the strict match failed and the version was taken from the end
    /// of the tag; holds the matched text.
    pub trailing_match: Option<String>,
}

impl VersionInfo {
    /// Parse a tag such as `v1.2.3`, `1.2.3-rc.1+b5`, `refs/tags/v1.2.3` or
    /// `release-5.1.0`.
    pub fn parse(tag: &str) -> Result<Self> {
        parse_with_extraction(tag).map(|(info, _)| info)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl FromStr for VersionInfo {
    type Err = FloatingTagError;

    fn from_str(s: &str) -> Result<Self> {
        VersionInfo::parse(s)
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Parse a tag and report how the version was found.
///
/// Strips `refs/tags/`, then a single leading `v`, then tries a strict
/// full-string match. When that fails the version is taken from the end of the
/// remaining text, so arbitrary textual prefixes are discarded.
pub fn parse_with_extraction(tag: &str) -> Result<(VersionInfo, Extraction)> {
    let mut candidate = tag.strip_prefix("refs/tags/").unwrap_or(tag);

    let had_v_prefix = candidate.starts_with('v');
    if had_v_prefix {
        candidate = &candidate[1..];
    }

    let exact = regex::Regex::new(EXACT_VERSION_PATTERN)
        .map_err(|e| FloatingTagError::config(format!("version pattern: {}", e)))?;
    let trailing = regex::Regex::new(TRAILING_VERSION_PATTERN)
        .map_err(|e| FloatingTagError::config(format!("version pattern: {}", e)))?;

    let (captures, trailing_match) = match exact.captures(candidate) {
        Some(captures) => (captures, None),
        None => match trailing.captures(candidate) {
            Some(captures) => {
                let matched = captures.get(0).map(|m| m.as_str().to_string());
                (captures, matched)
            }
            None => return Err(FloatingTagError::invalid_version(tag)),
        },
    };

    // Components are unbounded digit runs; only values past u64 are rejected.
    let number = |index: usize| -> Result<u64> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(|| FloatingTagError::invalid_version(tag))
    };

    let info = VersionInfo {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3)?,
        original: tag.to_string(),
        prerelease: captures.get(4).map(|m| m.as_str().to_string()),
        build: captures.get(5).map(|m| m.as_str().to_string()),
    };

    Ok((
        info,
        Extraction {
            had_v_prefix,
            trailing_match,
        },
    ))
}
