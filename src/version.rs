use crate::domain::version::parse_with_extraction;
use crate::domain::VersionInfo;
use crate::error::Result;
use crate::logger::Logger;

/// Parses release tags into [VersionInfo], reporting what it found.
///
/// With a verbose logger every step is reported as an info line; otherwise the
/// same detail goes to the debug channel.
pub struct VersionParser<'a> {
    logger: &'a Logger,
}

impl<'a> VersionParser<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        VersionParser { logger }
    }

    /// Parses a version from a release tag.
    ///
    /// # Arguments
    /// * `tag` - Tag to parse (e.g., "v1.2.3", "refs/tags/1.2.3-rc.1", "release-5.1.0")
    ///
    /// # Returns
    /// * `Ok(VersionInfo)` - Parsed version components
    /// * `Err(InvalidVersionFormat)` - If no `major.minor.patch` can be located
    pub fn parse(&self, tag: &str) -> Result<VersionInfo> {
        self.detail(&format!("Parsing version from tag: {}", tag));

        let (info, extraction) = parse_with_extraction(tag)?;

        if extraction.had_v_prefix {
            self.detail("Detected 'v' prefix, stripped for parsing");
        }
        if let Some(matched) = &extraction.trailing_match {
            self.detail(&format!(
                "Extracted version from custom prefix tag: {}",
                matched
            ));
        }

        self.detail("Parsed version components:");
        self.detail(&format!("  Major: {}", info.major));
        self.detail(&format!("  Minor: {}", info.minor));
        self.detail(&format!("  Patch: {}", info.patch));
        self.detail(&format!(
            "  Prerelease: {}",
            info.prerelease.as_deref().unwrap_or("none")
        ));
        self.detail(&format!(
            "  Build: {}",
            info.build.as_deref().unwrap_or("none")
        ));
        self.detail(&format!("  Is Prerelease: {}", info.is_prerelease()));

        Ok(info)
    }

    fn detail(&self, message: &str) {
        if self.logger.is_verbose() {
            self.logger.info(format!("  → {}", message));
        } else {
            self.logger.debug(message);
        }
    }
}
