//! Run-scoped logging handle.
//!
//! A [Logger] is created once in `main` from the resolved inputs and handed by
//! reference to every component. It carries the two verbosity capabilities of
//! the run and forwards lines to `tracing`; the subscriber itself is installed
//! by the binary.
//!
//! On a GitHub Actions runner, warnings and errors are written as `::warning::`
//! and `::error::` workflow commands so the run page annotates them.

use std::borrow::Cow;

use tracing::{debug, error, info, warn};

/// Logging sink with verbose and debug capabilities.
///
/// - `verbose_info` is for operational detail (parsed components, plan) and is
///   only emitted when verbose.
/// - `debug` is for data dumps; in debug mode it is promoted to info level with
///   a `[DEBUG]` prefix, otherwise it goes to tracing's debug level.
///
/// Debug mode implies verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logger {
    verbose: bool,
    debug: bool,
    annotations: bool,
}

impl Logger {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Logger {
            verbose: verbose || debug,
            debug,
            annotations: false,
        }
    }

    /// Emit warnings and errors as workflow commands
    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.annotations = enabled;
        self
    }

    pub fn info(&self, message: impl AsRef<str>) {
        info!("{}", message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        warn!("{}", self.annotate("warning", message.as_ref()));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        error!("{}", self.annotate("error", message.as_ref()));
    }

    /// Log operational detail, only when verbose
    pub fn verbose_info(&self, message: impl AsRef<str>) {
        if self.verbose {
            info!("{}", message.as_ref());
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        if self.debug {
            info!("[DEBUG] {}", message.as_ref());
        } else {
            debug!("{}", message.as_ref());
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn annotate<'m>(&self, command: &str, message: &'m str) -> Cow<'m, str> {
        if self.annotations {
            Cow::Owned(format!("::{}::{}", command, escape_command_data(message)))
        } else {
            Cow::Borrowed(message)
        }
    }
}

/// A workflow command must stay on one line; `%`, CR and LF are percent-encoded.
fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
