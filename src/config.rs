use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FloatingTagError, Result};

/// File looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "floating-tags.toml";

/// Environment variables that switch the runner into step debug mode
pub const DEBUG_ENV_VARS: [&str; 3] = ["ACTIONS_STEP_DEBUG", "ACTIONS_RUNNER_DEBUG", "RUNNER_DEBUG"];

/// Set to `true` by GitHub Actions runners
pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Represents the complete configuration file for floating-tags.
///
/// Every value here is a default; inputs given on the command line or through
/// the action environment take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_prefix() -> String {
    "v".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

/// Which floating tags are managed and how they are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub update_minor: bool,

    #[serde(default)]
    pub ignore_prerelease: bool,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            prefix: default_prefix(),
            update_minor: false,
            ignore_prerelease: false,
        }
    }
}

/// Remote the floating tags are pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `floating-tags.toml` in current directory
/// 3. `.floating-tags.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            FloatingTagError::config(format!("cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Parse a boolean action input.
///
/// Accepts the YAML core-schema spellings (`true`, `True`, `TRUE`, and the
/// `false` equivalents) plus `1` and `0`. An empty value means false.
pub fn parse_bool_input(value: &str) -> std::result::Result<bool, String> {
    match value.trim() {
        "" | "false" | "False" | "FALSE" | "0" => Ok(false),
        "true" | "True" | "TRUE" | "1" => Ok(true),
        other => Err(format!(
            "invalid boolean '{}': expected one of true | True | TRUE | false | False | FALSE",
            other
        )),
    }
}

/// `true` or `1`, case-insensitive, surrounding whitespace ignored.
pub fn is_truthy(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1"
        }
        None => false,
    }
}

/// Whether the runner asked for step debug output.
pub fn detect_debug_mode() -> bool {
    DEBUG_ENV_VARS
        .iter()
        .any(|name| is_truthy(std::env::var(name).ok().as_deref()))
}

/// Whether the process runs as a GitHub Actions step.
pub fn running_in_actions() -> bool {
    is_truthy(std::env::var(GITHUB_ACTIONS_ENV).ok().as_deref())
}

/// Raw inputs as given on the command line or by the action runner.
///
/// `None` means "not provided", letting the config file or defaults decide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOverrides {
    pub tag: Option<String>,
    pub ref_tag: Option<String>,
    pub prefix: Option<String>,
    pub update_minor: Option<bool>,
    pub ignore_prerelease: Option<bool>,
    pub verbose: Option<bool>,
    pub remote: Option<String>,
}

/// Validated inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInputs {
    /// Tag the version is parsed from
    pub tag: String,
    /// Separately provided reference used only to resolve the commit
    pub ref_tag: Option<String>,
    pub prefix: String,
    pub update_minor: bool,
    pub ignore_prerelease: bool,
    pub verbose: bool,
    pub debug: bool,
    pub remote: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ActionInputs {
    /// Inputs for `tag` with every other setting at its default
    pub fn new(tag: impl Into<String>) -> Self {
        let config = Config::default();
        ActionInputs {
            tag: tag.into(),
            ref_tag: None,
            prefix: config.tags.prefix,
            update_minor: false,
            ignore_prerelease: false,
            verbose: false,
            debug: false,
            remote: config.remote.name,
        }
    }

    /// Merge raw inputs over the config file values.
    ///
    /// Empty strings count as not provided. Debug mode forces verbose.
    pub fn resolve(overrides: InputOverrides, config: &Config, debug: bool) -> Result<Self> {
        let tag = non_empty(overrides.tag)
            .ok_or_else(|| FloatingTagError::config("Input required and not supplied: tag"))?;

        let prefix = non_empty(overrides.prefix)
            .or_else(|| non_empty(Some(config.tags.prefix.clone())))
            .unwrap_or_else(default_prefix);

        let remote = non_empty(overrides.remote)
            .or_else(|| non_empty(Some(config.remote.name.clone())))
            .unwrap_or_else(default_remote_name);

        let verbose = overrides.verbose.unwrap_or(config.logging.verbose);

        Ok(ActionInputs {
            tag,
            ref_tag: non_empty(overrides.ref_tag),
            prefix,
            update_minor: overrides.update_minor.unwrap_or(config.tags.update_minor),
            ignore_prerelease: overrides
                .ignore_prerelease
                .unwrap_or(config.tags.ignore_prerelease),
            verbose: verbose || debug,
            debug,
            remote,
        })
    }

    /// Reference the target commit is resolved from; never parsed for a version.
    pub fn commit_ref(&self) -> &str {
        self.ref_tag.as_deref().unwrap_or(&self.tag)
    }

    /// A ref-tag was provided and differs from the version tag.
    pub fn uses_separate_ref(&self) -> bool {
        matches!(&self.ref_tag, Some(reference) if reference != &self.tag)
    }

    pub fn with_ref_tag(mut self, ref_tag: impl Into<String>) -> Self {
        self.ref_tag = non_empty(Some(ref_tag.into()));
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_update_minor(mut self, update_minor: bool) -> Self {
        self.update_minor = update_minor;
        self
    }

    pub fn with_ignore_prerelease(mut self, ignore_prerelease: bool) -> Self {
        self.ignore_prerelease = ignore_prerelease;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose || self.debug;
        self
    }
}
