//! Run output - log line formatting and action step outputs.
//!
//! - `formatter` - Pure formatting of the plan and summary
//! - `outputs` - Step outputs written for the CI runner

pub mod formatter;
pub mod outputs;

pub use formatter::{format_outcome, format_plan, format_summary};
pub use outputs::ActionOutputs;

/// Names of the step outputs
pub const MAJOR_TAG_OUTPUT: &str = "majorTag";
pub const MINOR_TAG_OUTPUT: &str = "minorTag";
