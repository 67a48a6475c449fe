//! Command-line facing workflow

pub mod orchestration;

pub use orchestration::{run_workflow, WorkflowResult};
