pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logger;
pub mod sync;
pub mod ui;
pub mod version;

pub use error::{FloatingTagError, Result};
pub use logger::Logger;
