//! Shared plumbing for the lumen workspace.

pub mod logging;

pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};

// Re-export log so downstream crates can use lumen_base::log::*
pub use log;
