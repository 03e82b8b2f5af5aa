//! CTM command line tool
//!
//! Loads the JSON configuration, collects declared tests (from annotated
//! sources or a mapping file) and executed tests (from xUnit reports), and
//! writes HTML, JSON and Markdown trace reports.
//!
//! # Example
//!
//! ```rust,no_run
//! use ctm_cli::{run, Config, RunOptions};
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("./myConfig.json"))?;
//! let summary = run(&config, RunOptions::default())?;
//! println!("{} backlog items traced", summary.traces.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

// Re-exports
pub use cli::{command, CliArgs};
pub use config::Config;
pub use error::{ConfigError, PipelineError};
pub use logging::{init_logging, LogHandle};
pub use pipeline::{merge_suites, run, RunOptions, RunSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
