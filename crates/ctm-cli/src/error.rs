//! Error types for configuration and runs

use ctm_mapping::{MappingError, ScanError};
use ctm_testreport::ReportError;
use ctm_trace::{CacheError, ReportWriteError};
use std::path::PathBuf;

/// Errors while loading or validating the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read, or a directory could not be created
    #[error("io error on {path}: {source}")]
    Io {
        /// File or directory
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration or delivery file is not valid JSON for its schema
    #[error("unable to read {path}, is this a valid JSON file? {source}")]
    InvalidJson {
        /// File
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A configured path does not exist
    #[error("given {what} does not exist (given path was: {path})")]
    MissingPath {
        /// What the path was configured as
        what: &'static str,
        /// Configured path
        path: PathBuf,
    },

    /// A test report directory has no entries
    #[error("test report directory is empty (given test report directory was: {0})")]
    EmptyReportDir(PathBuf),

    /// Neither a mapping file nor source code is configured
    #[error("no mapping file and no sourcecode repository given")]
    NoSources,

    /// A source checkout is not available locally
    #[error("sourcecode for {repository} is not checked out locally (expected at '{path}')")]
    MissingSourceCheckout {
        /// Repository name, or the local path when no git coordinates are set
        repository: String,
        /// Configured local path
        path: PathBuf,
    },

    /// Delivery version cannot be used in a report file name
    #[error("delivery version '{0}' cannot be used as a report name")]
    InvalidDeliveryVersion(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors aborting a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Source scanning failed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Mapping file could not be used
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Test reports could not be read
    #[error(transparent)]
    Report(#[from] ReportError),

    /// A report could not be written
    #[error(transparent)]
    Write(#[from] ReportWriteError),

    /// The comment cache could not be read
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The configuration does not allow the run
    #[error(transparent)]
    Config(#[from] ConfigError),
}
