//! Error types for trace extraction
//!
//! Provides error handling for:
//! - Source scanning (file tree → test backlog entries)
//! - JSON mapping file reading

use std::path::PathBuf;

/// Errors while scanning source trees
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source file could not be read; the checkout is treated as corrupt
    #[error("io error reading {path}: {source}")]
    Io {
        /// Source file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Source tree could not be walked
    #[error("cannot walk source tree {path}: {message}")]
    Walk {
        /// Path being walked
        path: PathBuf,
        /// Walk failure description
        message: String,
    },

    /// No scanner for the configured language
    #[error("sourcecode language for parsing needs to be 'python', 'java', 'javascript' or 'gaugespec', got '{0}'")]
    UnknownLanguage(String),
}

impl ScanError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while reading a JSON mapping file
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Mapping file could not be read
    #[error("io error reading mapping file {path}: {source}")]
    Io {
        /// Mapping file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Mapping file is not a valid mapping document
    #[error("unable to read mapping file {path}, is this a valid JSON mapping file? {source}")]
    InvalidJson {
        /// Mapping file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
