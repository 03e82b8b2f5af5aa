//! Error types for report output and the comment cache

use std::path::PathBuf;

/// Errors while writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportWriteError {
    /// Report file could not be written
    #[error("io error writing report {path}: {source}")]
    Io {
        /// Report file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportWriteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while reading or writing the comment cache
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Cache file could not be read or written
    #[error("io error on comment cache {path}: {source}")]
    Io {
        /// Cache file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
