//! Error types for report reading

use std::path::PathBuf;

/// Errors while reading test reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Report file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Report file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Report directory could not be walked
    #[error("cannot walk report directory {path}: {message}")]
    Walk {
        /// Directory being walked
        path: PathBuf,
        /// Walk failure description
        message: String,
    },
}

impl ReportError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
