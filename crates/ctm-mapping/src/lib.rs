//! CTM Mapping
//!
//! Recovers which automated tests verify which backlog items.
//!
//! # Overview
//!
//! - [`BacklogReference`]: an issue in GitHub or Jira, parsed from
//!   `Trace(...)` markers by [`parse_backlog_references`]
//! - [`TestBacklogEntry`]: a declared test with its references and the
//!   [`TestCaseMatcher`] used against executed test cases
//! - [`SourceScanner`]: per-language line scanners (see [`Language`])
//! - [`read_mapping_file`]: JSON mapping files for tests without markers
//!
//! # Example
//!
//! ```rust
//! use ctm_mapping::{BacklogReference, Language, ScanFile};
//!
//! let source = "package p;\n// Trace(Jira:PROJ-1)\nclass T {\n    @Test public void m(){}\n}\n";
//! let entries = Language::Java.scanner().scan_content(source, &ScanFile::detached("p/T.java"));
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].test.to_string(), "p.T.m");
//! assert_eq!(entries[0].backlog_references, vec![BacklogReference::jira("PROJ-1")]);
//! ```

#![warn(missing_docs)]

pub mod backlog;
pub mod error;
pub mod identity;
pub mod mapping_file;
pub mod matcher;
pub mod scanners;
pub mod source_url;

// Re-exports
pub use backlog::{contains_marker, parse_backlog_references, BacklogReference, BacklogSource, IssueLinks};
pub use error::{MappingError, ScanError};
pub use identity::{TestBacklogEntry, TestIdentity};
pub use mapping_file::{parse_mapping, read_mapping_file, FileLocation, MappingEntry};
pub use matcher::TestCaseMatcher;
pub use scanners::{Language, ScanFile, SourceScanner};
pub use source_url::{source_url, GitCoordinates, SourceCoordinates};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
