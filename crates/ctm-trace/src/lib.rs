//! CTM Trace
//!
//! Reconciles declared tests with executed test cases and reports the
//! result per backlog item.
//!
//! # Overview
//!
//! - [`build_traces`]: one [`Trace`] per backlog item with matching executions
//! - [`filter_delivery`] / [`backfill_placeholders`]: per-delivery views
//! - [`report`]: JSON, HTML and Markdown renderers, mapping export
//! - [`CommentCache`]: backlog items already linked to their results
//!
//! # Example
//!
//! ```rust
//! use ctm_mapping::{BacklogReference, TestBacklogEntry, TestIdentity};
//! use ctm_testreport::{TestCase, TestResult, TestSuite};
//! use ctm_trace::build_traces;
//!
//! let suites = vec![TestSuite::new("s", vec![TestCase::new("r.xml", "a.B", "m", TestResult::Success)])];
//! let entries = vec![TestBacklogEntry::new(
//!     TestIdentity::new("a.B", "m"),
//!     vec![BacklogReference::jira("PROJ-1")],
//! )];
//!
//! let traces = build_traces(&suites, &entries);
//! assert_eq!(traces.len(), 1);
//! assert!(traces[0].is_successful());
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod comment_cache;
pub mod delivery;
pub mod error;
pub mod report;
pub mod stats;
pub mod trace;

// Re-exports
pub use builder::build_traces;
pub use comment_cache::{CommentCache, CACHE_FILE_NAME};
pub use delivery::{backfill_placeholders, filter_delivery};
pub use error::{CacheError, ReportWriteError};
pub use report::DeliveryInfo;
pub use stats::{successful_trace_count, unsuccessful_trace_count};
pub use trace::{Trace, TraceTest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
