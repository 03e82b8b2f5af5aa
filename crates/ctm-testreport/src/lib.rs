//! CTM Test Report
//!
//! Reads test execution reports into a normalized suite/case structure.
//!
//! # Overview
//!
//! - **TestCase**: one executed test with its outcome and the report it came from
//! - **TestSuite**: named collection of test cases
//! - **XunitReader**: recursive reader for xUnit-style XML reports
//!
//! # Example
//!
//! ```rust
//! use ctm_testreport::{parse_report, TestResult};
//! use std::path::Path;
//!
//! let xml = r#"<testsuite name="s"><testcase classname="a.B" name="m"/></testsuite>"#;
//! let suites = parse_report(Path::new("report.xml"), xml);
//!
//! assert_eq!(suites.len(), 1);
//! assert_eq!(suites[0].test_cases[0].result, TestResult::Success);
//! ```

#![warn(missing_docs)]

pub mod case;
pub mod error;
pub mod xunit;

// Re-exports
pub use case::{TestCase, TestResult, TestSuite};
pub use error::ReportError;
pub use xunit::{parse_report, ReportKind, XunitReader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
