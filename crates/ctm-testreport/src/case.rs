//! Normalized test execution records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of one executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Test passed
    #[default]
    Success,
    /// Test assertion failed
    Failure,
    /// Test raised an unexpected error
    Error,
    /// Test was not executed
    Skipped,
}

impl TestResult {
    /// Whether the test passed
    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        self == TestResult::Success
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestResult::Success => "success",
            TestResult::Failure => "failure",
            TestResult::Error => "error",
            TestResult::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// One executed test case, as read from a report file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Report file the case was read from
    pub report_file: PathBuf,
    /// Test class (or spec) name
    pub class_name: String,
    /// Test method (or scenario) name
    pub method_name: String,
    /// Execution outcome
    pub result: TestResult,
}

impl TestCase {
    /// Create a test case
    #[must_use]
    pub fn new(
        report_file: impl Into<PathBuf>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        result: TestResult,
    ) -> Self {
        Self {
            report_file: report_file.into(),
            class_name: class_name.into(),
            method_name: method_name.into(),
            result,
        }
    }
}

/// Named collection of executed test cases
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Skip count declared on the suite element
    pub declared_skipped: u32,
    /// Executed test cases in report order
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create a suite
    #[must_use]
    pub fn new(name: impl Into<String>, test_cases: Vec<TestCase>) -> Self {
        Self {
            name: name.into(),
            declared_skipped: 0,
            test_cases,
        }
    }

    /// Report file of the first test case, if any
    #[must_use]
    pub fn first_report_file(&self) -> Option<&PathBuf> {
        self.test_cases.first().map(|c| &c.report_file)
    }

    /// Whether the suite has no test cases
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// Whether `other` describes the same suite
    ///
    /// Same name, same case count and same first report file.
    #[must_use]
    pub fn same_suite_as(&self, other: &TestSuite) -> bool {
        self.name == other.name
            && self.test_cases.len() == other.test_cases.len()
            && self.first_report_file() == other.first_report_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_display() {
        assert_eq!(TestResult::Success.to_string(), "success");
        assert_eq!(TestResult::Skipped.to_string(), "skipped");
    }

    #[test]
    fn same_suite_requires_same_first_report() {
        let a = TestSuite::new("s", vec![TestCase::new("a.xml", "C", "m", TestResult::Success)]);
        let b = TestSuite::new("s", vec![TestCase::new("a.xml", "C", "m", TestResult::Failure)]);
        let c = TestSuite::new("s", vec![TestCase::new("b.xml", "C", "m", TestResult::Success)]);

        assert!(a.same_suite_as(&b));
        assert!(!a.same_suite_as(&c));
    }

    #[test]
    fn empty_suites_compare_by_name() {
        let a = TestSuite::new("s", Vec::new());
        let b = TestSuite::new("s", Vec::new());
        assert!(a.is_empty());
        assert!(a.same_suite_as(&b));
    }
}
