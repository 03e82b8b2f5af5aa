//! Reconciled traces: backlog items with the executed tests that verify them

use ctm_mapping::BacklogReference;
use ctm_testreport::{TestCase, TestResult};
use std::path::PathBuf;

/// One execution of a declared test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceTest {
    /// Link to the test source, when known
    pub source_file: Option<String>,
    /// Report the execution was read from
    pub report_file: PathBuf,
    /// Executed class name
    pub class_name: String,
    /// Executed method name
    pub method_name: String,
    /// Outcome
    pub result: TestResult,
}

impl TraceTest {
    /// Execution of `case`, declared in `source_file`
    #[must_use]
    pub fn from_case(source_file: Option<String>, case: &TestCase) -> Self {
        Self {
            source_file,
            report_file: case.report_file.clone(),
            class_name: case.class_name.clone(),
            method_name: case.method_name.clone(),
            result: case.result,
        }
    }

    /// `class.method`, or just the class for whole-class tests
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.method_name.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.class_name, self.method_name)
        }
    }
}

/// A backlog item and every execution of the tests that reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Backlog item
    pub backlog_item: BacklogReference,
    /// Matched executions; empty when the item was referenced but never run
    pub trace_tests: Vec<TraceTest>,
}

impl Trace {
    /// Trace without executions
    #[must_use]
    pub fn placeholder(backlog_item: BacklogReference) -> Self {
        Self {
            backlog_item,
            trace_tests: Vec::new(),
        }
    }

    /// No test execution verifies this item
    #[inline]
    #[must_use]
    pub fn is_untested(&self) -> bool {
        self.trace_tests.is_empty()
    }

    /// At least one execution, and all of them succeeded
    #[must_use]
    pub fn is_successful(&self) -> bool {
        !self.is_untested() && self.trace_tests.iter().all(|t| t.result.is_success())
    }
}
