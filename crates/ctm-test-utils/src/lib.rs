//! Testing utilities for CTM workspace
//!
//! Shared builders and fixtures.

#![allow(missing_docs)]

use ctm_mapping::{parse_backlog_references, BacklogReference, TestBacklogEntry, TestIdentity};
use ctm_testreport::{TestCase, TestResult, TestSuite};
use std::path::Path;

/// Executed test case read from `report.xml`
pub fn case(class: &str, method: &str, result: TestResult) -> TestCase {
    TestCase::new("report.xml", class, method, result)
}

pub fn suite(name: &str, cases: Vec<TestCase>) -> TestSuite {
    TestSuite::new(name, cases)
}

/// Single reference from `Tracker:id` notation
pub fn reference(marker: &str) -> BacklogReference {
    parse_backlog_references(marker)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("not a backlog reference: {marker}"))
}

/// Declared test with references in `Tracker:id, ...` notation
pub fn entry(class: &str, method: &str, references: &str) -> TestBacklogEntry {
    TestBacklogEntry::new(TestIdentity::new(class, method), parse_backlog_references(references))
}

/// Write `(relative path, content)` pairs below `root`, creating directories
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
}

/// Minimal xUnit report with one suite
pub fn xunit_report(suite: &str, cases: &[(&str, &str, TestResult)]) -> String {
    let mut xml = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{suite}\" tests=\"{}\">\n", cases.len());
    for (class, method, result) in cases {
        let child = match result {
            TestResult::Success => "",
            TestResult::Failure => "<failure message=\"assertion failed\"/>",
            TestResult::Error => "<error message=\"boom\"/>",
            TestResult::Skipped => "<skipped/>",
        };
        xml.push_str(&format!("  <testcase classname=\"{class}\" name=\"{method}\">{child}</testcase>\n"));
    }
    xml.push_str("</testsuite>\n");
    xml
}
