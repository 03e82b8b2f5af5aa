//! Machine-readable trace report
//!
//! ```json
//! {
//!     "PROJ-1": {
//!         "link": "https://jira.example/browse/PROJ-1",
//!         "test_cases": [
//!             {
//!                 "test_fullname": "a.B.m",
//!                 "test_name": "m",
//!                 "test_class": "a.B",
//!                 "passed": true,
//!                 "skipped": false
//!             }
//!         ]
//!     }
//! }
//! ```

use super::{to_pretty_json, write_report};
use crate::error::ReportWriteError;
use crate::trace::{Trace, TraceTest};
use ctm_mapping::IssueLinks;
use ctm_testreport::TestResult;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct JsonTrace<'a> {
    link: String,
    test_cases: Vec<JsonTestCase<'a>>,
}

#[derive(Serialize)]
struct JsonTestCase<'a> {
    test_fullname: String,
    test_name: &'a str,
    test_class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_source: Option<&'a str>,
    passed: bool,
    skipped: bool,
}

impl<'a> From<&'a TraceTest> for JsonTestCase<'a> {
    fn from(test: &'a TraceTest) -> Self {
        Self {
            test_fullname: test.full_name(),
            test_name: &test.method_name,
            test_class: &test.class_name,
            test_source: test.source_file.as_deref(),
            passed: test.result == TestResult::Success,
            skipped: test.result == TestResult::Skipped,
        }
    }
}

/// Render traces as a JSON object keyed by backlog id, in trace order
pub fn render_json(traces: &[Trace], links: &IssueLinks) -> Result<String, ReportWriteError> {
    let report: IndexMap<&str, JsonTrace<'_>> = traces
        .iter()
        .map(|trace| {
            (
                trace.backlog_item.id.as_str(),
                JsonTrace {
                    link: trace.backlog_item.issue_url(links),
                    test_cases: trace.trace_tests.iter().map(JsonTestCase::from).collect(),
                },
            )
        })
        .collect();

    to_pretty_json(&report)
}

/// Render and write the JSON report
pub fn write_json_report(path: &Path, traces: &[Trace], links: &IssueLinks) -> Result<(), ReportWriteError> {
    write_report(path, &render_json(traces, links)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctm_test_utils::{case, reference};
    use pretty_assertions::assert_eq;

    fn links() -> IssueLinks {
        IssueLinks::new("https://github.com", "https://jira.example")
    }

    #[test]
    fn renders_tests_and_links() {
        let mut trace = Trace::placeholder(reference("Jira:PROJ-1"));
        let mut passing = TraceTest::from_case(None, &case("a.B", "m", TestResult::Success));
        passing.source_file = Some("https://github.com/o/r/blob/main/B.java".to_string());
        trace.trace_tests.push(passing);
        trace
            .trace_tests
            .push(TraceTest::from_case(None, &case("Spec", "", TestResult::Skipped)));

        let text = render_json(&[trace], &links()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["PROJ-1"]["link"], "https://jira.example/browse/PROJ-1");
        let cases = value["PROJ-1"]["test_cases"].as_array().unwrap();
        assert_eq!(cases[0]["test_fullname"], "a.B.m");
        assert_eq!(cases[0]["test_source"], "https://github.com/o/r/blob/main/B.java");
        assert_eq!(cases[0]["passed"], true);
        assert_eq!(cases[1]["test_fullname"], "Spec");
        assert_eq!(cases[1]["passed"], false);
        assert_eq!(cases[1]["skipped"], true);
        assert!(cases[1].get("test_source").is_none());
    }

    #[test]
    fn keeps_trace_order_and_placeholders() {
        let traces = vec![
            Trace::placeholder(reference("GitHub:o/r#2")),
            Trace::placeholder(reference("Jira:A-1")),
        ];
        let text = render_json(&traces, &links()).unwrap();

        assert!(text.find("o/r#2").unwrap() < text.find("A-1").unwrap());
        assert!(text.contains("\"link\": \"https://github.com/o/r/issues/2\""));
        assert!(text.contains("\"test_cases\": []"));
    }

    #[test]
    fn empty_report() {
        assert_eq!(render_json(&[], &links()).unwrap(), "{}\n");
    }
}
