//! Reconciliation of declared tests with executed test cases

use crate::trace::{Trace, TraceTest};
use ctm_mapping::{BacklogReference, TestBacklogEntry};
use ctm_testreport::TestSuite;
use std::collections::HashMap;
use std::time::Instant;

/// Build one trace per referenced backlog item that has matching executions
///
/// Every executed case matching an entry is recorded under each of the
/// entry's references. Traces are sorted by tracker, then id. Entries
/// without matches contribute nothing.
#[must_use]
pub fn build_traces(suites: &[TestSuite], entries: &[TestBacklogEntry]) -> Vec<Trace> {
    let started = Instant::now();
    let mut traces: Vec<Trace> = Vec::new();
    let mut index: HashMap<BacklogReference, usize> = HashMap::new();

    for entry in entries {
        for case in suites.iter().flat_map(|s| s.test_cases.iter()) {
            if !entry.matches(case) {
                continue;
            }

            let test = TraceTest::from_case(entry.test.file_url.clone(), case);
            for reference in &entry.backlog_references {
                let position = *index.entry(reference.clone()).or_insert_with(|| {
                    traces.push(Trace::placeholder(reference.clone()));
                    traces.len() - 1
                });
                traces[position].trace_tests.push(test.clone());
            }
        }
    }

    traces.sort_by(|a, b| a.backlog_item.cmp(&b.backlog_item));
    tracing::info!(traces = traces.len(), "Create traces took {:?}", started.elapsed());
    traces
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctm_test_utils::{case, entry, reference, suite};
    use ctm_testreport::TestResult;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_matches_no_traces() {
        let suites = vec![suite("s", vec![case("a.B", "other", TestResult::Success)])];
        let entries = vec![entry("a.B", "m", "Jira:PROJ-1")];
        assert!(build_traces(&suites, &entries).is_empty());
    }

    #[test]
    fn two_matches_in_one_trace() {
        let suites = vec![
            suite("s1", vec![case("a.B", "m", TestResult::Success)]),
            suite("s2", vec![case("a.B", "m", TestResult::Failure)]),
        ];
        let traces = build_traces(&suites, &[entry("a.B", "m", "Jira:PROJ-1")]);

        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].backlog_item, reference("Jira:PROJ-1"));
        let results: Vec<TestResult> = traces[0].trace_tests.iter().map(|t| t.result).collect();
        assert_eq!(results, vec![TestResult::Success, TestResult::Failure]);
    }

    #[test]
    fn match_is_recorded_for_every_reference() {
        let suites = vec![suite("s", vec![case("a.B", "m", TestResult::Success)])];
        let traces = build_traces(&suites, &[entry("a.B", "m", "Jira:PROJ-1, GitHub:o/r#2")]);

        assert_eq!(traces.len(), 2);
        assert!(traces.iter().all(|t| t.trace_tests.len() == 1));
    }

    #[test]
    fn whole_class_entry_collects_all_methods() {
        let suites = vec![suite(
            "s",
            vec![case("a.B", "x", TestResult::Success), case("a.B", "y", TestResult::Success)],
        )];
        let traces = build_traces(&suites, &[entry("a.B", "", "Jira:PROJ-1")]);
        assert_eq!(traces[0].trace_tests.len(), 2);
    }

    #[test]
    fn sorted_by_tracker_then_id() {
        let suites = vec![suite("s", vec![case("a.B", "m", TestResult::Success)])];
        let entries = vec![
            entry("a.B", "m", "Jira:PROJ-2"),
            entry("a.B", "m", "GitHub:o/r#9"),
            entry("a.B", "m", "Jira:PROJ-1"),
            entry("a.B", "m", "GitHub:o/r#1"),
        ];
        let ids: Vec<String> = build_traces(&suites, &entries)
            .iter()
            .map(|t| t.backlog_item.to_string())
            .collect();
        assert_eq!(ids, vec!["GitHub:o/r#1", "GitHub:o/r#9", "Jira:PROJ-1", "Jira:PROJ-2"]);
    }

    #[test]
    fn source_link_comes_from_entry() {
        let suites = vec![suite("s", vec![case("a.B", "m", TestResult::Success)])];
        let mut declared = entry("a.B", "m", "Jira:PROJ-1");
        declared.test.file_url = Some("https://github.com/o/r/blob/main/B.java".to_string());

        let traces = build_traces(&suites, &[declared]);
        assert_eq!(
            traces[0].trace_tests[0].source_file.as_deref(),
            Some("https://github.com/o/r/blob/main/B.java")
        );
        assert_eq!(traces[0].trace_tests[0].report_file, std::path::PathBuf::from("report.xml"));
    }
}
