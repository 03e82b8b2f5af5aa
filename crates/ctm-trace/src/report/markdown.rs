//! Markdown summary table, suitable for a repository README

use super::timestamp;
use crate::trace::Trace;
use chrono::{DateTime, Utc};
use ctm_mapping::IssueLinks;
use std::fmt::Write as _;

/// Summary options
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Add a column listing each test and its result
    pub verbose: bool,
    /// Delivery version heading
    pub delivery_version: Option<String>,
    /// Footer time; now when unset
    pub generated_at: Option<DateTime<Utc>>,
}

fn result_icon(trace: &Trace) -> &'static str {
    if trace.is_untested() {
        ":heavy_exclamation_mark:"
    } else if trace.is_successful() {
        ":heavy_check_mark:"
    } else {
        ":x:"
    }
}

fn test_column(trace: &Trace) -> String {
    if trace.is_untested() {
        return "Missing".to_string();
    }

    let mut column = String::new();
    for test in &trace.trace_tests {
        let name = if test.method_name.is_empty() {
            test.class_name.clone()
        } else {
            format!("{} - {}", test.class_name, test.method_name)
        };
        let icon = if test.result.is_success() { ":heavy_check_mark:" } else { ":x:" };
        match &test.source_file {
            Some(url) => {
                let _ = write!(column, " * [{name}]({url}) => {icon}<br>");
            }
            None => {
                let _ = write!(column, " * {name} => {icon}<br>");
            }
        }
    }
    column
}

/// Render the summary table
#[must_use]
pub fn render_markdown(traces: &[Trace], links: &IssueLinks, options: &MarkdownOptions) -> String {
    let mut out = String::from("# Traceability Summary Report\n");
    if let Some(version) = options.delivery_version.as_deref().filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "## Delivery Version: {version}");
    }
    out.push('\n');

    if options.verbose {
        out.push_str("Backlog Item | Test result | Test classes\n------------ | ----------- | -----------\n");
    } else {
        out.push_str("Backlog Item | Test result\n------------ | -----------\n");
    }

    for trace in traces {
        let item = &trace.backlog_item;
        let _ = write!(out, "[{}]({}) | {}", item, item.issue_url(links), result_icon(trace));
        if options.verbose {
            let _ = write!(out, " | {}", test_column(trace));
        }
        out.push('\n');
    }
    out.push('\n');

    if traces.is_empty() {
        out.push_str("### No issues traced to automated tests yet.\n\n");
    }

    let _ = writeln!(out, "##### _Report generated {}_", timestamp(options.generated_at));
    out
}
