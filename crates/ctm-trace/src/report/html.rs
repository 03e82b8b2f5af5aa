//! Human-readable HTML trace report

use super::{timestamp, write_report, DeliveryInfo};
use crate::error::ReportWriteError;
use crate::stats::successful_trace_count;
use crate::trace::Trace;
use chrono::{DateTime, Utc};
use ctm_mapping::IssueLinks;
use std::fmt::Write as _;
use std::path::Path;

const DEFAULT_TITLE: &str = "Full Software Requirement Test Report";

const STYLE: &str = r#"<style>
  body { font-family: Arial, Verdana; }
  table { border-collapse: collapse; }
  h2, h3 { color: #666666; }
  th { border-top: 1px solid #ddd; }
  th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; border-right: 1px solid #ddd; }
  tr:nth-child(even) { background-color: #f2f2f2; }
  .nobullets { list-style-type: none; padding-left: 0; padding-bottom: 0; margin: 0; }
  .notok { background-color: #ffe5e5; padding: 5px; }
  .ok { background-color: #e1f5a9; padding: 5px; }
  .green { color: #4FB810; }
  .red { color: #E35500; }
</style>"#;

/// Page options
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Page title; a default title is used when empty
    pub title: String,
    /// Delivery shown in the page header
    pub delivery: Option<DeliveryInfo>,
    /// Snapshot time; now when unset
    pub generated_at: Option<DateTime<Utc>>,
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn trace_row(out: &mut String, number: usize, trace: &Trace, links: &IssueLinks) {
    let id = escape_html(&trace.backlog_item.id);
    let id = if trace.is_successful() {
        id
    } else {
        format!("<span class=\"notok\">{id}</span>")
    };

    let _ = write!(
        out,
        "<tr><td>{number}</td><td><a href=\"{}\" target=\"_blank\">{id}</a></td><td><ul class=\"nobullets\">",
        escape_html(&trace.backlog_item.issue_url(links))
    );

    if trace.is_untested() {
        out.push_str("<li class=\"notok\"><b>Missing</b></li>");
    }
    for test in &trace.trace_tests {
        if test.result.is_success() {
            out.push_str("<li class=\"ok\"><b>OK</b>: ");
        } else {
            out.push_str("<li class=\"notok\"><b>not OK</b>: ");
        }
        let name = escape_html(&test.full_name());
        match &test.source_file {
            Some(url) => {
                let _ = write!(out, "<a href=\"{}\" target=\"_blank\">{name}</a>", escape_html(url));
            }
            None => out.push_str(&name),
        }
        out.push_str("</li>");
    }

    out.push_str("</ul></td></tr>\n");
}

/// Render the HTML report page
#[must_use]
pub fn render_html(traces: &[Trace], links: &IssueLinks, options: &HtmlOptions) -> String {
    let title = if options.title.is_empty() {
        DEFAULT_TITLE
    } else {
        options.title.as_str()
    };
    let title = escape_html(title);
    let successful = successful_trace_count(traces);
    let count_class = if successful == traces.len() { "green" } else { "red" };

    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{STYLE}\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    if let Some(delivery) = &options.delivery {
        let _ = writeln!(
            out,
            "<h2>Program: <i>{}</i> Delivery: <i>{}</i></h2>",
            escape_html(&delivery.program),
            escape_html(&delivery.version)
        );
    }

    let _ = write!(
        out,
        "<div><h3>Total number of requirements: {}<br/>\nTotal number of successful requirements: <span class=\"{count_class}\">{successful}</span></h3></div>\n",
        traces.len()
    );
    let _ = writeln!(
        out,
        "<p><i>Snapshot taken: {}</i></p>\n<hr/>",
        timestamp(options.generated_at)
    );

    out.push_str("<table>\n<tr><th>#</th><th>Backlog ID</th><th>Test Mapping</th></tr>\n");
    for (i, trace) in traces.iter().enumerate() {
        trace_row(&mut out, i + 1, trace, links);
    }
    out.push_str("</table>\n");

    if traces.is_empty() {
        out.push_str("<div><h2><span class=\"red\"><b>No issues traced to automated tests yet.</b></span></h2></div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Render and write the HTML report
pub fn write_html_report(
    path: &Path,
    traces: &[Trace],
    links: &IssueLinks,
    options: &HtmlOptions,
) -> Result<(), ReportWriteError> {
    write_report(path, &render_html(traces, links, options))
}
