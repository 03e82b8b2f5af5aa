//! Report rendering
//!
//! All renderers are pure functions from traces to text; the `write_*`
//! helpers put the text on disk.

pub mod html;
pub mod json;
pub mod mapping_export;
pub mod markdown;

pub use html::{render_html, write_html_report, HtmlOptions};
pub use json::{render_json, write_json_report};
pub use mapping_export::{requirements_mapping, write_mapping_export};
pub use markdown::{render_markdown, MarkdownOptions};

use crate::error::ReportWriteError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Program and version of a delivery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryInfo {
    /// Program (product) name
    pub program: String,
    /// Delivery version
    pub version: String,
}

/// Serialize `value` as JSON indented by four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportWriteError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a rendered report
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportWriteError> {
    std::fs::write(path, content).map_err(|e| ReportWriteError::io_error(path, e))?;
    tracing::info!("Wrote report {}", path.display());
    Ok(())
}

pub(crate) fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.unwrap_or_else(Utc::now).to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_uses_four_spaces() {
        let text = to_pretty_json(&serde_json::json!({"a": [1]})).unwrap();
        assert_eq!(text, "{\n    \"a\": [\n        1\n    ]\n}\n");
    }

    #[test]
    fn write_report_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_report(&dir.path().join("no/such/dir/r.html"), "x").unwrap_err();
        assert!(matches!(err, ReportWriteError::Io { .. }));
    }
}
