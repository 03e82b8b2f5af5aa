//! Gauge specification scanner
//!
//! ```text
//! # Spec title
//! Requirements: Jira:PROJ-1
//! ## Scenario title
//! Trace: GitHub:org/repo#4, Jira:PROJ-2
//! ```
//!
//! A requirements line belongs to the heading right above it. Parameterized
//! scenario runs are reported with a numeric suffix, so entries carry the
//! [`TestCaseMatcher::GaugeParameterized`] matcher.

use super::{Language, ScanFile, SourceScanner};
use crate::backlog::parse_backlog_references;
use crate::identity::{TestBacklogEntry, TestIdentity};
use crate::matcher::TestCaseMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s*(.+)$").expect("valid heading regex"));

static TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^(?:Trace|Requirements):|,)\s*([^,\s]+)").expect("valid tag regex"));

const REQUIREMENT_PREFIXES: &[&str] = &["Requirements:", "Trace:"];

/// Scanner for `.spec` files
#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeSpecScanner;

impl SourceScanner for GaugeSpecScanner {
    fn language(&self) -> Language {
        Language::GaugeSpec
    }

    fn scan_content(&self, content: &str, file: &ScanFile) -> Vec<TestBacklogEntry> {
        let mut state = GaugeState::default();

        for line in content.lines() {
            if line.starts_with('#') {
                if let Some((level, title)) = parse_heading(line) {
                    state.heading(level, title, file);
                }
            } else if REQUIREMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
                state.requirements(&requirement_tags(line));
            }
        }

        state
            .items
            .into_iter()
            .filter(|item| !item.backlog_references.is_empty())
            .collect()
    }
}

#[derive(Debug, Default)]
struct GaugeState {
    items: Vec<TestBacklogEntry>,
    last_spec: String,
}

impl GaugeState {
    fn heading(&mut self, level: usize, title: &str, file: &ScanFile) {
        let test = match level {
            1 => {
                self.last_spec = title.to_string();
                TestIdentity::new(title, "")
            }
            2 => TestIdentity::new(self.last_spec.as_str(), title),
            _ => return,
        };

        self.items.push(
            TestBacklogEntry::new(test.with_file_url(file.source_url.clone()), Vec::new())
                .with_matcher(TestCaseMatcher::GaugeParameterized),
        );
    }

    fn requirements(&mut self, tags: &[&str]) {
        // requirement lines above the first heading belong to nothing
        let Some(item) = self.items.last_mut() else {
            return;
        };
        item.backlog_references = tags.iter().flat_map(|tag| parse_backlog_references(tag)).collect();
    }
}

/// Heading level and title
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let captures = HEADING.captures(line)?;
    let level = captures.get(1)?.as_str().len();
    let title = captures.get(2)?.as_str().trim_end();
    Some((level, title))
}

/// Tags listed on a `Requirements:` or `Trace:` line
pub fn requirement_tags(line: &str) -> Vec<&str> {
    TAGS.captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}
