//! Backlog references and the in-source marker syntax
//!
//! A marker looks like `Trace(Jira:PROJ-1, GitHub:org/repo#42)` and may sit in
//! any comment of any scanned language.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognizes the backlog-reference marker on a single line
pub static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Trace\(((GitHub|Jira):[a-zA-Z0-9\-/#_]+\s*,*\s*)+\)").expect("marker regex is valid")
});

/// Whether `line` carries a backlog-reference marker
#[inline]
#[must_use]
pub fn contains_marker(line: &str) -> bool {
    MARKER.is_match(line)
}

/// Tracker a backlog item lives in
///
/// Variant order is the report order: unknown trackers first, then GitHub,
/// then Jira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BacklogSource {
    /// Tracker name not recognized; kept so the intent is not dropped
    Unknown,
    /// GitHub issue (`org/repo#number`)
    GitHub,
    /// Jira issue (`PROJECT-number`)
    Jira,
}

impl BacklogSource {
    /// Stable numeric code, used in persisted cache keys
    #[inline]
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            BacklogSource::Unknown => -1,
            BacklogSource::GitHub => 0,
            BacklogSource::Jira => 1,
        }
    }

    /// Human-readable tracker name
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BacklogSource::Unknown => "Unknown",
            BacklogSource::GitHub => "GitHub",
            BacklogSource::Jira => "Jira",
        }
    }

    /// Classify a tracker name by case-insensitive substring
    #[must_use]
    pub fn from_tracker_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("github") {
            BacklogSource::GitHub
        } else if lower.contains("jira") {
            BacklogSource::Jira
        } else {
            BacklogSource::Unknown
        }
    }
}

impl fmt::Display for BacklogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Base URLs used to link backlog items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueLinks {
    /// GitHub web base URL (e.g. `https://github.com`)
    pub github_base_url: String,
    /// Jira web base URL
    pub jira_base_url: String,
}

impl IssueLinks {
    /// Create links from both base URLs
    #[must_use]
    pub fn new(github_base_url: impl Into<String>, jira_base_url: impl Into<String>) -> Self {
        Self {
            github_base_url: github_base_url.into(),
            jira_base_url: jira_base_url.into(),
        }
    }
}

/// Reference to one backlog item in one tracker
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BacklogReference {
    /// Tracker
    pub source: BacklogSource,
    /// Tracker-specific identifier
    pub id: String,
}

impl BacklogReference {
    /// Create a reference
    #[must_use]
    pub fn new(source: BacklogSource, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }

    /// Jira reference
    #[must_use]
    pub fn jira(id: impl Into<String>) -> Self {
        Self::new(BacklogSource::Jira, id)
    }

    /// GitHub reference (`org/repo#number`)
    #[must_use]
    pub fn github(id: impl Into<String>) -> Self {
        Self::new(BacklogSource::GitHub, id)
    }

    fn github_parts(&self) -> Option<(&str, &str, &str)> {
        if self.source != BacklogSource::GitHub {
            return None;
        }
        let (org, rest) = self.id.split_once('/')?;
        let (repo, issue) = rest.split_once('#')?;
        Some((org, repo, issue))
    }

    /// GitHub organization of a GitHub reference
    #[must_use]
    pub fn github_organization(&self) -> Option<&str> {
        self.github_parts().map(|(org, _, _)| org)
    }

    /// GitHub repository of a GitHub reference
    #[must_use]
    pub fn github_repository(&self) -> Option<&str> {
        self.github_parts().map(|(_, repo, _)| repo)
    }

    /// GitHub issue number of a GitHub reference
    #[must_use]
    pub fn github_issue(&self) -> Option<&str> {
        self.github_parts().map(|(_, _, issue)| issue)
    }

    /// Web URL of the backlog item
    #[must_use]
    pub fn issue_url(&self, links: &IssueLinks) -> String {
        match self.source {
            BacklogSource::GitHub => match self.github_parts() {
                Some((org, repo, issue)) => {
                    format!("{}/{}/{}/issues/{}", links.github_base_url, org, repo, issue)
                }
                None => "No link available".to_string(),
            },
            BacklogSource::Jira => format!("{}/browse/{}", links.jira_base_url, self.id),
            BacklogSource::Unknown => "No link available".to_string(),
        }
    }
}

impl fmt::Display for BacklogReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.id)
    }
}

/// Parse a marker string into backlog references
///
/// Accepts comma-separated `<Tracker>:<Identifier>` segments, e.g. a whole
/// comment line such as `// Trace(Jira:PROJ-1, GitHub:org/repo#2)` or a
/// delivery manifest such as `GitHub:org/repo#2, Jira:PROJ-1`. Segments
/// without `:` are logged and skipped.
#[must_use]
pub fn parse_backlog_references(marker: &str) -> Vec<BacklogReference> {
    let mut references = Vec::new();

    for segment in marker.split(',') {
        let Some((tracker, raw_id)) = segment.split_once(':') else {
            tracing::warn!(
                "Found suspicious traceability comment in code: {} in {}",
                segment.trim(),
                marker.trim()
            );
            continue;
        };

        let mut id: String = raw_id.chars().filter(|c| !c.is_whitespace()).collect();
        // The last segment of a marker carries the closing bracket
        if let Some(close) = id.rfind(')') {
            id.truncate(close);
        }

        let source = BacklogSource::from_tracker_name(tracker);
        if source == BacklogSource::Unknown {
            tracing::warn!("Found a backlog item from an unknown source: {}", marker.trim());
        }

        references.push(BacklogReference::new(source, id));
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn parses_single_marker_line() {
        let refs = parse_backlog_references("// Trace(Jira:MYJIRAPROJECT-3)");
        assert_eq!(refs, vec![BacklogReference::jira("MYJIRAPROJECT-3")]);
    }

    #[test]
    fn parses_multiple_segments_in_order() {
        let refs = parse_backlog_references("// Trace(Jira:MYJIRAPROJECT-1, GitHub:myOrg/myRepo#42)\n");
        assert_eq!(
            refs,
            vec![
                BacklogReference::jira("MYJIRAPROJECT-1"),
                BacklogReference::github("myOrg/myRepo#42"),
            ]
        );
    }

    #[test]
    fn segment_without_separator_is_dropped() {
        let refs = parse_backlog_references("// Trace(Jira:MYJIRAPROJECT-3, )    This one should not fail");
        assert_eq!(refs, vec![BacklogReference::jira("MYJIRAPROJECT-3")]);

        let refs = parse_backlog_references("Jira:A-1, garbage, GitHub:o/r#1");
        assert_eq!(refs, vec![BacklogReference::jira("A-1"), BacklogReference::github("o/r#1")]);
    }

    #[test]
    fn tracker_name_is_case_insensitive() {
        let refs = parse_backlog_references("JIRA:X-1, github:o/r#2");
        assert_eq!(refs[0].source, BacklogSource::Jira);
        assert_eq!(refs[1].source, BacklogSource::GitHub);
    }

    #[test]
    fn unknown_tracker_is_kept() {
        let refs = parse_backlog_references("Bugzilla:1234");
        assert_eq!(refs, vec![BacklogReference::new(BacklogSource::Unknown, "1234")]);
        assert_eq!(refs[0].source.code(), -1);
    }

    #[test]
    fn identifier_whitespace_is_removed() {
        let refs = parse_backlog_references("Jira: PROJ - 7 \t");
        assert_eq!(refs, vec![BacklogReference::jira("PROJ-7")]);
    }

    #[test]
    fn marker_regex() {
        assert!(contains_marker("// Trace(Jira:PROJ-1)"));
        assert!(contains_marker("# Trace(GitHub:org/repo#1, Jira:A_B-2)"));
        assert!(!contains_marker("// This is not a Trace parameter"));
        assert!(!contains_marker("// Trace(Bugzilla:1)"));
        assert!(!contains_marker("Trace: Jira:PROJ-1"));
    }

    #[test]
    fn github_parts() {
        let r = BacklogReference::github("myOrg/myRepo#42");
        assert_eq!(r.github_organization(), Some("myOrg"));
        assert_eq!(r.github_repository(), Some("myRepo"));
        assert_eq!(r.github_issue(), Some("42"));

        assert_eq!(BacklogReference::jira("A-1").github_organization(), None);
        assert_eq!(BacklogReference::github("no-separators").github_issue(), None);
    }

    #[test]
    fn issue_urls() {
        let links = IssueLinks::new("https://github.com", "https://jira.example.com");

        assert_eq!(
            BacklogReference::github("o/r#5").issue_url(&links),
            "https://github.com/o/r/issues/5"
        );
        assert_eq!(
            BacklogReference::jira("PROJ-1").issue_url(&links),
            "https://jira.example.com/browse/PROJ-1"
        );
        assert_eq!(
            BacklogReference::new(BacklogSource::Unknown, "1").issue_url(&links),
            "No link available"
        );
    }

    #[test]
    fn ordering_groups_by_tracker() {
        let mut refs = vec![
            BacklogReference::jira("A-1"),
            BacklogReference::github("o/r#2"),
            BacklogReference::new(BacklogSource::Unknown, "z"),
            BacklogReference::github("o/r#1"),
        ];
        refs.sort();

        let order: Vec<String> = refs.iter().map(ToString::to_string).collect();
        assert_eq!(order, vec!["Unknown:z", "GitHub:o/r#1", "GitHub:o/r#2", "Jira:A-1"]);
    }

    proptest! {
        #[test]
        fn prop_segment_count_and_order_preserved(
            ids in proptest::collection::vec("[A-Z]{1,5}-[0-9]{1,4}", 1..8),
            github in proptest::collection::vec(any::<bool>(), 8)
        ) {
            let marker = ids
                .iter()
                .zip(&github)
                .map(|(id, gh)| if *gh { format!("GitHub:{}", id) } else { format!("Jira:{}", id) })
                .collect::<Vec<_>>()
                .join(", ");

            let refs = parse_backlog_references(&marker);

            prop_assert_eq!(refs.len(), ids.len());
            for ((r, id), gh) in refs.iter().zip(&ids).zip(&github) {
                prop_assert_eq!(&r.id, id);
                let expected = if *gh { BacklogSource::GitHub } else { BacklogSource::Jira };
                prop_assert_eq!(r.source, expected);
            }
        }
    }
}
