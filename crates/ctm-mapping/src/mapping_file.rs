//! JSON mapping files
//!
//! For tests whose sources cannot carry markers, a mapping file lists the
//! test references directly:
//!
//! ```json
//! [
//!   {"source_reference": "com.corp.app.MyTest", "jira_keys": ["PROJ-3"]},
//!   {"source_reference": "com.corp.app.MyTest.myMethod()", "github_keys": ["org/repo#1"]},
//!   {
//!     "source_reference": "com.corp.app.MyTest.other()",
//!     "filelocation": {
//!       "git": {"organization": "org", "repository": "repo", "branch": "main"},
//!       "relativePath": "./src/test/java/com/corp/app/MyTest.java"
//!     },
//!     "jira_keys": ["PROJ-1", "PROJ-2"]
//!   }
//! ]
//! ```

use crate::backlog::{BacklogReference, IssueLinks};
use crate::error::MappingError;
use crate::identity::{TestBacklogEntry, TestIdentity};
use crate::source_url::GitCoordinates;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Where a mapped test lives in its repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    /// Repository coordinates
    #[serde(default)]
    pub git: GitCoordinates,
    /// File path inside the repository
    #[serde(rename = "relativePath", default)]
    pub relative_path: String,
}

/// One record of a mapping file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// `Class` or `Class.method()`
    pub source_reference: String,
    /// Optional source location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filelocation: Option<FileLocation>,
    /// Jira issue keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jira_keys: Vec<String>,
    /// GitHub issue ids (`org/repo#n`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub github_keys: Vec<String>,
}

impl MappingEntry {
    /// Declared test and its references
    #[must_use]
    pub fn to_backlog_entry(&self, links: &IssueLinks) -> TestBacklogEntry {
        let (class_name, method_name) = split_source_reference(&self.source_reference);
        let test = TestIdentity::new(class_name, method_name).with_file_url(self.file_url(links));

        let references = self
            .jira_keys
            .iter()
            .map(BacklogReference::jira)
            .chain(self.github_keys.iter().map(BacklogReference::github))
            .collect();

        TestBacklogEntry::new(test, references)
    }

    fn file_url(&self, links: &IssueLinks) -> Option<String> {
        let location = self.filelocation.as_ref()?;
        if location.relative_path.is_empty() {
            return None;
        }

        let path = location.relative_path.trim_matches('.').trim_matches('/');
        Some(format!(
            "{}/{}/{}/blob/{}/{}",
            links.github_base_url.trim_end_matches('/'),
            location.git.organization,
            location.git.repository,
            location.git.branch,
            path
        ))
    }
}

/// Split `Class.method()` into class and method; anything else is a class
fn split_source_reference(reference: &str) -> (&str, &str) {
    match reference.strip_suffix("()") {
        Some(qualified) => match qualified.rfind('.') {
            Some(dot) => (&qualified[..dot], &qualified[dot + 1..]),
            None => ("", qualified),
        },
        None => (reference, ""),
    }
}

/// Parse mapping file content; `path` is used for error reporting
pub fn parse_mapping(text: &str, links: &IssueLinks, path: &Path) -> Result<Vec<TestBacklogEntry>, MappingError> {
    let records: Vec<MappingEntry> = serde_json::from_str(text).map_err(|source| MappingError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(records.iter().map(|r| r.to_backlog_entry(links)).collect())
}

/// Read and parse a mapping file
pub fn read_mapping_file(path: &Path, links: &IssueLinks) -> Result<Vec<TestBacklogEntry>, MappingError> {
    let started = Instant::now();
    let text = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_mapping(&text, links, path)?;
    tracing::info!(entries = entries.len(), "Read mapping file took {:?}", started.elapsed());
    Ok(entries)
}
