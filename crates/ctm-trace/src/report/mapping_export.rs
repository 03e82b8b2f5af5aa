//! Export of the discovered test-to-backlog mapping
//!
//! The output is a mapping file, so a run over annotated sources can seed
//! the mapping for a later run that only has test reports.

use super::{to_pretty_json, write_report};
use crate::error::ReportWriteError;
use crate::trace::Trace;
use ctm_mapping::{BacklogSource, MappingEntry};
use indexmap::IndexMap;
use std::path::Path;

fn push_unique(keys: &mut Vec<String>, id: &str) {
    if !keys.iter().any(|k| k == id) {
        keys.push(id.to_string());
    }
}

/// One mapping entry per executed test, in first-seen order
///
/// Methods are written as `Class.method()`, whole-class tests as `Class`.
/// References to unknown trackers are left out.
#[must_use]
pub fn requirements_mapping(traces: &[Trace]) -> Vec<MappingEntry> {
    let mut mapping: IndexMap<String, MappingEntry> = IndexMap::new();

    for trace in traces {
        for test in &trace.trace_tests {
            let source_reference = if test.method_name.is_empty() {
                test.class_name.clone()
            } else {
                format!("{}.{}()", test.class_name, test.method_name)
            };

            let entry = mapping.entry(source_reference.clone()).or_insert_with(|| MappingEntry {
                source_reference,
                ..MappingEntry::default()
            });

            let item = &trace.backlog_item;
            match item.source {
                BacklogSource::Jira => push_unique(&mut entry.jira_keys, &item.id),
                BacklogSource::GitHub => push_unique(&mut entry.github_keys, &item.id),
                BacklogSource::Unknown => {}
            }
        }
    }

    mapping.into_values().collect()
}

/// Write the mapping export as JSON
pub fn write_mapping_export(path: &Path, traces: &[Trace]) -> Result<(), ReportWriteError> {
    write_report(path, &to_pretty_json(&requirements_mapping(traces))?)
}
