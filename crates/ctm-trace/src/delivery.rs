//! Restricting traces to the backlog items of one delivery

use crate::trace::Trace;
use ctm_mapping::BacklogReference;
use std::collections::HashSet;

/// Traces of the requested backlog items
///
/// Matching traces keep their order. Requested items without a trace get a
/// placeholder, appended in request order and listed once even when
/// requested twice.
#[must_use]
pub fn filter_delivery(all: &[Trace], requested: &[BacklogReference]) -> Vec<Trace> {
    let wanted: HashSet<&BacklogReference> = requested.iter().collect();
    let mut seen: HashSet<&BacklogReference> = HashSet::new();
    let mut delivery = Vec::new();

    for trace in all {
        if wanted.contains(&trace.backlog_item) && seen.insert(&trace.backlog_item) {
            delivery.push(trace.clone());
        }
    }

    for reference in requested {
        if seen.insert(reference) {
            tracing::debug!("No test found for delivery item {}", reference);
            delivery.push(Trace::placeholder(reference.clone()));
        }
    }

    delivery
}

/// Append the delivery traces whose backlog item `all` lacks
///
/// Keeps the full report aware of requested items nobody tests.
pub fn backfill_placeholders(all: &mut Vec<Trace>, delivery: &[Trace]) {
    let known: HashSet<BacklogReference> = all.iter().map(|t| t.backlog_item.clone()).collect();
    let missing: Vec<Trace> = delivery
        .iter()
        .filter(|t| !known.contains(&t.backlog_item))
        .cloned()
        .collect();
    all.extend(missing);
}
