//! Trace counts for summaries

use crate::trace::Trace;

/// Number of backlog items whose tests all passed
#[must_use]
pub fn successful_trace_count(traces: &[Trace]) -> usize {
    traces.iter().filter(|t| t.is_successful()).count()
}

/// Number of backlog items not tested successfully
#[must_use]
pub fn unsuccessful_trace_count(traces: &[Trace]) -> usize {
    traces.len() - successful_trace_count(traces)
}
