//! Record of backlog items already linked to their test results
//!
//! Keys are `<tracker code>#<id>`, one per line. The cache is rewritten as a
//! whole on save; concurrent runs sharing a work directory will lose keys.

use crate::error::CacheError;
use crate::trace::Trace;
use ctm_mapping::{BacklogReference, BacklogSource};
use std::collections::BTreeSet;
use std::path::Path;

/// File name of the cache inside the work directory
pub const CACHE_FILE_NAME: &str = ".commentCache";

/// Set of backlog items already commented on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentCache {
    keys: BTreeSet<String>,
}

impl CommentCache {
    /// Load the cache; a missing file gives an empty cache
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Cache file not found. Create new one at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(CacheError::io_error(path, e)),
        };

        let keys = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { keys })
    }

    /// Cache key of a backlog reference
    #[must_use]
    pub fn key(reference: &BacklogReference) -> String {
        format!("{}#{}", reference.source.code(), reference.id)
    }

    /// Whether `reference` was already handled
    #[must_use]
    pub fn contains(&self, reference: &BacklogReference) -> bool {
        self.keys.contains(&Self::key(reference))
    }

    /// Record `reference`; returns whether it was new
    pub fn insert(&mut self, reference: &BacklogReference) -> bool {
        self.keys.insert(Self::key(reference))
    }

    /// Number of recorded keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Rewrite the cache file
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let mut text = String::new();
        for key in &self.keys {
            text.push_str(key);
            text.push('\n');
        }
        std::fs::write(path, text).map_err(|e| CacheError::io_error(path, e))
    }

    /// Backlog items of `source` in `traces` not yet recorded
    #[must_use]
    pub fn pending<'a>(&self, traces: &'a [Trace], source: BacklogSource) -> Vec<&'a BacklogReference> {
        traces
            .iter()
            .map(|t| &t.backlog_item)
            .filter(|r| r.source == source && !self.contains(r))
            .collect()
    }
}
