//! Dense indexing of activity ids.
//!
//! The critical path passes run over vectors indexed by `ActivityIdx`; string
//! ids are only touched when the graph is built and when results are emitted.

use rustc_hash::FxHashMap;

/// Dense activity index (u32 for compact storage and fast hashing).
pub type ActivityIdx = u32;

/// Bidirectional map between activity id strings and dense indices.
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    to_idx: FxHashMap<String, ActivityIdx>,
    ids: Vec<String>,
}

impl ActivityIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Register an id.
    ///
    /// Returns `None` when the id was already registered; the first
    /// registration keeps its index.
    pub fn insert(&mut self, id: &str) -> Option<ActivityIdx> {
        if self.to_idx.contains_key(id) {
            return None;
        }
        let idx = self.ids.len() as ActivityIdx;
        self.ids.push(id.to_string());
        self.to_idx.insert(id.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<ActivityIdx> {
        self.to_idx.get(id).copied()
    }

    #[inline]
    pub fn id(&self, idx: ActivityIdx) -> Option<&str> {
        self.ids.get(idx as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
