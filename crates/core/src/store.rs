//! Correlation store.
//!
//! Process-wide map from [`RequestId`] to interpretation text. Each entry is written
//! once by the background task for its reading and read by later lookups. Entries live
//! for the lifetime of the process: there is no eviction, expiry or persistence.
//!
//! A lookup before the write lands reports "not found", exactly like an ID that was
//! never issued or whose interpretation failed.

use crate::request_id::RequestId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Concurrency-safe store of finished interpretations.
///
/// Cloning is cheap and every clone shares the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct InterpretationStore {
    entries: Arc<RwLock<HashMap<RequestId, String>>>,
}

impl InterpretationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the interpretation for `id`.
    pub fn put(&self, id: RequestId, interpretation: String) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(id, interpretation);
    }

    /// Returns the interpretation stored for `id`, or `None` if there is none (yet).
    pub fn get(&self, id: &RequestId) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
