//! Bounded cache for repeated reformat runs.

use crate::pipeline::{Mode, ReformatResult};
use chrono::{DateTime, Utc};
use lw_core::config::ReformatConfig;
use std::collections::HashMap;

/// Default number of results a cache holds.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Key for one reformat run: the exact input, the mode, and a fingerprint
/// of the config that shaped the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    mode: Mode,
    config_fingerprint: String,
}

impl CacheKey {
    pub fn new(text: &str, mode: Mode, config: &ReformatConfig) -> Self {
        Self {
            text: text.to_string(),
            mode,
            config_fingerprint: serde_json::to_string(config).unwrap_or_default(),
        }
    }
}

struct CacheEntry {
    result: ReformatResult,
    inserted_at: DateTime<Utc>,
}

/// Fixed-capacity result cache. Inserting past capacity evicts the entry
/// that has been in the cache longest. Callers own the instance and decide
/// which runs go through it.
pub struct ResultCache {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&ReformatResult> {
        self.entries.get(key).map(|entry| &entry.result)
    }

    pub fn insert(&mut self, key: CacheKey, result: ReformatResult) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                result,
                inserted_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
