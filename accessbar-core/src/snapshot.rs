//! Snapshot persistence: where the encoded preferences live between visits.

use std::collections::HashMap;

use thiserror::Error;

use crate::SnapshotStore;
use crate::constants::{DEFAULT_SNAPSHOT_KEY, DEFAULT_SNAPSHOT_TTL_DAYS};

/// Key and retention used for every snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSettings {
    pub key: String,
    pub ttl_days: u32,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
            ttl_days: DEFAULT_SNAPSHOT_TTL_DAYS,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot storage is unavailable")]
    Unavailable,
    #[error("snapshot write rejected: {0}")]
    Rejected(String),
}

/// A stored value together with the retention it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub value: String,
    pub ttl_days: u32,
}

/// In-process store used by tests and the logic QA runner.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, StoredSnapshot>,
    writes: usize,
    disabled: bool,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key`, as if a previous visit had written it.
    #[must_use]
    pub fn with_snapshot(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(
            key.to_string(),
            StoredSnapshot {
                value: value.to_string(),
                ttl_days: DEFAULT_SNAPSHOT_TTL_DAYS,
            },
        );
        self
    }

    /// A store that refuses every write, like a browser with cookies blocked.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&StoredSnapshot> {
        self.entries.get(key)
    }

    /// Number of successful writes so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Drop `key`, as if the snapshot had expired.
    pub fn expire(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl SnapshotStore for MemorySnapshotStore {
    type Error = SnapshotError;

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<(), Self::Error> {
        if self.disabled {
            return Err(SnapshotError::Unavailable);
        }
        if ttl_days == 0 {
            return Err(SnapshotError::Rejected(format!(
                "`{key}` would expire immediately"
            )));
        }
        self.entries.insert(
            key.to_string(),
            StoredSnapshot {
                value: value.to_string(),
                ttl_days,
            },
        );
        self.writes += 1;
        Ok(())
    }
}
