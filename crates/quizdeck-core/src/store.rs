//! Page-scoped persistence of question statuses.
//!
//! Statuses live in a flat string-keyed store, one JSON-encoded
//! [`StatusMap`] per quiz page. The key is [`STATUS_KEY_PREFIX`] followed by
//! the page path, so two pages never see each other's progress.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{QuizError, StoreError};
use crate::model::{QuestionId, QuestionStatus, StatusMap};

/// Prefix of every status key.
pub const STATUS_KEY_PREFIX: &str = "questionStatuses-";

/// Storage key for the statuses of `page`.
pub fn status_key(page: &str) -> String {
    format!("{STATUS_KEY_PREFIX}{page}")
}

/// A simple string-keyed persistent store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether a value was present.
    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.items.remove(key).is_some())
    }
}

/// Status persistence over any [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct StatusStore<S> {
    backend: S,
}

impl<S: KeyValueStore> StatusStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Statuses saved for `page`, or an empty map.
    ///
    /// Never fails: a missing entry means no attempts yet, and an unreadable
    /// or corrupt entry is logged and treated the same way.
    pub fn load(&self, page: &str) -> StatusMap {
        let key = status_key(page);
        let raw = match self.backend.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StatusMap::new(),
            Err(e) => {
                tracing::warn!("failed to read {key}: {e}");
                return StatusMap::new();
            }
        };

        let entries = match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("ignoring corrupt statuses under {key}: {e}");
                return StatusMap::new();
            }
        };

        // Decoded entry by entry so one bad value only loses itself.
        let map: StatusMap = entries
            .into_iter()
            .filter_map(|(id, value)| match QuestionStatus::deserialize(&value) {
                Ok(status) => Some((QuestionId::new(id), status)),
                Err(e) => {
                    tracing::warn!("skipping status of question {id} under {key}: {e}");
                    None
                }
            })
            .collect();
        tracing::debug!(key = %key, entries = map.len(), "loaded statuses");
        map
    }

    /// Overwrite the statuses saved for `page`.
    pub fn save(&mut self, page: &str, statuses: &StatusMap) -> Result<(), QuizError> {
        let key = status_key(page);
        let value = serde_json::to_string(statuses)?;
        self.backend.set_item(&key, value)?;
        tracing::debug!(key = %key, entries = statuses.len(), "saved statuses");
        Ok(())
    }

    /// Forget every status saved for `page`. Clearing an absent entry is not
    /// an error; the return value says whether anything was removed.
    pub fn clear(&mut self, page: &str) -> Result<bool, QuizError> {
        let key = status_key(page);
        let removed = self.backend.remove_item(&key)?;
        if removed {
            tracing::info!("cleared statuses under {key}");
        } else {
            tracing::info!("no statuses stored under {key}");
        }
        Ok(removed)
    }
}
