//! Record persistence in a key-value storage area
//!
//! The whole record list lives under a single key as JSON text. In the
//! browser the storage area is LocalStorage; tests and the native build use
//! [`MemoryStore`].

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::record::{Record, RecordList};

/// Default slot holding the serialized record list
pub const STORAGE_KEY: &str = "recipes";

/// A flat string key-value storage area (LocalStorage-shaped)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// Remove every key in the area
    fn clear(&mut self) -> Result<()>;
    /// Number of keys in the area
    fn key_count(&self) -> Result<usize>;
}

/// In-memory storage area with an optional byte quota
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the summed key and value lengths past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(bytes),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if self.used_without(key) + key.len() + value.len() > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }

    fn key_count(&self) -> Result<usize> {
        Ok(self.items.len())
    }
}

/// Reads and writes the record list slot
#[derive(Debug)]
pub struct RecipeStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> RecipeStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the record list. A missing slot or a stored `null` is an empty
    /// list; corrupt text is an error.
    pub fn load(&self) -> Result<RecordList> {
        let Some(json) = self.backend.get_item(&self.key)? else {
            log::debug!("No '{}' slot, starting empty", self.key);
            return Ok(Vec::new());
        };
        let records: RecordList = serde_json::from_str::<Option<RecordList>>(&json)
            .map_err(|source| Error::Corrupt {
                key: self.key.clone(),
                source,
            })?
            .unwrap_or_default();
        log::debug!("Loaded {} records", records.len());
        Ok(records)
    }

    /// Overwrite the slot with `records`
    pub fn save(&mut self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(Error::Serialize)?;
        self.backend.set_item(&self.key, &json)?;
        log::debug!("Saved {} records", records.len());
        Ok(())
    }

    /// Load, push, save. Returns the new list length.
    pub fn append(&mut self, record: Record) -> Result<usize> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }

    /// Wipe the entire storage area, not only the slot
    pub fn clear(&mut self) -> Result<()> {
        let removed = self.backend.key_count()?;
        self.backend.clear()?;
        log::info!("Storage cleared ({} keys removed)", removed);
        Ok(())
    }
}
