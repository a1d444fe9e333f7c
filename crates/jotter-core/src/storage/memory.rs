//! In-memory store, used for tests and throwaway sessions.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{validate_key, KeyValueStore};
use crate::{Error, Result};

/// Mutex-guarded map implementing [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("NOTES").unwrap(), None);

        store.set_item("NOTES", "[]").unwrap();
        assert_eq!(store.get_item("NOTES").unwrap().as_deref(), Some("[]"));

        store.remove_item("NOTES").unwrap();
        assert_eq!(store.get_item("NOTES").unwrap(), None);
        store.remove_item("NOTES").unwrap();
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemoryStore::new();
        store.set_item("TAGS", "[]").unwrap();
        store.set_item("NOTES", "[]").unwrap();
        store.set_item("image-a", "data:").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["NOTES", "TAGS", "image-a"]);
    }

    #[test]
    fn rejects_invalid_keys() {
        let store = MemoryStore::new();
        assert!(store.set_item("a/b", "x").is_err());
    }
}
