//! A value kept in sync with one slot of a [`KeyValueStore`].
//!
//! Loading reads and deserializes the slot, falling back to an initial value
//! when the slot is empty or malformed. A failed store read is an error and
//! leaves the slot untouched. Every change is serialized and written straight
//! back; there is no batching.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::KeyValueStore;
use crate::util::compact_text;
use crate::Result;

/// In-memory value bound to a store key with write-through on change.
pub struct Persisted<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key`, falling back to `initial` when nothing usable is stored.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Result<Self> {
        Self::load_with(store, key, || initial)
    }

    /// Load `key`, calling `initial` only when the fallback is needed.
    ///
    /// The resolved value is written back once so the slot holds valid JSON
    /// afterwards.
    pub fn load_with<F>(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: F) -> Result<Self>
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        let value = read_slot(store.as_ref(), &key)?.unwrap_or_else(initial);
        let persisted = Self { store, key, value };
        persisted.write(&persisted.value)?;
        Ok(persisted)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. The in-memory copy changes only if the write lands.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.write(&value)?;
        self.value = value;
        Ok(())
    }

    /// Derive the next value from the current one and write it through.
    pub fn update<F>(&mut self, next: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        let value = next(&self.value);
        self.set(value)
    }

    fn write(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set_item(&self.key, &json)
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

fn read_slot<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            tracing::warn!(
                "Error parsing store key \"{}\" ({}): {}. Using initial value.",
                key,
                compact_text(&raw),
                error
            );
            Ok(None)
        }
    }
}
