//! Key-value namespace backing every persisted value.
//!
//! A store maps string keys to string values, the same shape as browser
//! local storage. Collections live under fixed keys (`NOTES`, `TAGS`) and
//! attachment blobs under generated `image-<id>` keys.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::{Error, Result};

/// Storage operations shared across key-value backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when the slot is empty.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the slot. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// List every occupied key, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Check that a key is usable by every backend.
///
/// Keys must be non-empty and made of ASCII alphanumerics, `-` or `_`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}
