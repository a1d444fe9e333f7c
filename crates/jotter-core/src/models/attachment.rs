//! Attachment key model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix shared by every generated attachment slot.
pub const ATTACHMENT_KEY_PREFIX: &str = "image-";

/// Store key under which one encoded attachment lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentKey(String);

impl AttachmentKey {
    /// Generate a fresh `image-<uuid>` key.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{ATTACHMENT_KEY_PREFIX}{}", Uuid::now_v7()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a raw store key belongs to the attachment namespace.
    #[must_use]
    pub fn is_attachment_slot(key: &str) -> bool {
        key.starts_with(ATTACHMENT_KEY_PREFIX)
    }
}

impl fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttachmentKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AttachmentKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::validate_key;

    #[test]
    fn generated_keys_are_prefixed_and_unique() {
        let a = AttachmentKey::generate();
        let b = AttachmentKey::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("image-"));
        assert!(AttachmentKey::is_attachment_slot(a.as_str()));
        assert!(!AttachmentKey::is_attachment_slot("NOTES"));
    }

    #[test]
    fn generated_keys_are_valid_store_keys() {
        assert!(validate_key(AttachmentKey::generate().as_str()).is_ok());
    }
}
