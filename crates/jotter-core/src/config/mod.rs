//! Runtime configuration shared by Jotter front ends.
//!
//! Configuration lives in `<data dir>/jotter/config.json`. A missing file
//! means defaults; an unreadable or malformed file is logged and also falls
//! back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::media::DEFAULT_READ_TIMEOUT;
use crate::util::normalize_text_option;
use crate::Result;

const CONFIG_FILE: &str = "config.json";
const STORE_DIR: &str = "store";

/// Environment variable overriding the storage directory.
pub const STORAGE_DIR_ENV: &str = "JOTTER_STORAGE_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JotterConfig {
    /// Directory holding the key-value store.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Upper bound for reading one attachment, in seconds.
    #[serde(default = "default_read_timeout_secs")]
    pub attachment_read_timeout_secs: u64,
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            attachment_read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl JotterConfig {
    /// Attachment read timeout, never shorter than one second.
    #[must_use]
    pub fn attachment_read_timeout(&self) -> Duration {
        Duration::from_secs(self.attachment_read_timeout_secs.max(1))
    }
}

const fn default_read_timeout_secs() -> u64 {
    DEFAULT_READ_TIMEOUT.as_secs()
}

/// Base directory for Jotter data.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jotter")
}

pub fn default_config_path() -> PathBuf {
    default_data_dir().join(CONFIG_FILE)
}

pub fn default_storage_dir() -> PathBuf {
    default_data_dir().join(STORE_DIR)
}

pub fn load_config() -> JotterConfig {
    load_config_from_path(&default_config_path())
}

pub fn load_config_from_path(path: &Path) -> JotterConfig {
    if !path.exists() {
        return JotterConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<JotterConfig>(&content) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    "Failed to parse config at {}: {}",
                    path.display(),
                    error
                );
                JotterConfig::default()
            }
        },
        Err(error) => {
            tracing::warn!("Failed to read config at {}: {}", path.display(), error);
            JotterConfig::default()
        }
    }
}

pub fn save_config_to_path(config: &JotterConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Pick the storage directory: explicit flag, then environment, then config
/// file, then the platform default.
pub fn resolve_storage_dir(
    explicit: Option<PathBuf>,
    env_value: Option<String>,
    config: &JotterConfig,
) -> PathBuf {
    explicit
        .or_else(|| normalize_text_option(env_value).map(PathBuf::from))
        .or_else(|| config.storage_dir.clone())
        .unwrap_or_else(default_storage_dir)
}
