//! Attachment encoding and gallery resolution.
//!
//! Staged files are read concurrently, turned into `data:` URIs and stored
//! under generated `image-<id>` keys. A batch is all-or-nothing: keys are
//! only written once every file has been read and encoded, and the returned
//! key list follows the original selection order regardless of completion
//! order.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use tokio::task::JoinSet;

use crate::models::AttachmentKey;
use crate::storage::KeyValueStore;
use crate::{Error, Result};

/// Default upper bound for reading a single staged file.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

const IMAGE_DATA_URI_PREFIX: &str = "data:image/";

/// Where a staged file's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A file selected for attachment but not yet encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub source: FileSource,
}

impl StagedFile {
    /// Stage a file on disk; the name is taken from the last path component.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Self {
            name,
            content_type: None,
            source: FileSource::Path(path),
        }
    }

    /// Stage bytes already held in memory.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            source: FileSource::Bytes(bytes),
        }
    }

    /// MIME type used in the data URI.
    #[must_use]
    pub fn mime_type(&self) -> String {
        infer_attachment_mime_type(self.content_type.as_deref(), &self.name)
    }
}

/// Reads the full content of a staged file.
pub trait FileReader: Send + Sync + 'static {
    fn read(&self, file: &StagedFile) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// Reader backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, file: &StagedFile) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        let source = file.source.clone();
        async move {
            match source {
                FileSource::Path(path) => tokio::fs::read(&path).await,
                FileSource::Bytes(bytes) => Ok(bytes),
            }
        }
    }
}

/// Batch encoder turning staged files into stored data URIs.
#[derive(Debug)]
pub struct AttachmentEncoder<R = FsReader> {
    reader: Arc<R>,
    read_timeout: Duration,
}

impl AttachmentEncoder<FsReader> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_reader(FsReader)
    }
}

impl Default for AttachmentEncoder<FsReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FileReader> AttachmentEncoder<R> {
    #[must_use]
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader: Arc::new(reader),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Encode and store every file, returning keys in selection order.
    pub async fn encode(
        &self,
        store: &dyn KeyValueStore,
        files: Vec<StagedFile>,
    ) -> Result<Vec<AttachmentKey>> {
        self.encode_with_progress(store, files, |_| {}).await
    }

    /// Like [`Self::encode`], reporting the number of reads still pending
    /// after each completion.
    ///
    /// The first failed or timed-out read fails the batch; the remaining
    /// reads are aborted and nothing is written to the store.
    pub async fn encode_with_progress<F>(
        &self,
        store: &dyn KeyValueStore,
        files: Vec<StagedFile>,
        mut on_pending: F,
    ) -> Result<Vec<AttachmentKey>>
    where
        F: FnMut(usize),
    {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let mut tasks = JoinSet::new();
        for (index, file) in files.into_iter().enumerate() {
            let reader = Arc::clone(&self.reader);
            let read_timeout = self.read_timeout;
            tasks.spawn(async move {
                let outcome = encode_one(reader.as_ref(), &file, read_timeout).await;
                (index, outcome)
            });
        }

        let mut pending = tasks.len();
        on_pending(pending);

        let mut encoded = Vec::with_capacity(pending);
        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = joined
                .map_err(|error| Error::Storage(format!("attachment task failed: {error}")))?;
            encoded.push((index, outcome?));
            pending -= 1;
            on_pending(pending);
        }

        encoded.sort_by_key(|(index, _)| *index);

        let mut keys = Vec::with_capacity(encoded.len());
        for (_, data_uri) in encoded {
            let key = AttachmentKey::generate();
            store.set_item(key.as_str(), &data_uri)?;
            keys.push(key);
        }

        tracing::info!("Stored {} attachment(s)", keys.len());
        Ok(keys)
    }
}

async fn encode_one<R: FileReader>(
    reader: &R,
    file: &StagedFile,
    read_timeout: Duration,
) -> Result<String> {
    let bytes = tokio::time::timeout(read_timeout, reader.read(file))
        .await
        .map_err(|_| Error::AttachmentTimeout {
            file: file.name.clone(),
            timeout: read_timeout,
        })?
        .map_err(|error| Error::AttachmentRead {
            file: file.name.clone(),
            reason: error.to_string(),
        })?;

    Ok(encode_data_uri(&file.mime_type(), &bytes))
}

/// Build a base64 `data:` URI.
#[must_use]
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = BASE64_STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{encoded}")
}

#[must_use]
pub fn is_image_data_uri(value: &str) -> bool {
    value.starts_with(IMAGE_DATA_URI_PREFIX)
}

/// Look up attachment keys and keep the ones holding image data URIs.
///
/// Missing slots, unreadable slots and non-image values are skipped.
#[must_use]
pub fn resolve_gallery(store: &dyn KeyValueStore, keys: &[AttachmentKey]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| match store.get_item(key.as_str()) {
            Ok(Some(value)) if is_image_data_uri(&value) => Some(value),
            Ok(Some(_)) => {
                tracing::debug!(key = %key, "Skipping non-image attachment");
                None
            }
            Ok(None) => {
                tracing::debug!(key = %key, "Skipping missing attachment");
                None
            }
            Err(error) => {
                tracing::debug!(key = %key, "Skipping unreadable attachment: {}", error);
                None
            }
        })
        .collect()
}

/// Pick a MIME type from a declared content type and the file name.
///
/// Generic declared types (`application/octet-stream`, or `text/*` for a
/// file whose extension names a media type) lose to the extension guess.
#[must_use]
pub fn infer_attachment_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    let extension_guess = mime_guess::from_path(file_name)
        .first_raw()
        .map(str::to_string);

    if let Some(content_type) = content_type {
        let trimmed = content_type.trim();
        if !trimmed.is_empty() {
            let normalized = trimmed.to_ascii_lowercase();

            if normalized != "application/octet-stream"
                && !(normalized.starts_with("text/")
                    && extension_guess.as_deref().is_some_and(is_media_mime_type))
            {
                return trimmed.to_string();
            }
        }
    }

    extension_guess.unwrap_or_else(|| {
        mime_guess::from_path(Path::new(file_name))
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    })
}

fn is_media_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
        || mime_type.starts_with("video/")
        || mime_type.starts_with("audio/")
}
