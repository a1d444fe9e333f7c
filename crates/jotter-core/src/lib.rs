//! jotter-core - Core library for Jotter
//!
//! This crate contains the models, the persisted key-value layer, the
//! note/tag data layer and attachment encoding used by every Jotter
//! front end.

pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod media;
pub mod models;
pub mod persisted;
pub mod routes;
pub mod search;
pub mod services;
pub mod storage;
mod util;

pub use error::{Error, Result};
pub use models::{AttachmentKey, Note, NoteData, NoteId, RawNote, Tag, TagId};
pub use persisted::Persisted;
pub use services::Notebook;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
