//! Data models for Jotter

mod attachment;
mod note;
mod tag;

pub use attachment::{AttachmentKey, ATTACHMENT_KEY_PREFIX};
pub use note::{Note, NoteData, NoteId, RawNote};
pub use tag::{Tag, TagId};
