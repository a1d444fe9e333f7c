//! Services shared by every Jotter front end.

mod notebook;

pub use notebook::{Notebook, NOTES_KEY, TAGS_KEY};
