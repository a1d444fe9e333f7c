//! Navigation surface consumed by front ends.
//!
//! `/` lists notes, `/new` opens the creation form, `/<id>` shows a note and
//! `/<id>/edit` edits it. Anything else redirects to the list.

use std::fmt;

use crate::models::{Note, NoteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    New,
    Show(NoteId),
    Edit(NoteId),
}

impl Route {
    /// Parse a path, redirecting unknown shapes to [`Route::List`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["new"] => Self::New,
            [id] => Self::Show(NoteId::from(*id)),
            [id, "edit"] => Self::Edit(NoteId::from(*id)),
            _ => Self::List,
        }
    }

    /// Redirect note routes whose id is not among `notes` to the list.
    #[must_use]
    pub fn resolve(self, notes: &[Note]) -> Self {
        let missing = match &self {
            Self::Show(id) | Self::Edit(id) => !notes.iter().any(|note| &note.id == id),
            Self::List | Self::New => false,
        };
        if missing {
            Self::List
        } else {
            self
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::New => "/new".to_string(),
            Self::Show(id) => format!("/{id}"),
            Self::Edit(id) => format!("/{id}/edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str) -> Note {
        Note {
            id: id.into(),
            title: String::new(),
            markdown: String::new(),
            tags: Vec::new(),
            attachments: None,
        }
    }

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/new"), Route::New);
        assert_eq!(Route::parse("/abc"), Route::Show("abc".into()));
        assert_eq!(Route::parse("/abc/edit"), Route::Edit("abc".into()));
        assert_eq!(Route::parse("/abc/edit/"), Route::Edit("abc".into()));
    }

    #[test]
    fn unknown_paths_redirect_to_list() {
        assert_eq!(Route::parse("/abc/delete"), Route::List);
        assert_eq!(Route::parse("/a/b/c"), Route::List);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::List,
            Route::New,
            Route::Show("n1".into()),
            Route::Edit("n1".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn missing_note_redirects_to_list() {
        let notes = vec![note("n1")];
        assert_eq!(Route::Show("n1".into()).resolve(&notes), Route::Show("n1".into()));
        assert_eq!(Route::Edit("n2".into()).resolve(&notes), Route::List);
        assert_eq!(Route::New.resolve(&notes), Route::New);
    }
}
