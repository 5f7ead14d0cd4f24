use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use crate::error::{NoteError, Result};
use crate::frontmatter::read_field;
use crate::store::{NoteHandle, NoteStore};

/// In-memory note store for tests.
///
/// Uses `RefCell` for interior mutability since notechain is single-threaded,
/// which lets [`NoteStore`] keep `&self` on every method.
#[derive(Debug, Default)]
pub struct MemStore {
    notes: RefCell<BTreeMap<NoteHandle, String>>,
    simulate_create_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `(folder, basename, content)` entries.
    pub fn with_notes<'a, I>(notes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let store = Self::new();
        for (folder, basename, content) in notes {
            store.insert(folder, basename, content);
        }
        store
    }

    /// Put a note in place, replacing any existing one.
    pub fn insert(&self, folder: &str, basename: &str, content: &str) {
        self.notes
            .borrow_mut()
            .insert(NoteHandle::new(folder, basename), content.to_string());
    }

    /// Content of a note, if present.
    pub fn content(&self, note: &NoteHandle) -> Option<String> {
        self.notes.borrow().get(note).cloned()
    }

    pub fn len(&self) -> usize {
        self.notes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.borrow().is_empty()
    }

    /// Enable create error simulation for testing error handling.
    pub fn set_simulate_create_error(&self, simulate: bool) {
        *self.simulate_create_error.borrow_mut() = simulate;
    }
}

fn in_folder(note: &NoteHandle, folder: &str) -> bool {
    folder.is_empty()
        || note.folder == folder
        || note
            .folder
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl NoteStore for MemStore {
    fn list_identifiers(&self, folder: &str) -> Result<Vec<String>> {
        let notes = self.notes.borrow();
        Ok(notes
            .keys()
            .filter(|note| in_folder(note, folder))
            .map(|note| note.basename.clone())
            .collect())
    }

    fn read_metadata_field(&self, note: &NoteHandle, field: &str) -> Result<Option<String>> {
        let notes = self.notes.borrow();
        let content = notes.get(note).ok_or_else(|| {
            NoteError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such note: {}", note.relative_path().display()),
            ))
        })?;
        read_field(content, field)
    }

    fn create_document(&self, folder: &str, basename: &str, content: &str) -> Result<NoteHandle> {
        if *self.simulate_create_error.borrow() {
            return Err(NoteError::Io(io::Error::other("simulated create error")));
        }

        let handle = NoteHandle::new(folder, basename);
        let mut notes = self.notes.borrow_mut();
        if notes.contains_key(&handle) {
            return Err(NoteError::CreateConflict(
                handle.relative_path().display().to_string(),
            ));
        }
        notes.insert(handle.clone(), content.to_string());
        Ok(handle)
    }
}
