//! # Storage seam
//!
//! notechain never touches the file system directly. Everything it needs
//! from the place notes live goes through [`NoteStore`]:
//!
//! - list the basenames of a folder (the collection snapshot),
//! - read one frontmatter field of an existing note,
//! - create a note that does not exist yet.
//!
//! ## Implementations
//!
//! - [`crate::memory::MemStore`]: in-memory, for tests.
//! - `notechain_vault::Vault`: a directory of markdown files.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;

/// Extension of note files.
pub const NOTE_EXTENSION: &str = "md";

/// A note in a store, addressed by folder and basename.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NoteHandle {
    /// Folder relative to the store root, `/`-separated.
    pub folder: String,
    /// File name without the `.md` extension.
    pub basename: String,
}

impl NoteHandle {
    pub fn new(folder: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            basename: basename.into(),
        }
    }

    /// Path of the note relative to the store root.
    pub fn relative_path(&self) -> PathBuf {
        let file = format!("{}.{}", self.basename, NOTE_EXTENSION);
        if self.folder.is_empty() {
            PathBuf::from(file)
        } else {
            PathBuf::from(&self.folder).join(file)
        }
    }
}

/// Abstract interface to the place notes live.
///
/// Methods take `&self`; implementations needing mutation use interior
/// mutability since notechain is single-threaded.
pub trait NoteStore {
    /// Basenames of every note in `folder` and its subfolders.
    ///
    /// A missing folder lists as empty.
    fn list_identifiers(&self, folder: &str) -> Result<Vec<String>>;

    /// One frontmatter field of an existing note, `None` when absent.
    fn read_metadata_field(&self, note: &NoteHandle, field: &str) -> Result<Option<String>>;

    /// Create a note with initial `content`.
    ///
    /// MUST fail with [`crate::NoteError::CreateConflict`] rather than
    /// overwrite an existing note.
    fn create_document(&self, folder: &str, basename: &str, content: &str) -> Result<NoteHandle>;
}
