//! Collision resolution for Zettelkasten ids.
//!
//! A candidate is taken when an existing id equals it or extends it: a note
//! `5a1b2_` occupies `5a1b` as well, because `5a1b` is its ancestor in the
//! outline. Resolution walks sibling candidates until it finds a free one.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{NoteError, Result};
use crate::zettel::{next_sibling, stem_of};

/// Upper bound on the candidates checked by [`resolve`].
pub const MAX_ATTEMPTS: usize = 100;

/// Point-in-time set of ids present in one collection.
///
/// Built once per operation from the store's listing and only read after
/// that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    stems: BTreeSet<String>,
}

impl Snapshot {
    /// Build a snapshot from bare ids.
    pub fn from_stems<I, S>(stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stems: stems.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a snapshot from note basenames (`{id}_{keyword}`).
    ///
    /// Basenames without an id part are not part of the Zettelkasten and are
    /// skipped.
    pub fn from_basenames<I, S>(basenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stems = basenames
            .into_iter()
            .filter_map(|name| stem_of(name.as_ref()).map(str::to_string))
            .collect();
        Self { stems }
    }

    /// Keep only the ids at or below `source_id` in the outline.
    #[must_use]
    pub fn restrict_to(&self, source_id: &str) -> Self {
        let stems = self
            .stems
            .range(source_id.to_string()..)
            .take_while(|stem| stem.starts_with(source_id))
            .cloned()
            .collect();
        Self { stems }
    }

    /// Whether `candidate` or any id below it already exists.
    pub fn is_taken(&self, candidate: &str) -> bool {
        // Ids sharing a prefix sort contiguously, starting at the prefix itself.
        self.stems
            .range(candidate.to_string()..)
            .next()
            .is_some_and(|stem| stem.starts_with(candidate))
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}

/// Find the first free id, starting at `start` and moving through siblings.
///
/// At most [`MAX_ATTEMPTS`] candidates are checked.
///
/// # Errors
///
/// Returns [`NoteError::IdSpaceExhausted`] when every checked candidate is
/// taken, or the error of [`next_sibling`] when a candidate cannot be
/// advanced.
pub fn resolve(start: &str, snapshot: &Snapshot) -> Result<String> {
    let mut candidate = start.to_string();

    for attempt in 0..MAX_ATTEMPTS {
        if !snapshot.is_taken(&candidate) {
            debug!(%candidate, attempt, "resolved free id");
            return Ok(candidate);
        }
        debug!(%candidate, attempt, "id in use");
        candidate = next_sibling(&candidate)?;
    }

    Err(NoteError::IdSpaceExhausted {
        start: start.to_string(),
    })
}
