//! Identifier generation for both note families.
//!
//! Everything here is pure over the listing it is given: the caller reads
//! the collection once and creates the note afterwards.

use tracing::{debug, warn};

use crate::config::NoteKind;
use crate::error::{NoteError, Result};
use crate::literature::LiteratureId;
use crate::resolver::{resolve, Snapshot};
use crate::zettel::{first_child, ZettelName};

/// First note of a literature chain.
///
/// Always `_001`; the folder is not scanned, so an existing `_001` makes the
/// subsequent creation fail.
#[must_use]
pub fn first_literature() -> LiteratureId {
    LiteratureId::first()
}

/// Next top-level Zettelkasten note: one past the largest leading number in
/// the collection, or `1_` for an empty one.
///
/// # Errors
///
/// Returns [`NoteError::IdSpaceExhausted`] if the largest number cannot be
/// incremented.
pub fn first_zettel<I, S>(basenames: I) -> Result<ZettelName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut max = 0u64;
    for name in basenames {
        let name = name.as_ref();
        let Some(digits) = leading_number(name) else {
            continue;
        };
        match digits.parse::<u64>() {
            Ok(n) => max = max.max(n),
            Err(_) => warn!(basename = name, "skipping note with oversized leading number"),
        }
    }

    let next = max.checked_add(1).ok_or_else(|| NoteError::IdSpaceExhausted {
        start: max.to_string(),
    })?;
    debug!(max, next, "scanned top-level zettel numbers");

    Ok(ZettelName::fresh(next.to_string()))
}

fn leading_number(name: &str) -> Option<&str> {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_digit());
    let digits = &name[..name.len() - rest.len()];
    (!digits.is_empty()).then_some(digits)
}

/// Successor of a literature note: same title, next index.
///
/// # Errors
///
/// Returns [`NoteError::MalformedIdentifier`] if `source_basename` is not a
/// literature name.
pub fn next_literature(source_basename: &str) -> Result<LiteratureId> {
    Ok(LiteratureId::parse(source_basename)?.next())
}

/// Successor of a Zettelkasten note: the first free child of its id.
///
/// The new name has an empty keyword.
///
/// # Errors
///
/// Returns the grammar errors of [`ZettelName::parse`] and
/// [`first_child`], or the resolution errors of [`resolve`].
pub fn next_zettel(source_basename: &str, snapshot: &Snapshot) -> Result<ZettelName> {
    let source = ZettelName::parse(source_basename)?;
    let start = first_child(source.id())?;
    let siblings = snapshot.restrict_to(source.id());
    debug!(
        source = source.id(),
        %start,
        existing = siblings.len(),
        "resolving zettel successor"
    );

    let id = resolve(&start, &siblings)?;
    Ok(ZettelName::fresh(id))
}

/// Basename of the first note of a chain of `kind` in a collection.
///
/// # Errors
///
/// See [`first_zettel`].
pub fn generate_first<I, S>(kind: NoteKind, basenames: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match kind {
        NoteKind::Literature => Ok(first_literature().to_string()),
        NoteKind::Zettelkasten => Ok(first_zettel(basenames)?.to_string()),
    }
}

/// Basename of the note following `source_basename` in a collection.
///
/// # Errors
///
/// See [`next_literature`] and [`next_zettel`].
pub fn generate_next<I, S>(kind: NoteKind, source_basename: &str, basenames: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match kind {
        NoteKind::Literature => Ok(next_literature(source_basename)?.to_string()),
        NoteKind::Zettelkasten => {
            let snapshot = Snapshot::from_basenames(basenames);
            Ok(next_zettel(source_basename, &snapshot)?.to_string())
        }
    }
}
