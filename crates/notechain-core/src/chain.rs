//! # Note creation
//!
//! The user-facing operations: start a chain, or continue one from an
//! existing note. Each is split in two steps:
//!
//! 1. **Plan** (`plan_first`, `plan_next`): read the store once, generate
//!    the identifier and render the initial content. No side effects.
//! 2. **Create** (`create`): hand the plan to the store.
//!
//! A note is only created once an identifier has been resolved; any error
//! in planning leaves the store untouched.
//!
//! The snapshot read during planning is not locked. A note created by
//! someone else in between surfaces as [`crate::NoteError::CreateConflict`]
//! from the store.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::info;

use crate::config::{NoteConfig, NoteKind};
use crate::error::Result;
use crate::generator;
use crate::resolver::Snapshot;
use crate::store::{NoteHandle, NoteStore};
use crate::template::Template;

/// A note ready to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotePlan {
    pub kind: NoteKind,
    pub folder: String,
    pub basename: String,
    /// Basename of the note this one continues, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub content: String,
}

impl NotePlan {
    pub fn handle(&self) -> NoteHandle {
        NoteHandle::new(&self.folder, &self.basename)
    }
}

/// Plan the first note of a chain of `kind`.
///
/// # Errors
///
/// Returns store errors from listing the Zettelkasten folder, or the
/// generation errors of [`generator::first_zettel`].
pub fn plan_first<S: NoteStore>(
    store: &S,
    config: &NoteConfig,
    kind: NoteKind,
    now: &DateTime<FixedOffset>,
) -> Result<NotePlan> {
    let folder = config.folder(kind).to_string();

    let (basename, template) = match kind {
        NoteKind::Literature => (
            generator::first_literature().to_string(),
            Template::FirstLiterature,
        ),
        NoteKind::Zettelkasten => {
            let existing = store.list_identifiers(&folder)?;
            (
                generator::first_zettel(&existing)?.to_string(),
                Template::FirstZettel,
            )
        }
    };

    Ok(NotePlan {
        kind,
        content: template.render(now),
        folder,
        basename,
        parent: None,
    })
}

/// Plan the note following `source`.
///
/// The family is picked from the folder `source` lives in. A literature
/// successor carries the `source` field of its predecessor; a Zettelkasten
/// successor links its predecessor as `parent`.
///
/// # Errors
///
/// Returns [`crate::NoteError::UnrecognizedSourceLocation`] if `source` is
/// outside both configured folders, and the grammar and resolution errors of
/// [`generator`] otherwise.
pub fn plan_next<S: NoteStore>(
    store: &S,
    config: &NoteConfig,
    source: &NoteHandle,
    now: &DateTime<FixedOffset>,
) -> Result<NotePlan> {
    let kind = config.kind_of(&source.folder)?;
    let folder = config.folder(kind).to_string();

    let (basename, content) = match kind {
        NoteKind::Literature => {
            let next = generator::next_literature(&source.basename)?;
            let carried = store
                .read_metadata_field(source, "source")?
                .unwrap_or_default();
            let template = Template::NextLiterature { source: &carried };
            (next.to_string(), template.render(now))
        }
        NoteKind::Zettelkasten => {
            let snapshot = Snapshot::from_basenames(store.list_identifiers(&folder)?);
            let next = generator::next_zettel(&source.basename, &snapshot)?;
            let template = Template::NextZettel {
                parent: &source.basename,
            };
            (next.to_string(), template.render(now))
        }
    };

    Ok(NotePlan {
        kind,
        folder,
        basename,
        parent: Some(source.basename.clone()),
        content,
    })
}

/// Create the planned note.
///
/// # Errors
///
/// Returns whatever the store's `create_document` returns, notably
/// [`crate::NoteError::CreateConflict`].
pub fn create<S: NoteStore>(store: &S, plan: &NotePlan) -> Result<NoteHandle> {
    let handle = store.create_document(&plan.folder, &plan.basename, &plan.content)?;
    info!(
        kind = %plan.kind,
        path = %handle.relative_path().display(),
        "created note"
    );
    Ok(handle)
}

/// Plan and create the first note of a chain of `kind`.
///
/// # Errors
///
/// See [`plan_first`] and [`create`].
pub fn create_first<S: NoteStore>(
    store: &S,
    config: &NoteConfig,
    kind: NoteKind,
    now: &DateTime<FixedOffset>,
) -> Result<NoteHandle> {
    let plan = plan_first(store, config, kind, now)?;
    create(store, &plan)
}

/// Plan and create the note following `source`.
///
/// # Errors
///
/// See [`plan_next`] and [`create`].
pub fn create_next<S: NoteStore>(
    store: &S,
    config: &NoteConfig,
    source: &NoteHandle,
    now: &DateTime<FixedOffset>,
) -> Result<NoteHandle> {
    let plan = plan_next(store, config, source, now)?;
    create(store, &plan)
}
