//! # notechain-core
//!
//! Identifier grammar, collision resolution and note generation for
//! sequential note chains.
//!
//! Two families of notes are supported:
//! - Literature notes ([`LiteratureId`]), named `{title}_{NNN}` and numbered
//!   sequentially within a title.
//! - Zettelkasten notes ([`ZettelName`]), named `{id}_{keyword}` where the id
//!   alternates digit runs and single letters (`5a12b`) and encodes a tree.
//!
//! Generation is pure over a snapshot of existing basenames
//! ([`resolver::Snapshot`]). All storage access goes through the
//! [`NoteStore`] trait; [`chain`] ties the two together.

pub mod chain;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod generator;
pub mod literature;
pub mod memory;
pub mod resolver;
pub mod store;
pub mod template;
pub mod zettel;

pub use chain::NotePlan;
pub use config::{NoteConfig, NoteKind};
pub use error::{NoteError, Result};
pub use literature::LiteratureId;
pub use memory::MemStore;
pub use store::{NoteHandle, NoteStore, NOTE_EXTENSION};
pub use zettel::ZettelName;
