//! Initial content of newly created notes.
//!
//! Every note starts with a YAML frontmatter block stamped with its creation
//! time. Literature notes carry their `source` down the chain; Zettelkasten
//! successors link back to the note they were derived from.

use chrono::{DateTime, FixedOffset};

/// Format of `created_at` / `updated_at` values.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Render a timestamp the way note frontmatter stores it.
pub fn stamp(now: &DateTime<FixedOffset>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Frontmatter template for a new note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template<'a> {
    /// First note of a literature chain.
    FirstLiterature,
    /// First note of a Zettelkasten branch.
    FirstZettel,
    /// Literature successor, carrying the predecessor's `source`.
    NextLiterature { source: &'a str },
    /// Zettelkasten successor, linking the predecessor as `parent`.
    NextZettel { parent: &'a str },
}

impl Template<'_> {
    /// Render the note content for creation time `now`.
    pub fn render(&self, now: &DateTime<FixedOffset>) -> String {
        let now = stamp(now);
        let mut out = String::from("---\n");

        match self {
            Self::FirstLiterature => {
                out.push_str("source:\ntags:\n");
            }
            Self::NextLiterature { source } => {
                out.push_str(&field("source", source));
                out.push_str("tags:\n");
            }
            Self::FirstZettel => {
                out.push_str("aliases:\nparent:\n");
            }
            Self::NextZettel { parent } => {
                out.push_str("aliases:\n");
                out.push_str(&field("parent", &format!("[[{parent}]]")));
            }
        }

        out.push_str(&format!("created_at: {now}\nupdated_at: {now}\n---\n"));
        out
    }
}

fn field(key: &str, value: &str) -> String {
    if value.is_empty() {
        return format!("{key}:\n");
    }
    format!("{key}: {}\n", yaml_scalar(value))
}

/// Quote `value` only where YAML needs it.
fn yaml_scalar(value: &str) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}
