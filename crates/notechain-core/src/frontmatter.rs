//! YAML frontmatter reading and stamping.
//!
//! Handles the `---` delimited YAML frontmatter at the top of a note.
//! Format:
//! ```markdown
//! ---
//! source: The Art of War
//! tags:
//! created_at: 2025/02/10 09:15
//! updated_at: 2025/02/10 09:15
//! ---
//!
//! Body here
//! ```

use serde_yaml::Value;
use tracing::warn;

use crate::error::{NoteError, Result};

/// Split a note into frontmatter YAML and body content.
///
/// Returns `(yaml_str, body)` where `yaml_str` is the raw YAML between
/// `---` delimiters and `body` is everything after the closing `---`.
///
/// # Errors
///
/// Returns [`NoteError::Parse`] if the note does not start with a complete
/// frontmatter block.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let content = content.trim_start();

    let after_first = content.strip_prefix("---").ok_or_else(|| {
        NoteError::Parse("note must start with '---' frontmatter delimiter".to_string())
    })?;
    let after_first = after_first.trim_start_matches(['\r', '\n']);

    // Empty block: the closing delimiter follows directly
    if let Some(rest) = after_first.strip_prefix("---") {
        return Ok(("", strip_line_break(rest)));
    }

    let close_pos = after_first.find("\n---").ok_or_else(|| {
        NoteError::Parse("no closing '---' frontmatter delimiter found".to_string())
    })?;

    let yaml = after_first[..close_pos].trim_end_matches('\r');
    let rest = &after_first[close_pos + 4..]; // skip \n---

    Ok((yaml, strip_line_break(rest)))
}

fn strip_line_break(rest: &str) -> &str {
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n').unwrap_or(rest)
}

/// Read one top-level frontmatter field as text.
///
/// Scalars are rendered as they read (`42`, `true`); sequences and maps are
/// rendered as inline YAML. A null or missing field, a note without
/// frontmatter, and frontmatter that is not valid YAML all read as `None`.
///
/// # Errors
///
/// Returns [`NoteError::Serialization`] if a sequence or map value cannot be
/// rendered back to YAML.
pub fn read_field(content: &str, field: &str) -> Result<Option<String>> {
    let Ok((yaml, _)) = split_frontmatter(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            warn!(field, error = %e, "ignoring unparsable frontmatter");
            return Ok(None);
        }
    };

    let text = match value.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(
            serde_yaml::to_string(other)
                .map_err(|e| NoteError::Serialization(e.to_string()))?
                .trim_end()
                .to_string(),
        ),
    };

    Ok(text)
}

/// Set `updated_at` in the frontmatter to `stamp`.
///
/// An existing top-level `updated_at:` line is replaced in place; otherwise
/// the field is appended to the block. The body is kept as is.
///
/// # Errors
///
/// Returns [`NoteError::Parse`] if the note has no frontmatter block.
pub fn touch_updated_at(content: &str, stamp: &str) -> Result<String> {
    let (yaml, body) = split_frontmatter(content)?;
    let updated = format!("updated_at: {stamp}");

    let mut lines: Vec<&str> = yaml.lines().collect();
    match lines.iter().position(|line| line.starts_with("updated_at:")) {
        Some(pos) => lines[pos] = &updated,
        None => lines.push(&updated),
    }

    let mut output = String::with_capacity(content.len() + updated.len());
    output.push_str("---\n");
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str("---\n");
    output.push_str(body);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "---\nsource: Thinking, Fast and Slow\ntags:\ncreated_at: 2025/02/10 09:15\nupdated_at: 2025/02/10 09:15\n---\n\n## Notes\n";

    #[test]
    fn split_frontmatter_extracts_yaml_and_body() {
        let (yaml, body) = split_frontmatter(NOTE).unwrap();
        assert!(yaml.contains("source: Thinking"));
        assert!(yaml.ends_with("updated_at: 2025/02/10 09:15"));
        assert_eq!(body, "\n## Notes\n");
    }

    #[test]
    fn split_frontmatter_rejects_missing_opener() {
        let result = split_frontmatter("source: x\n---\n");
        assert!(result.is_err());
    }

    #[test]
    fn split_frontmatter_rejects_missing_closer() {
        let result = split_frontmatter("---\nsource: x\n");
        assert!(result.is_err());
    }

    #[test]
    fn split_frontmatter_accepts_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nbody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "body");
    }

    #[test]
    fn split_frontmatter_tolerates_leading_blank_line() {
        let (yaml, _) = split_frontmatter("\n---\nsource: x\n---\n").unwrap();
        assert_eq!(yaml, "source: x");
    }

    #[test]
    fn read_field_returns_string_value() {
        assert_eq!(
            read_field(NOTE, "source").unwrap().as_deref(),
            Some("Thinking, Fast and Slow")
        );
    }

    #[test]
    fn read_field_treats_empty_and_missing_as_none() {
        assert_eq!(read_field(NOTE, "tags").unwrap(), None);
        assert_eq!(read_field(NOTE, "author").unwrap(), None);
        assert_eq!(read_field("# no frontmatter", "source").unwrap(), None);
        assert_eq!(read_field("---\n---\n", "source").unwrap(), None);
    }

    #[test]
    fn read_field_renders_scalars() {
        let note = "---\nsource: 42\ndraft: true\n---\n";
        assert_eq!(read_field(note, "source").unwrap().as_deref(), Some("42"));
        assert_eq!(read_field(note, "draft").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn read_field_treats_invalid_yaml_as_absent() {
        let note = "---\nsource: [unclosed\n---\n";
        assert_eq!(read_field(note, "source").unwrap(), None);
    }

    #[test]
    fn touch_replaces_existing_updated_at() {
        let touched = touch_updated_at(NOTE, "2025/03/01 08:00").unwrap();
        assert!(touched.contains("updated_at: 2025/03/01 08:00\n"));
        assert!(touched.contains("created_at: 2025/02/10 09:15\n"));
        assert!(!touched.contains("updated_at: 2025/02/10 09:15"));
        assert!(touched.ends_with("---\n\n## Notes\n"));
    }

    #[test]
    fn touch_appends_missing_updated_at() {
        let touched = touch_updated_at("---\nsource: x\n---\nbody\n", "2025/03/01 08:00").unwrap();
        assert_eq!(
            touched,
            "---\nsource: x\nupdated_at: 2025/03/01 08:00\n---\nbody\n"
        );
    }

    #[test]
    fn touch_ignores_nested_updated_at() {
        let note = "---\nmeta:\n  updated_at: old\n---\n";
        let touched = touch_updated_at(note, "2025/03/01 08:00").unwrap();
        assert!(touched.contains("  updated_at: old\n"));
        assert!(touched.contains("\nupdated_at: 2025/03/01 08:00\n"));
    }

    #[test]
    fn touch_requires_frontmatter() {
        assert!(touch_updated_at("# plain note\n", "2025/03/01 08:00").is_err());
    }
}
