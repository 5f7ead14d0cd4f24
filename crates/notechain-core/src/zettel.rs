//! Zettelkasten note identifiers: `{id}_{keyword}`.
//!
//! An id alternates runs of digits and single lowercase letters, starting
//! with a digit: `5`, `5a`, `5a1`, `5a12b`. Each extra component descends one
//! level in the outline. The keyword is free text; generated names leave it
//! empty for the user to fill in.
//!
//! Both increment rules work on an [`IdTail`]: the id split into everything
//! before its last atomic component and that component itself.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{NoteError, Result};

/// Human-readable form of the Zettelkasten naming rule, used in error messages.
pub const ZETTEL_PATTERN: &str = "{id}_{keyword}";

static ZETTEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_(.+)$").expect("zettel pattern is valid"));

static ZETTEL_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_").expect("zettel stem pattern is valid"));

/// A parsed Zettelkasten basename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZettelName {
    id: String,
    keyword: String,
}

impl ZettelName {
    #[must_use]
    pub fn new(id: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            keyword: keyword.into(),
        }
    }

    /// A freshly generated name: the keyword is left empty.
    #[must_use]
    pub fn fresh(id: impl Into<String>) -> Self {
        Self::new(id, String::new())
    }

    /// Parse a basename into its id and keyword.
    ///
    /// The id is the shortest non-empty prefix that is followed by an
    /// underscore; everything after that underscore is the keyword, which
    /// must not be empty. A freshly created `8_` has to be given a keyword
    /// before it can be continued.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::MalformedIdentifier`] if there is no underscore
    /// after a non-empty id, or nothing after that underscore.
    pub fn parse(basename: &str) -> Result<Self> {
        let caps = ZETTEL_NAME
            .captures(basename)
            .ok_or_else(|| NoteError::MalformedIdentifier {
                basename: basename.to_string(),
                expected: ZETTEL_PATTERN,
            })?;

        Ok(Self::new(&caps[1], &caps[2]))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl fmt::Display for ZettelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.keyword)
    }
}

/// The id portion of a basename, or `None` for names without one.
///
/// Unlike [`ZettelName::parse`] the keyword may be empty, so fresh notes
/// such as `8_` still occupy their id.
pub fn stem_of(basename: &str) -> Option<&str> {
    ZETTEL_STEM
        .captures(basename)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The last atomic component of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal<'a> {
    /// The maximal run of ASCII digits at the end of the id.
    Number(&'a str),
    /// A single trailing lowercase ASCII letter.
    Letter(char),
}

/// An id split into its prefix and last atomic component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdTail<'a> {
    pub prefix: &'a str,
    pub terminal: Terminal<'a>,
}

impl<'a> IdTail<'a> {
    /// Split an id on its last component.
    ///
    /// Returns `None` when the id is empty or ends in anything other than an
    /// ASCII digit or a lowercase ASCII letter.
    pub fn split(id: &'a str) -> Option<Self> {
        let last = id.chars().next_back()?;

        if last.is_ascii_lowercase() {
            let prefix = &id[..id.len() - 1];
            return Some(Self {
                prefix,
                terminal: Terminal::Letter(last),
            });
        }

        if last.is_ascii_digit() {
            let run_start = id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
            return Some(Self {
                prefix: &id[..run_start],
                terminal: Terminal::Number(&id[run_start..]),
            });
        }

        None
    }
}

/// Classify the terminal character of an id.
///
/// # Errors
///
/// Returns [`NoteError::InvalidIdFormat`] if the id is empty or ends in
/// something other than a digit or a lowercase letter.
pub fn classify(id: &str) -> Result<Terminal<'_>> {
    IdTail::split(id)
        .map(|tail| tail.terminal)
        .ok_or_else(|| NoteError::InvalidIdFormat(id.to_string()))
}

/// The first candidate below `id`: open a new level in the outline.
///
/// A digit-terminated id gains a letter (`5a1` → `5a1a`), a letter-terminated
/// id gains a digit (`5a1a` → `5a1a1`).
///
/// # Errors
///
/// Returns [`NoteError::InvalidIdFormat`] if `id` has no valid terminal.
pub fn first_child(id: &str) -> Result<String> {
    let suffix = match classify(id)? {
        Terminal::Number(_) => 'a',
        Terminal::Letter(_) => '1',
    };

    let mut child = String::with_capacity(id.len() + 1);
    child.push_str(id);
    child.push(suffix);
    Ok(child)
}

/// The next sibling of `candidate`: bump only its last component.
///
/// A trailing letter moves one step through the alphabet (`5a1a` → `5a1b`);
/// a trailing digit run is read as a number and incremented in place, growing
/// the id when it carries (`5a9` → `5a10`).
///
/// # Errors
///
/// Returns [`NoteError::AlphabetExhausted`] for a trailing `z` and
/// [`NoteError::UnexpectedCandidateShape`] when the candidate has no valid
/// terminal or its number overflows.
pub fn next_sibling(candidate: &str) -> Result<String> {
    let unexpected = || NoteError::UnexpectedCandidateShape(candidate.to_string());
    let tail = IdTail::split(candidate).ok_or_else(unexpected)?;

    match tail.terminal {
        Terminal::Letter('z') => Err(NoteError::AlphabetExhausted(candidate.to_string())),
        Terminal::Letter(letter) => {
            let next = char::from(letter as u8 + 1);
            Ok(format!("{}{}", tail.prefix, next))
        }
        Terminal::Number(run) => {
            let next = run
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_add(1))
                .ok_or_else(unexpected)?;
            Ok(format!("{}{}", tail.prefix, next))
        }
    }
}
