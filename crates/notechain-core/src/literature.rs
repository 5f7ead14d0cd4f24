//! Literature note identifiers: `{title}_{index}`.
//!
//! The index is a zero-padded decimal of width 3. The width is a minimum,
//! so the successor of `report_999` is `report_1000`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{NoteError, Result};

/// Human-readable form of the literature naming rule, used in error messages.
pub const LITERATURE_PATTERN: &str = "{title}_{index (3 digits, zero-padded)}";

static LITERATURE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_(\d{3})$").expect("literature pattern is valid"));

/// A parsed literature identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteratureId {
    title: String,
    index: u32,
}

impl LiteratureId {
    #[must_use]
    pub fn new(title: impl Into<String>, index: u32) -> Self {
        Self {
            title: title.into(),
            index,
        }
    }

    /// The identifier given to the first note of a chain: `_001`.
    ///
    /// The title is left empty for the user to fill in when renaming.
    #[must_use]
    pub fn first() -> Self {
        Self::new(String::new(), 1)
    }

    /// Parse a basename of the form `{title}_{NNN}`.
    ///
    /// The title is everything before the last underscore that is followed
    /// by exactly three digits at the end of the name.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::MalformedIdentifier`] if the basename does not
    /// follow the naming rule.
    pub fn parse(basename: &str) -> Result<Self> {
        let malformed = || NoteError::MalformedIdentifier {
            basename: basename.to_string(),
            expected: LITERATURE_PATTERN,
        };

        let caps = LITERATURE_NAME.captures(basename).ok_or_else(malformed)?;
        let index = caps[2].parse::<u32>().map_err(|_| malformed())?;

        Ok(Self::new(&caps[1], index))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The next identifier in the chain: same title, index + 1.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.title.clone(), self.index + 1)
    }
}

impl fmt::Display for LiteratureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:03}", self.title, self.index)
    }
}

impl FromStr for LiteratureId {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
