//! Error types for notechain.

use thiserror::Error;

/// Top-level result type for notechain operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Top-level error type for notechain.
///
/// Every variant is terminal for the operation that raised it: nothing is
/// retried internally and no note is created after an error.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("file name does not follow the naming rule: {basename} (expected {expected})")]
    MalformedIdentifier {
        basename: String,
        expected: &'static str,
    },

    #[error("invalid id format: {0} (expected digits and lowercase letters alternating, starting with a digit)")]
    InvalidIdFormat(String),

    #[error("unexpected candidate id: {0}")]
    UnexpectedCandidateShape(String),

    #[error("no letter after 'z' in candidate id: {0}")]
    AlphabetExhausted(String),

    #[error("no free id found: every id starting from {start} is already in use")]
    IdSpaceExhausted { start: String },

    #[error("note is not in a configured folder: {folder}")]
    UnrecognizedSourceLocation { folder: String },

    #[error("note already exists: {0}")]
    CreateConflict(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}
