//! # Configuration
//!
//! Which folder of the vault holds which family of notes. The values are
//! passed explicitly to every operation that needs them.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `literature_folder` | `00_Insights` | Folder of literature notes (`{title}_{NNN}`) |
//! | `zettelkasten_folder` | `10_Zettels` | Folder of Zettelkasten notes (`{id}_{keyword}`) |
//!
//! The vault crate loads these from `.notechain/config.toml`; every key is
//! optional.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};

pub const DEFAULT_LITERATURE_FOLDER: &str = "00_Insights";
pub const DEFAULT_ZETTELKASTEN_FOLDER: &str = "10_Zettels";

/// The two note families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Literature,
    Zettelkasten,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literature => f.write_str("literature"),
            Self::Zettelkasten => f.write_str("zettelkasten"),
        }
    }
}

impl FromStr for NoteKind {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "literature" => Ok(Self::Literature),
            "zettelkasten" => Ok(Self::Zettelkasten),
            other => Err(NoteError::Parse(format!("unknown note kind: {other}"))),
        }
    }
}

/// Folder layout of a vault.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NoteConfig {
    /// Folder of literature notes, relative to the vault root.
    pub literature_folder: String,

    /// Folder of Zettelkasten notes, relative to the vault root.
    pub zettelkasten_folder: String,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            literature_folder: DEFAULT_LITERATURE_FOLDER.to_string(),
            zettelkasten_folder: DEFAULT_ZETTELKASTEN_FOLDER.to_string(),
        }
    }
}

impl NoteConfig {
    /// The folder configured for `kind`.
    pub fn folder(&self, kind: NoteKind) -> &str {
        match kind {
            NoteKind::Literature => &self.literature_folder,
            NoteKind::Zettelkasten => &self.zettelkasten_folder,
        }
    }

    /// The family of notes living directly in `folder`.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::UnrecognizedSourceLocation`] if `folder` is
    /// neither configured folder.
    pub fn kind_of(&self, folder: &str) -> Result<NoteKind> {
        let folder = normalize(folder);
        if folder == normalize(&self.literature_folder) {
            Ok(NoteKind::Literature)
        } else if folder == normalize(&self.zettelkasten_folder) {
            Ok(NoteKind::Zettelkasten)
        } else {
            Err(NoteError::UnrecognizedSourceLocation {
                folder: folder.to_string(),
            })
        }
    }
}

fn normalize(folder: &str) -> &str {
    folder.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NoteConfig::default();
        assert_eq!(config.literature_folder, "00_Insights");
        assert_eq!(config.zettelkasten_folder, "10_Zettels");
    }

    #[test]
    fn folder_by_kind() {
        let config = NoteConfig::default();
        assert_eq!(config.folder(NoteKind::Literature), "00_Insights");
        assert_eq!(config.folder(NoteKind::Zettelkasten), "10_Zettels");
    }

    #[test]
    fn kind_of_configured_folders() {
        let config = NoteConfig::default();
        assert_eq!(config.kind_of("00_Insights").unwrap(), NoteKind::Literature);
        assert_eq!(config.kind_of("10_Zettels/").unwrap(), NoteKind::Zettelkasten);
    }

    #[test]
    fn kind_of_other_folder_fails() {
        let config = NoteConfig::default();
        let err = config.kind_of("99_Inbox").unwrap_err();
        assert!(
            matches!(err, NoteError::UnrecognizedSourceLocation { ref folder } if folder == "99_Inbox")
        );
    }

    #[test]
    fn nested_folder_is_not_configured_folder() {
        let config = NoteConfig::default();
        assert!(config.kind_of("10_Zettels/archive").is_err());
    }

    #[test]
    fn custom_folders() {
        let config = NoteConfig {
            literature_folder: "lit".to_string(),
            zettelkasten_folder: "zk".to_string(),
        };
        assert_eq!(config.kind_of("zk").unwrap(), NoteKind::Zettelkasten);
        assert!(config.kind_of("00_Insights").is_err());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: NoteConfig = serde_yaml::from_str("literature_folder: books").unwrap();
        assert_eq!(config.literature_folder, "books");
        assert_eq!(config.zettelkasten_folder, "10_Zettels");
    }

    #[test]
    fn note_kind_text_round_trip() {
        for kind in [NoteKind::Literature, NoteKind::Zettelkasten] {
            assert_eq!(kind.to_string().parse::<NoteKind>().unwrap(), kind);
        }
        assert!("daily".parse::<NoteKind>().is_err());
    }
}
