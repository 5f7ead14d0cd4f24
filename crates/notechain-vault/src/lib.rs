//! # notechain-vault
//!
//! File system backing for notechain.
//!
//! A vault is a directory of markdown notes. Its layout is read from
//! `.notechain/config.toml`:
//!
//! ```text
//! vault/
//! ├── .notechain/
//! │   └── config.toml
//! ├── 00_Insights/       literature notes
//! └── 10_Zettels/        zettelkasten notes
//! ```
//!
//! [`Vault`] implements [`NoteStore`], so the creation flows of
//! `notechain_core::chain` run against it unchanged.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use notechain_core::frontmatter::{read_field, touch_updated_at};
use notechain_core::{NoteConfig, NoteError, NoteHandle, NoteStore, Result, NOTE_EXTENSION};

/// Directory holding vault metadata, relative to the vault root.
pub const CONFIG_DIR: &str = ".notechain";

/// Name of the config file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// A vault rooted at a directory.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    config: NoteConfig,
}

impl Vault {
    /// Open the vault at `root`.
    ///
    /// A missing config file yields the default layout.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if `root` does not exist, and
    /// [`NoteError::Config`] if the config file is not valid TOML.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().canonicalize()?;
        let config = load_config(&root)?;
        debug!(root = %root.display(), ?config, "opened vault");
        Ok(Self { root, config })
    }

    /// Create a vault at `root`, or complete an existing one.
    ///
    /// Writes a default config file unless one is present, then creates both
    /// note folders. Existing files are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] on file system failures.
    pub fn init(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let config_path = config_path(root);

        if !config_path.exists() {
            fs::create_dir_all(root.join(CONFIG_DIR))?;
            let text = toml::to_string_pretty(&NoteConfig::default())
                .map_err(|e| NoteError::Serialization(e.to_string()))?;
            fs::write(&config_path, text)?;
            debug!(path = %config_path.display(), "wrote default config");
        }

        let vault = Self::open(root)?;
        fs::create_dir_all(vault.root.join(&vault.config.literature_folder))?;
        fs::create_dir_all(vault.root.join(&vault.config.zettelkasten_folder))?;
        Ok(vault)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &NoteConfig {
        &self.config
    }

    /// Absolute path of `note` on disk.
    pub fn absolute_path(&self, note: &NoteHandle) -> PathBuf {
        self.root.join(note.relative_path())
    }

    /// Turn a user-supplied note path into a handle.
    ///
    /// `path` may be absolute or relative to the vault root, with or without
    /// the `.md` extension. The note must exist.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the note does not exist,
    /// [`NoteError::UnrecognizedSourceLocation`] if it lies outside the vault,
    /// and [`NoteError::Parse`] if it is not a markdown file.
    pub fn resolve_note(&self, path: impl AsRef<Path>) -> Result<NoteHandle> {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let path = with_note_extension(path).canonicalize()?;

        if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
            return Err(NoteError::Parse(format!(
                "not a markdown note: {}",
                path.display()
            )));
        }

        let relative =
            path.strip_prefix(&self.root)
                .map_err(|_| NoteError::UnrecognizedSourceLocation {
                    folder: path
                        .parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                })?;

        let basename = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| NoteError::Parse(format!("invalid note name: {}", path.display())))?;
        let folder = relative.parent().map(folder_string).transpose()?;

        Ok(NoteHandle::new(folder.unwrap_or_default(), basename))
    }

    /// Refresh the `updated_at` field of an existing note.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the note cannot be read or written and
    /// [`NoteError::Parse`] if it has no frontmatter.
    pub fn touch(&self, note: &NoteHandle, stamp: &str) -> Result<()> {
        let path = self.absolute_path(note);
        let content = fs::read_to_string(&path)?;
        fs::write(&path, touch_updated_at(&content, stamp)?)?;
        debug!(path = %path.display(), stamp, "touched note");
        Ok(())
    }
}

/// Path of the config file of the vault at `root`.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

fn load_config(root: &Path) -> Result<NoteConfig> {
    let path = config_path(root);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(NoteConfig::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&text).map_err(|e| NoteError::Config(format!("{}: {e}", path.display())))
}

fn with_note_extension(path: PathBuf) -> PathBuf {
    if path.exists() || path.extension().and_then(|e| e.to_str()) == Some(NOTE_EXTENSION) {
        return path;
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(NOTE_EXTENSION);
    PathBuf::from(name)
}

fn folder_string(dir: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in dir.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                NoteError::Parse(format!("folder name is not UTF-8: {}", dir.display()))
            })?),
            other => {
                return Err(NoteError::Parse(format!(
                    "unexpected path component {other:?} in {}",
                    dir.display()
                )))
            }
        }
    }
    Ok(parts.join("/"))
}

/// Write `content` into a freshly created note, removing the note again if
/// the write fails so that a retry does not hit `CreateConflict`.
fn write_or_remove(path: &Path, file: &mut impl Write, content: &[u8]) -> io::Result<()> {
    let written = file.write_all(content).and_then(|()| file.flush());
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partial note");
        }
        return Err(e);
    }
    Ok(())
}

impl NoteStore for Vault {
    fn list_identifiers(&self, folder: &str) -> Result<Vec<String>> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut basenames = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                basenames.push(stem.to_string());
            }
        }

        debug!(folder, count = basenames.len(), "listed notes");
        Ok(basenames)
    }

    fn read_metadata_field(&self, note: &NoteHandle, field: &str) -> Result<Option<String>> {
        let content = fs::read_to_string(self.absolute_path(note))?;
        read_field(&content, field)
    }

    fn create_document(&self, folder: &str, basename: &str, content: &str) -> Result<NoteHandle> {
        let handle = NoteHandle::new(folder, basename);
        let path = self.absolute_path(&handle);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => {
                    NoteError::CreateConflict(handle.relative_path().display().to_string())
                }
                _ => NoteError::Io(e),
            })?;
        write_or_remove(&path, &mut file, content.as_bytes())?;

        debug!(path = %path.display(), "created document");
        Ok(handle)
    }
}
