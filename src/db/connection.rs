use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::models::Book;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".home-library";
/// JSON file name stored inside the application data directory.
const STORE_FILE_NAME: &str = "library.json";

/// What was found at the store path when the library was opened. Callers
/// that only care about the books use `into_books`, which collapses every
/// non-`Loaded` case to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<Book>),
    Missing,
    Corrupt(String),
}

impl LoadOutcome {
    pub fn into_books(self) -> Vec<Book> {
        match self {
            LoadOutcome::Loaded(books) => books,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => Vec::new(),
        }
    }
}

/// Resolve the default store location inside the user's home, falling back
/// to the working directory when no home directory is known.
pub fn default_store_path() -> PathBuf {
    match BaseDirs::new() {
        Some(base_dirs) => base_dirs.home_dir().join(DATA_DIR_NAME).join(STORE_FILE_NAME),
        None => PathBuf::from(STORE_FILE_NAME),
    }
}

/// Read every book from the store. Never fails: a missing, unreadable or
/// malformed file is reported through the outcome instead.
pub fn load_books(path: &Path) -> LoadOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file does not exist yet");
            return LoadOutcome::Missing;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "store file unreadable, starting empty");
            return LoadOutcome::Corrupt(err.to_string());
        }
    };

    match serde_json::from_str::<Vec<Book>>(&content) {
        Ok(books) => {
            debug!(path = %path.display(), count = books.len(), "loaded store");
            LoadOutcome::Loaded(books)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "store file is corrupt, starting empty");
            LoadOutcome::Corrupt(err.to_string())
        }
    }
}

/// Overwrite the store with the full list of books, creating the parent
/// directory on first use.
pub fn save_books(books: &[Book], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    books
        .serialize(&mut serializer)
        .context("failed to serialize books")?;

    fs::write(path, buffer)
        .with_context(|| format!("failed to write store file {}", path.display()))?;
    debug!(path = %path.display(), count = books.len(), "saved store");
    Ok(())
}
