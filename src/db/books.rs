use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Book, BookStatus, Year};

use super::connection::{load_books, save_books, LoadOutcome};

/// Result of a removal request. A missing id is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(Book),
    NotFound,
}

/// Result of a status change that passed validation.
#[derive(Debug, PartialEq, Eq)]
pub enum StatusUpdate<'a> {
    Updated(&'a Book),
    NotFound,
}

/// Input rejected by `Library::update_status` before anything is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusUpdateError {
    #[error("Invalid id format: {0}")]
    InvalidId(String),
    #[error("Invalid status '{0}', allowed values: {allowed}.", allowed = BookStatus::allowed_values())]
    InvalidStatus(String),
}

/// In-memory catalog backed one-to-one by a JSON store. Every mutation
/// rewrites the whole store before returning.
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    books: Vec<Book>,
}

impl Library {
    /// Load the library stored at `path`. A missing or corrupt store yields
    /// an empty library; the outcome is logged rather than returned.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let books = match load_books(&path) {
            LoadOutcome::Loaded(books) => {
                info!(path = %path.display(), count = books.len(), "library loaded");
                warn_on_duplicate_ids(&books);
                books
            }
            outcome => {
                info!(path = %path.display(), "starting with an empty library");
                outcome.into_books()
            }
        };

        Self { path, books }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// First book whose id equals `id` exactly.
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Append a new book with a fresh id and persist the library.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<Year>,
    ) -> Result<&Book> {
        let book = Book::new(title, author, year);
        info!(id = %book.id, title = %book.title, "adding book");
        self.books.push(book);
        self.save()?;
        Ok(&self.books[self.books.len() - 1])
    }

    /// Remove the first book whose id equals `id` exactly. Nothing is written
    /// when no book matches.
    pub fn remove(&mut self, id: &str) -> Result<RemoveOutcome> {
        let Some(index) = self.books.iter().position(|book| book.id == id) else {
            debug!(id, "no book to remove");
            return Ok(RemoveOutcome::NotFound);
        };

        let removed = self.books.remove(index);
        info!(id, title = %removed.title, "removed book");
        self.save()?;
        Ok(RemoveOutcome::Removed(removed))
    }

    /// Books matching `query` on title, author or year, in catalog order.
    pub fn find(&self, query: &str) -> Vec<&Book> {
        let found: Vec<&Book> = self.books.iter().filter(|book| book.matches(query)).collect();
        debug!(query, count = found.len(), "search finished");
        found
    }

    /// Change the status of the book with `id`.
    ///
    /// The id must be a well-formed UUID and the status one of the
    /// `BookStatus` values, otherwise the library is left untouched. The UUID
    /// parse is only a format check: the lookup compares `id` as a string,
    /// the same way `remove` does.
    pub fn update_status(
        &mut self,
        id: &str,
        status: &str,
    ) -> Result<std::result::Result<StatusUpdate<'_>, StatusUpdateError>> {
        if Uuid::parse_str(id).is_err() {
            debug!(id, "rejected malformed id");
            return Ok(Err(StatusUpdateError::InvalidId(id.to_string())));
        }
        let status = match status.parse::<BookStatus>() {
            Ok(status) => status,
            Err(err) => {
                debug!(error = %err, "rejected unknown status");
                return Ok(Err(StatusUpdateError::InvalidStatus(err.0)));
            }
        };

        let Some(index) = self.books.iter().position(|book| book.id == id) else {
            debug!(id, "no book to update");
            return Ok(Ok(StatusUpdate::NotFound));
        };

        self.books[index].status = status.as_str().to_string();
        info!(id, status = %status, "updated book status");
        self.save()?;
        Ok(Ok(StatusUpdate::Updated(&self.books[index])))
    }

    fn save(&self) -> Result<()> {
        save_books(&self.books, &self.path)
    }
}

fn warn_on_duplicate_ids(books: &[Book]) {
    let mut seen = HashSet::new();
    for book in books {
        if !seen.insert(book.id.as_str()) {
            warn!(id = %book.id, "store contains a duplicate book id");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_library() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::open(dir.path().join("library.json"));
        (dir, library)
    }

    #[test]
    fn add_appends_and_persists() {
        let (_dir, mut library) = temp_library();

        let id = library.add("War and Peace", "Tolstoy", 1869).unwrap().id.clone();

        assert_eq!(library.len(), 1);
        let reopened = Library::open(library.path());
        assert_eq!(reopened.books(), library.books());
        assert_eq!(reopened.get(&id).map(|book| book.title.as_str()), Some("War and Peace"));
    }

    #[test]
    fn remove_drops_only_the_match() {
        let (_dir, mut library) = temp_library();
        let first = library.add("A", "X", 1).unwrap().id.clone();
        let second = library.add("B", "Y", 2).unwrap().id.clone();

        let outcome = library.remove(&first).unwrap();

        assert!(matches!(outcome, RemoveOutcome::Removed(ref book) if book.id == first));
        assert_eq!(library.len(), 1);
        assert_eq!(library.books()[0].id, second);
        assert_eq!(Library::open(library.path()).len(), 1);
    }

    #[test]
    fn remove_unknown_id_does_not_touch_store() {
        let (_dir, mut library) = temp_library();

        assert_eq!(library.remove("nope").unwrap(), RemoveOutcome::NotFound);
        assert!(!library.path().exists());
    }

    #[test]
    fn update_status_changes_only_target() {
        let (_dir, mut library) = temp_library();
        let first = library.add("A", "X", 1).unwrap().id.clone();
        library.add("B", "Y", 2).unwrap();

        let outcome = library.update_status(&first, "checked out").unwrap();
        assert!(matches!(outcome, Ok(StatusUpdate::Updated(book)) if book.status == "checked out"));

        assert_eq!(library.books()[1].status, "in stock");
        let reopened = Library::open(library.path());
        assert_eq!(reopened.books()[0].status, "checked out");
    }

    #[test]
    fn update_status_rejects_bad_input() {
        let (_dir, mut library) = temp_library();
        let id = library.add("A", "X", 1).unwrap().id.clone();
        let before = library.books().to_vec();

        assert_eq!(
            library.update_status("12345", "checked out").unwrap(),
            Err(StatusUpdateError::InvalidId("12345".to_string()))
        );
        assert_eq!(
            library.update_status(&id, "borrowed").unwrap(),
            Err(StatusUpdateError::InvalidStatus("borrowed".to_string()))
        );
        assert_eq!(library.books(), before.as_slice());
        assert_eq!(Library::open(library.path()).books(), before.as_slice());
    }

    #[test]
    fn rejected_update_never_writes_store() {
        let (_dir, mut library) = temp_library();

        library.update_status("12345", "checked out").unwrap().unwrap_err();
        let stranger = Uuid::new_v4().to_string();
        library.update_status(&stranger, "lost").unwrap().unwrap_err();

        assert!(!library.path().exists());
    }

    #[test]
    fn save_failures_are_propagated() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-directory");
        std::fs::write(&blocker, "").unwrap();
        let path = dir.path().join("library.json");
        let book = Book::with_identity("A", "X", 1, Some(Uuid::new_v4().to_string()), None);
        save_books(std::slice::from_ref(&book), &path).unwrap();

        let mut library = Library::open(&path);
        library.path = blocker.join("library.json");

        assert!(library.add("B", "Y", 2).is_err());
        assert!(library.update_status(&book.id, "checked out").is_err());
        assert!(library.remove(&book.id).is_err());
    }

    #[test]
    fn update_status_on_unknown_uuid_is_not_found() {
        let (_dir, mut library) = temp_library();
        library.add("A", "X", 1).unwrap();
        let stranger = Uuid::new_v4().to_string();

        assert_eq!(
            library.update_status(&stranger, "checked out").unwrap(),
            Ok(StatusUpdate::NotFound)
        );
        assert_eq!(Library::open(library.path()).len(), 1);
    }

    #[test]
    fn not_found_update_on_fresh_library_writes_nothing() {
        let (_dir, mut library) = temp_library();
        let stranger = Uuid::new_v4().to_string();

        assert_eq!(
            library.update_status(&stranger, "checked out").unwrap(),
            Ok(StatusUpdate::NotFound)
        );
        assert!(!library.path().exists());
    }

    #[test]
    fn invalid_status_message_lists_allowed_values() {
        let err = StatusUpdateError::InvalidStatus("gone".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid status 'gone', allowed values: in stock, checked out."
        );
    }

    #[test]
    fn duplicate_ids_are_accepted_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        let book = Book::with_identity("A", "X", 1, Some("same".into()), None);
        save_books(&[book.clone(), book], &path).unwrap();

        let mut library = Library::open(&path);
        assert_eq!(library.len(), 2);

        library.remove("same").unwrap();
        assert_eq!(library.len(), 1);
    }
}
