//! Domain models that mirror the JSON store and get passed throughout the
//! menu. The intent is that these types stay light-weight data holders so the
//! catalog layer can focus on search and persistence logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Publication year as it was entered. Numbers typed at the prompt become
/// `Number`, anything else is kept verbatim as `Text` so it survives a save
/// and reload unchanged. Values of any other JSON type found in the store
/// land in `Other` and are written back as they were.
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Year {
    /// Interpret raw prompt input, preferring the integer form when it parses.
    pub fn parse_input(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(number) => Year::Number(number),
            Err(_) => Year::Text(raw.to_string()),
        }
    }
}

impl From<i64> for Year {
    fn from(number: i64) -> Self {
        Year::Number(number)
    }
}

impl From<&str> for Year {
    fn from(text: &str) -> Self {
        Year::Text(text.to_string())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(number) => write!(f, "{number}"),
            Year::Text(text) => f.write_str(text),
            Year::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Status text that is not one of the `BookStatus` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown book status '{0}'")]
pub struct UnknownStatus(pub String);

/// The two states a book may be moved between through a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    InStock,
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::InStock, BookStatus::CheckedOut];

    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::InStock => "in stock",
            BookStatus::CheckedOut => "checked out",
        }
    }

    /// Comma separated list of the accepted values, used in prompts and
    /// validation messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for BookStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One catalog entry. Field order matches the keys written to the store.
pub struct Book {
    /// Opaque identifier, a hyphenated UUID v4 for books created here. Ids
    /// read from the store are trusted verbatim; entries without one get a
    /// fresh id.
    #[serde(default = "generate_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: Year,
    /// Kept as free text: the store may hold values written by other tools,
    /// and only `Library::update_status` restricts it to `BookStatus`.
    #[serde(default = "default_status")]
    pub status: String,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_status() -> String {
    BookStatus::InStock.as_str().to_string()
}

impl Book {
    /// Create a book with a freshly generated id and the default status.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: impl Into<Year>) -> Self {
        Self::with_identity(title, author, year, None, None)
    }

    /// Create a book, accepting an existing id and status without
    /// validating either of them.
    pub fn with_identity(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<Year>,
        id: Option<String>,
        status: Option<String>,
    ) -> Self {
        Self {
            id: id.unwrap_or_else(generate_id),
            title: title.into(),
            author: author.into(),
            year: year.into(),
            status: status.unwrap_or_else(default_status),
        }
    }

    /// Case-insensitive substring match on title or author, or an exact match
    /// on the rendered year.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.year.to_string() == query
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}, {} ({})",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
