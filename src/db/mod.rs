//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::{Library, RemoveOutcome, StatusUpdate, StatusUpdateError};
pub use connection::{default_store_path, load_books, save_books, LoadOutcome};
