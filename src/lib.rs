//! Core library surface for the home library catalog.
//!
//! The `bin` target wires these modules together; tests and other tooling can
//! drive the same `Library` directly without going through the menu.
pub mod config;
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use db::{Library, LoadOutcome, RemoveOutcome, StatusUpdate, StatusUpdateError};

/// The domain types that other layers manipulate.
pub use models::{Book, BookStatus, Year};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
