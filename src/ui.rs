//! Line-based menu front-end for the home library. The menu is a thin
//! dispatcher: it collects input, calls one `Library` operation and prints
//! the outcome.

mod app;
mod forms;
mod helpers;

use std::io;

use anyhow::Result;

pub use app::App;
pub use helpers::surface_error;

/// Run the menu on the process's stdin and stdout until the user exits.
pub fn run_app(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    app.run(stdin.lock(), io::stdout())
}
