//! Binary entry point that glues the JSON-backed catalog to the line menu:
//! parse configuration, set up logging, load the library, and run the menu
//! until the user exits.
use clap::Parser;
use home_library::config::{initialize_tracing, Config};
use home_library::ui::surface_error;
use home_library::{run_app, App, Library};
use tracing::{error, info};

/// Returning a `Result` bubbles fatal problems (for example the store file
/// becoming unwritable) up to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    initialize_tracing(config.log_level);

    let store_path = config.store_path();
    info!(path = %store_path.display(), "opening library");

    let mut app = App::new(Library::open(store_path));
    if let Err(err) = run_app(&mut app) {
        error!(cause = %surface_error(&err), "library session aborted");
        return Err(err);
    }
    Ok(())
}
