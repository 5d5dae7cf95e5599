//! Command-line configuration and logging setup for the binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::db::default_store_path;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "home-library", version, about = "Manage a personal book catalog")]
pub struct Config {
    /// JSON file holding the catalog. Defaults to ~/.home-library/library.json
    #[arg(long, env = "HOME_LIBRARY_FILE")]
    pub file: Option<PathBuf>,

    /// Verbosity of diagnostics written to stderr
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_store_path)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `--log-level`; output
/// goes to stderr so it never interleaves with the menu on stdout.
pub fn initialize_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_wins() {
        let config = Config::parse_from(["home-library", "--file", "books.json"]);
        assert_eq!(config.store_path(), PathBuf::from("books.json"));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn log_level_is_parsed() {
        let config = Config::parse_from(["home-library", "--file", "x.json", "--log-level", "debug"]);
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
