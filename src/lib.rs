//! Weekly Discovery Playlist Generator
//!
//! This library implements a single-pass discovery pipeline over the Spotify
//! Web API: fetch the user's followed artists, expand them with related
//! artists, scan every candidate for releases inside a lookback window and
//! publish the deduplicated, ranked result as a new private playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line command implementations
//! - `config` - Environment configuration and pipeline constants
//! - `discovery` - Pure pipeline logic (date normalization, dedup, ranking)
//! - `management` - Token cache and authenticated session handling
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client functions
//! - `types` - Data structures and wire formats
//! - `utils` - PKCE and address helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// composes across async boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1. Only for unrecoverable errors.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
