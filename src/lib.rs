//! SoundTrip relay library
//!
//! This library signs a user in with Spotify through the OAuth 2.0
//! authorization-code flow and serves the user's top tracks, each enriched
//! with its tempo (BPM), as a compact JSON list for the SoundTrip client.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the relay routes
//! - `config` - Configuration loading from `.env` files and the environment
//! - `enrich` - The tempo join between top tracks and audio features
//! - `error` - Error types and their HTTP mapping
//! - `server` - Router construction and the listening loop
//! - `spotify` - Spotify accounts and Web API client calls
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use soundtrip::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> soundtrip::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config, false).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod enrich;
pub mod error;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the edges of the application (startup, CLI) where any error is
/// reported to the operator rather than mapped onto an HTTP response.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
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

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup failures. Request handlers report problems
/// with [`warning!`] and answer the client with an error response instead.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, such as an upstream call that failed for a
/// single request.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
