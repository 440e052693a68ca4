//! Configuration management for the SoundTrip relay.
//!
//! Configuration values come from environment variables, optionally seeded
//! from `.env` files. They are read exactly once at startup into a [`Config`]
//! value that is then handed to the HTTP handlers, so no handler touches the
//! process environment.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`soundtrip/.env`)
//! 3. `.env` in the current working directory
//! 4. Application defaults (where applicable)

use std::{collections::HashMap, env, net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration shared by every request handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub max_retries: u32,
}

/// Loads environment variables from `.env` files.
///
/// Creates the `soundtrip` directory in the platform-specific local data
/// directory if needed, then loads `soundtrip/.env` from there and finally a
/// `.env` in the working directory. Variables already present in the process
/// environment are never overwritten, and a missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/soundtrip/.env`
/// - macOS: `~/Library/Application Support/soundtrip/.env`
/// - Windows: `%LOCALAPPDATA%/soundtrip/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("soundtrip/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Builds the configuration from an explicit variable map.
    ///
    /// Required variables are the client id, the client secret and the
    /// redirect URI. Everything else falls back to the Spotify defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            vars.get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| -> String {
            vars.get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            host: optional("SERVER_HOST", DEFAULT_HOST),
            port: parse_var(vars, "PORT", DEFAULT_PORT)?,
            request_timeout: Duration::from_secs(parse_var(
                vars,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_retries: parse_var(vars, "SPOTIFY_API_MAX_RETRIES", 0)?,
        })
    }

    /// Returns the socket address the relay binds to.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::InvalidAddress(raw.clone()))
    }
}

fn parse_var<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
        None => Ok(default),
    }
}
