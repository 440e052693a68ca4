//! Error types for the relay.
//!
//! [`SpotifyError`] describes what went wrong talking to Spotify,
//! [`ApiError`] is what a client of the relay gets to see, and
//! [`ConfigError`] covers startup problems.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    #[error("cannot load .env file: {0}")]
    EnvFile(String),

    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
}

/// Failure of a single call to the Spotify accounts service or Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Spotify answered, but not with the expected status.
    #[error("Spotify responded with status {0}")]
    Status(u16),

    #[error("Spotify did not respond in time")]
    Timeout,

    #[error("cannot reach Spotify: {0}")]
    Transport(String),

    #[error("cannot decode Spotify response: {0}")]
    Decode(String),

    /// The token endpoint answered without an `access_token`.
    #[error("no access token in Spotify response")]
    MissingAccessToken,
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SpotifyError::Timeout
        } else if err.is_decode() {
            SpotifyError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SpotifyError::Status(status.as_u16())
        } else {
            SpotifyError::Transport(err.to_string())
        }
    }
}

impl SpotifyError {
    /// Whether a GET that failed this way may be sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            SpotifyError::Status(status) => matches!(status, 429 | 502 | 503 | 504),
            SpotifyError::Transport(_) | SpotifyError::Timeout => true,
            SpotifyError::Decode(_) | SpotifyError::MissingAccessToken => false,
        }
    }
}

/// Error answered to a client of the relay.
///
/// The `/callback` family answers in plain text, the `/spotify_list` family
/// answers with a JSON object carrying an `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization code is missing.")]
    MissingCode { provider_error: Option<String> },

    #[error("Failed to obtain an access token.")]
    TokenExchange,

    #[error("Access token is missing.")]
    MissingToken,

    #[error("Failed to fetch top tracks.")]
    UpstreamList { status: u16 },

    #[error("No top tracks found for this user.")]
    EmptyList,

    #[error("Failed to fetch audio features.")]
    UpstreamFeatures { status: u16 },

    #[error("Spotify is unreachable.")]
    UpstreamUnavailable { json: bool },

    #[error("Spotify did not respond in time.")]
    UpstreamTimeout { json: bool },

    #[error("Spotify sent a response that could not be read.")]
    UpstreamInvalid { json: bool },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamInvalid { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn is_json(&self) -> bool {
        match self {
            ApiError::MissingCode { .. } | ApiError::TokenExchange => false,
            ApiError::UpstreamUnavailable { json }
            | ApiError::UpstreamTimeout { json }
            | ApiError::UpstreamInvalid { json } => *json,
            _ => true,
        }
    }

    /// Maps a failed token exchange onto a plain-text error.
    pub fn from_token_exchange(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Timeout => ApiError::UpstreamTimeout { json: false },
            SpotifyError::Transport(_) => ApiError::UpstreamUnavailable { json: false },
            _ => ApiError::TokenExchange,
        }
    }

    /// Maps a failed top tracks call onto a JSON error.
    pub fn from_top_tracks(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Status(status) => ApiError::UpstreamList { status },
            other => Self::from_transport(other),
        }
    }

    /// Maps a failed audio features call onto a JSON error.
    pub fn from_audio_features(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Status(status) => ApiError::UpstreamFeatures { status },
            other => Self::from_transport(other),
        }
    }

    fn from_transport(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Timeout => ApiError::UpstreamTimeout { json: true },
            SpotifyError::Decode(_) => ApiError::UpstreamInvalid { json: true },
            _ => ApiError::UpstreamUnavailable { json: true },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if !self.is_json() {
            let body = match &self {
                ApiError::MissingCode {
                    provider_error: Some(reason),
                } => format!("{} Spotify reported: {}", self, reason),
                _ => self.to_string(),
            };
            return (status, body).into_response();
        }

        let body = match &self {
            ApiError::UpstreamList { status: upstream }
            | ApiError::UpstreamFeatures { status: upstream } => json!({
                "error": self.to_string(),
                "status_code": upstream,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
