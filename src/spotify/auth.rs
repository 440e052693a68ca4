use reqwest::Client;
use url::Url;

use crate::{
    config::Config,
    error::{ConfigError, SpotifyError},
    types::TokenResponse,
};

/// Builds the Spotify authorization URL for the configured client.
///
/// The URL carries `response_type=code`, the client id, the requested scope
/// and the redirect URI, all form-encoded.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the configured authorization
/// endpoint is not an absolute URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config)?;
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(config: &Config) -> Result<Url, ConfigError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .map_err(|_| ConfigError::Invalid {
        key: "SPOTIFY_API_AUTH_URL",
        value: config.auth_url.clone(),
    })
}

/// Exchanges an authorization code for an access token.
///
/// Sends a single form-encoded POST to the token endpoint with the client
/// credentials. The call is never retried since an authorization code can
/// only be redeemed once.
///
/// # Returns
///
/// - `Ok(String)` - the access token
/// - `Err(SpotifyError::MissingAccessToken)` - Spotify answered, but without
///   an `access_token` (invalid or reused code, bad credentials, ...)
/// - `Err(SpotifyError::Transport | SpotifyError::Timeout)` - Spotify could
///   not be reached
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
) -> Result<String, SpotifyError> {
    let response = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let body = response.text().await?;

    // Error statuses carry an `error` object instead of a token, so the body
    // alone decides the outcome.
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|_| SpotifyError::MissingAccessToken)?;

    match token.access_token {
        Some(access_token) if !access_token.is_empty() => Ok(access_token),
        _ => Err(SpotifyError::MissingAccessToken),
    }
}
