use axum::{
    Extension,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use url::form_urlencoded;

use crate::{api::AppState, error::ApiError, spotify, success, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Completes the authorization-code flow.
///
/// Exchanges the `code` Spotify sent back for an access token and redirects
/// to `/spotify_list` with the token in the query string. Without a code no
/// request leaves the relay.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        warning!("Callback without authorization code");
        return Err(ApiError::MissingCode {
            provider_error: params.error,
        });
    };

    let access_token = spotify::auth::exchange_code(&state.client, &state.config, &code)
        .await
        .map_err(|e| {
            warning!("Token exchange failed: {}", e);
            ApiError::from_token_exchange(e)
        })?;

    success!("Authorization code exchanged for an access token");
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, spotify_list_location(&access_token))],
    )
        .into_response())
}

/// Relative redirect target carrying the access token.
pub fn spotify_list_location(access_token: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("access_token", access_token)
        .finish();
    format!("/spotify_list?{}", query)
}
