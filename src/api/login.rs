use axum::{
    Extension,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{api::AppState, info};

/// Sends the browser to Spotify's consent page with a `302 Found`.
pub async fn login(Extension(state): Extension<AppState>) -> impl IntoResponse {
    info!("Redirecting to Spotify authorization");
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.authorize_url.to_string())],
    )
}
