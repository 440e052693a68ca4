use axum::{
    Extension, Json,
    extract::Query,
    http::{HeaderMap, header},
};
use serde::Deserialize;

use crate::{
    api::AppState,
    enrich,
    error::ApiError,
    info, spotify,
    types::{Bpm, EnrichedTrack},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct SpotifyListParams {
    pub access_token: Option<String>,
}

/// Answers with the user's top tracks, each enriched with its BPM.
///
/// The access token comes from the `access_token` query parameter or, if
/// that is absent, from an `Authorization: Bearer` header. Top tracks are
/// fetched first; audio features are only requested when there is at least
/// one track.
pub async fn spotify_list(
    Query(params): Query<SpotifyListParams>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<EnrichedTrack>>, ApiError> {
    let token = params
        .access_token
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(&headers))
        .ok_or(ApiError::MissingToken)?;

    let config = &state.config;

    let top = spotify::tracks::get_top_tracks(
        &state.client,
        &config.api_url,
        &token,
        config.max_retries,
    )
    .await
    .map_err(|e| {
        warning!("Top tracks request failed: {}", e);
        ApiError::from_top_tracks(e)
    })?;

    let ids = enrich::track_ids(&top.items);
    if ids.is_empty() {
        warning!("Spotify returned no top tracks");
        return Err(ApiError::EmptyList);
    }

    let features = spotify::tracks::get_audio_features(
        &state.client,
        &config.api_url,
        &token,
        &ids,
        config.max_retries,
    )
    .await
    .map_err(|e| {
        warning!("Audio features request failed: {}", e);
        ApiError::from_audio_features(e)
    })?;

    let tempos = enrich::tempo_by_id(&features.audio_features);
    let tracks = enrich::enrich_tracks(&top.items, &tempos);
    info!(
        "Enriched {} top tracks, {} with tempo",
        tracks.len(),
        tracks
            .iter()
            .filter(|track| matches!(track.bpm, Bpm::Tempo(_)))
            .count()
    );

    Ok(Json(tracks))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}
