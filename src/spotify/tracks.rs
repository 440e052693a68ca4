use std::time::Duration;

use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    error::SpotifyError,
    types::{AudioFeaturesResponse, TopTracksResponse},
    warning,
};

/// Time window for the top tracks, roughly the last six months.
pub const TOP_TRACKS_TIME_RANGE: &str = "medium_term";
pub const TOP_TRACKS_LIMIT: u32 = 20;

const MAX_RETRY_AFTER_SECS: u64 = 120;
const BASE_RETRY_DELAY_MS: u64 = 500;

/// Retrieves the user's top tracks from the Spotify Web API.
///
/// Uses `/me/top/tracks` with a medium-term window and a page of 20 items.
/// Items come back in Spotify's ranking order.
///
/// # Arguments
///
/// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `token` - Valid access token for Spotify API authentication
/// * `max_retries` - How many times a rate limited or gateway failure is retried
///
/// # Errors
///
/// Any non-200 status is returned as [`SpotifyError::Status`] once retries
/// are exhausted.
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    max_retries: u32,
) -> Result<TopTracksResponse, SpotifyError> {
    let url = format!("{uri}/me/top/tracks", uri = api_url);
    let limit = TOP_TRACKS_LIMIT.to_string();
    let query = [("time_range", TOP_TRACKS_TIME_RANGE), ("limit", limit.as_str())];

    let response = get_with_retry(client, &url, &query, token, max_retries).await?;
    decode_json(response).await
}

/// Retrieves audio features for a batch of track ids.
///
/// All ids are sent in a single `ids` parameter, comma-joined. Spotify
/// answers with one record per id, `null` where it has none.
pub async fn get_audio_features(
    client: &Client,
    api_url: &str,
    token: &str,
    ids: &[String],
    max_retries: u32,
) -> Result<AudioFeaturesResponse, SpotifyError> {
    let url = format!("{uri}/audio-features", uri = api_url);
    let ids = ids.join(",");
    let query = [("ids", ids.as_str())];

    let response = get_with_retry(client, &url, &query, token, max_retries).await?;
    decode_json(response).await
}

/// Sends a bearer-authenticated GET and returns the response if it is a 200.
///
/// Rate limiting (429) and gateway errors (502, 503, 504) as well as
/// transport failures are retried up to `max_retries` times. A `Retry-After`
/// header is honored up to two minutes; without one the delay grows
/// exponentially from half a second with some random jitter.
async fn get_with_retry(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    token: &str,
    max_retries: u32,
) -> Result<Response, SpotifyError> {
    let mut attempt = 0;

    loop {
        let result = client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(SpotifyError::from);

        let (err, retry_after) = match result {
            Ok(response) if response.status() == StatusCode::OK => return Ok(response),
            Ok(response) => (
                SpotifyError::Status(response.status().as_u16()),
                retry_after_secs(&response),
            ),
            Err(err) => (err, None),
        };

        if attempt >= max_retries || !err.is_retryable() {
            return Err(err);
        }

        let delay = match retry_after {
            Some(secs) if secs > MAX_RETRY_AFTER_SECS => {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Giving up.",
                    secs
                );
                return Err(err);
            }
            Some(secs) => Duration::from_secs(secs),
            None => backoff_delay(attempt),
        };

        attempt += 1;
        warning!(
            "{} for {}, retrying in {:?} ({}/{})",
            err,
            url,
            delay,
            attempt,
            max_retries
        );
        sleep(delay).await;
    }
}

/// Reads the whole body, then decodes it.
///
/// Failures while reading (a stalled or cut-off body) keep their transport
/// or timeout classification; only a complete body that is not the expected
/// JSON becomes [`SpotifyError::Decode`].
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, SpotifyError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| SpotifyError::Decode(e.to_string()))
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

fn backoff_delay(attempt: u32) -> Duration {
    let base = BASE_RETRY_DELAY_MS.saturating_mul(1 << attempt.min(6));
    let jitter = rand::rng().random_range(0..=base / 2);
    Duration::from_millis(base + jitter)
}
