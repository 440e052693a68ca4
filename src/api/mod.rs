//! # API Module
//!
//! HTTP handlers for the SoundTrip relay. Together they walk a browser
//! through the Spotify authorization-code flow and hand back the user's top
//! tracks with their tempo.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's consent page.
//! - [`callback`] - Receives the authorization code, exchanges it for an
//!   access token and redirects on to `/spotify_list`.
//!
//! ### Data
//!
//! - [`spotify_list`] - Fetches the top tracks and their audio features and
//!   answers with the enriched list as JSON.
//!
//! ### Monitoring
//!
//! - [`index`] - Plain-text greeting.
//! - [`health`] - Status and version for load balancers and probes.
//!
//! ## Shared State
//!
//! Handlers receive an [`AppState`] through an `Extension` layer. It holds
//! the immutable [`Config`], the prebuilt authorization URL and a single
//! HTTP client whose timeout bounds every upstream call. Nothing in it is
//! mutated per request.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use soundtrip::{api::AppState, server::build_router};
//!
//! let state = AppState::new(config)?;
//! let app = build_router(state);
//! ```

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::{config::Config, error::ConfigError, spotify};

mod callback;
mod health;
mod index;
mod login;
mod spotify_list;

pub use callback::callback;
pub use health::health;
pub use index::index;
pub use login::login;
pub use spotify_list::spotify_list;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
    pub authorize_url: Url,
}

impl AppState {
    /// Wraps the configuration, builds the shared HTTP client and the
    /// authorization URL, which never changes for a running relay.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let authorize_url = spotify::auth::authorize_url(&config)?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            client,
            authorize_url,
        })
    }
}
