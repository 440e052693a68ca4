//! # Spotify Integration Module
//!
//! Thin client layer over the two Spotify services the relay talks to:
//!
//! ```text
//! Relay handlers (api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization URL, code exchange)
//!     └── Tracks (top tracks, audio features)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts / Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] builds the authorization URL users are sent to and exchanges the
//! returned authorization code for an access token using the confidential
//! client flow (client id and secret in the form body).
//!
//! ## Tracks
//!
//! [`tracks`] fetches the user's top tracks and the audio features for a set
//! of track ids. Both are plain GETs with bearer authentication and may be
//! retried a bounded number of times on rate limiting or gateway errors.
//!
//! ## Error Types
//!
//! Every call returns [`crate::error::SpotifyError`], which keeps transport
//! failures, timeouts, unexpected statuses and undecodable bodies apart so
//! the handlers can answer each one differently.
//!
//! ## Endpoints
//!
//! - `GET /authorize` - user consent page (redirect target only)
//! - `POST /api/token` - authorization code exchange
//! - `GET /me/top/tracks` - ranked top tracks
//! - `GET /audio-features` - per-track audio features

pub mod auth;
pub mod tracks;
