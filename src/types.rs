use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// Raw audio features payload. Records are kept as JSON values because
/// Spotify answers `null` for unknown ids.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeature {
    pub id: String,
    pub tempo: f64,
}

/// Tempo of an enriched track, or `"N/A"` when Spotify had none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bpm {
    Tempo(f64),
    Missing,
}

impl Serialize for Bpm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bpm::Tempo(tempo) => serializer.serialize_f64(*tempo),
            Bpm::Missing => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTrack {
    pub track_name: String,
    pub artists: Vec<String>,
    pub bpm: Bpm,
}
