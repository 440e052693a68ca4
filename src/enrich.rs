//! Tempo join between a user's top tracks and their audio features.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{AudioFeature, Bpm, EnrichedTrack, TrackItem};

/// Collects track ids in ranking order.
pub fn track_ids(tracks: &[TrackItem]) -> Vec<String> {
    tracks.iter().map(|track| track.id.clone()).collect()
}

/// Builds the id to tempo lookup from raw audio feature records.
///
/// `null` entries and records without a string `id` or a numeric `tempo`
/// are skipped. When an id shows up twice the later record wins.
pub fn tempo_by_id(features: &[serde_json::Value]) -> HashMap<String, f64> {
    features
        .iter()
        .filter(|record| !record.is_null())
        .filter_map(|record| AudioFeature::deserialize(record).ok())
        .map(|feature| (feature.id, feature.tempo))
        .collect()
}

/// Attaches a tempo to every track, keeping the order of `tracks`.
///
/// Every track yields exactly one [`EnrichedTrack`]. Tracks with no tempo in
/// `tempos` get [`Bpm::Missing`].
pub fn enrich_tracks(tracks: &[TrackItem], tempos: &HashMap<String, f64>) -> Vec<EnrichedTrack> {
    tracks
        .iter()
        .map(|track| EnrichedTrack {
            track_name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|artist| artist.name.clone())
                .collect(),
            bpm: tempos
                .get(&track.id)
                .map_or(Bpm::Missing, |tempo| Bpm::Tempo(*tempo)),
        })
        .collect()
}
