// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multi-track scene timeline: parallel lanes of discrete elements.

use crate::element::TimelineElement;
use crate::track::{Track, TrackId, TrackKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default grid size, in seconds, for drag/resize snapping.
pub const DEFAULT_GRID: f64 = 0.1;

/// Quantize a time to the nearest multiple of `grid_size`.
///
/// Pure rounding; no awareness of tracks or elements. UI drag and
/// resize handlers run every candidate position through this.
pub fn snap_to_grid(time: f64, grid_size: f64) -> f64 {
    (time / grid_size).round() * grid_size
}

/// A cross-track alignment annotation. Stored and queried only; the
/// engine does not enforce alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMarker {
    /// Time in seconds
    pub time: f64,
    /// Marker label
    pub label: String,
    /// Tracks this marker spans
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl SyncMarker {
    /// Create a marker spanning the given tracks.
    pub fn new(time: f64, label: impl Into<String>, track_ids: Vec<TrackId>) -> Self {
        Self {
            time,
            label: label.into(),
            track_ids,
        }
    }
}

/// Parallel container of typed track lanes for one scene.
///
/// Tracks are a flat, ordered sequence; any number of tracks may share
/// a kind. Kind-grouped access goes through [`MultiTimeline::tracks_of`]
/// and [`MultiTimeline::primary_track`]. Value-like: every mutator
/// consumes `self` and returns the updated timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTimeline {
    /// Scene duration in seconds
    pub duration: f64,
    /// Ordered track lanes
    pub tracks: Vec<Track>,
    /// Cross-track alignment annotations
    #[serde(default)]
    pub sync_markers: Vec<SyncMarker>,
}

impl MultiTimeline {
    /// Create a timeline seeded with one empty track per kind, in
    /// visual/audio/camera/fx order.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            tracks: TrackKind::ALL
                .into_iter()
                .map(|kind| Track::new(kind, "", Vec::new()))
                .collect(),
            sync_markers: Vec::new(),
        }
    }

    /// Create a timeline with no tracks at all.
    pub fn empty(duration: f64) -> Self {
        Self {
            duration,
            tracks: Vec::new(),
            sync_markers: Vec::new(),
        }
    }

    /// All tracks of one kind, in lane order.
    pub fn tracks_of(&self, kind: TrackKind) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(move |t| t.kind == kind)
    }

    /// The first track of one kind: the single-lane-per-kind view.
    pub fn primary_track(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks_of(kind).next()
    }

    /// Find a track by id.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Append a new track of `kind`. An empty `name` defaults to
    /// `"{Kind} #{n}"` where `n` counts existing tracks of that kind
    /// plus one.
    #[must_use]
    pub fn with_track(mut self, kind: TrackKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.is_empty() {
            let lane_number = self.tracks_of(kind).count() + 1;
            format!("{} #{lane_number}", kind.display_name())
        } else {
            name
        };
        tracing::debug!(kind = kind.display_name(), name = %name, "add track");
        self.tracks.push(Track::new(kind, name, Vec::new()));
        self
    }

    /// Remove the track with `id`. An unknown id leaves the timeline
    /// unchanged.
    #[must_use]
    pub fn without_track(mut self, id: TrackId) -> Self {
        self.tracks.retain(|t| t.id != id);
        self
    }

    /// Apply `f` to the track with `id`. The track id is preserved
    /// regardless of what `f` returns.
    #[must_use]
    pub fn update_track(mut self, id: TrackId, f: impl FnOnce(Track) -> Track) -> Self {
        if let Some(index) = self.tracks.iter().position(|t| t.id == id) {
            let track = self.tracks.remove(index);
            let mut updated = f(track);
            updated.id = id;
            self.tracks.insert(index, updated);
        }
        self
    }

    /// Swap in an edited track by its id. This is the
    /// replace-and-rerender seam for element CRUD done through
    /// [`Track`] methods.
    #[must_use]
    pub fn replace_track(mut self, track: Track) -> Self {
        if let Some(index) = self.tracks.iter().position(|t| t.id == track.id) {
            self.tracks[index] = track;
        }
        self
    }

    /// Move the track with `id` by `direction` lane slots (negative is
    /// up). Clamped at the ends; an unknown id is a no-op.
    #[must_use]
    pub fn reorder_track(mut self, id: TrackId, direction: isize) -> Self {
        if let Some(index) = self.tracks.iter().position(|t| t.id == id) {
            let target = index.saturating_add_signed(direction).min(self.tracks.len() - 1);
            let track = self.tracks.remove(index);
            self.tracks.insert(target, track);
        }
        self
    }

    /// Add a sync marker.
    #[must_use]
    pub fn with_sync_marker(mut self, marker: SyncMarker) -> Self {
        self.sync_markers.push(marker);
        self
    }

    /// Elements active at `time`, grouped by track kind.
    ///
    /// Every kind with at least one track gets an entry; disabled
    /// tracks contribute nothing, so a kind whose tracks are all
    /// disabled maps to an empty list. An element is active over the
    /// closed interval `[start_time, start_time + duration]`, both
    /// ends inclusive, unlike the half-open convention used by
    /// [`Track::overlaps`]. The divergence is historical and kept.
    pub fn active_elements(&self, time: f64) -> IndexMap<TrackKind, Vec<TimelineElement>> {
        let mut active: IndexMap<TrackKind, Vec<TimelineElement>> = IndexMap::new();

        for track in &self.tracks {
            let entry = active.entry(track.kind).or_default();
            if !track.enabled {
                continue;
            }
            entry.extend(
                track
                    .elements
                    .iter()
                    .filter(|el| time >= el.start_time && time <= el.end_time())
                    .cloned(),
            );
        }

        active
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a multi-track timeline from JSON.
    ///
    /// Only the JSON syntax is validated; a structurally unexpected
    /// but well-formed document is accepted as-is.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let timeline: Self = serde_json::from_str(json)?;
        tracing::debug!(
            tracks = timeline.tracks.len(),
            duration = timeline.duration,
            "imported multi-track timeline"
        );
        Ok(timeline)
    }
}

/// Error from multi-track timeline JSON import/export.
#[derive(Debug, Error)]
#[error("invalid multi-track timeline JSON: {0}")]
pub struct ParseError(#[from] serde_json::Error);
