// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline: named property tracks plus time annotations.

use crate::easing::Easing;
use crate::track::PropertyTrack;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default tolerance, in seconds, for marker and sync-point queries.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

fn default_marker_color() -> String {
    "#ffcc00".to_owned()
}

fn default_loop_count() -> u32 {
    1
}

fn default_speed() -> f64 {
    1.0
}

/// A point annotation on the timeline. Has no effect on playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeMarker {
    /// Time in seconds
    pub time: f64,
    /// Marker label
    pub label: String,
    /// Display color
    #[serde(default = "default_marker_color")]
    pub color: String,
    /// Caller-owned metadata
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
}

impl TimeMarker {
    /// Create a marker with the default color and empty metadata.
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
            color: default_marker_color(),
            metadata: IndexMap::new(),
        }
    }
}

/// Declares that the named elements should align at a time.
///
/// The engine stores and queries sync points; consumers apply the
/// intent. Element ids are opaque strings owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPoint {
    /// Time in seconds
    pub time: f64,
    /// Ids of the elements to align
    pub element_ids: Vec<String>,
    /// Sync point label
    #[serde(default)]
    pub label: String,
    /// Caller-owned metadata
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,
}

impl SyncPoint {
    /// Create a sync point over the given element ids.
    pub fn new(time: f64, element_ids: Vec<String>) -> Self {
        Self {
            time,
            element_ids,
            label: String::new(),
            metadata: IndexMap::new(),
        }
    }
}

/// A window where query time folds back to the window start.
///
/// `loop_count` is informational only; the fold itself is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopSegment {
    /// Loop start in seconds
    pub start_time: f64,
    /// Loop end in seconds (exclusive for the fold)
    pub end_time: f64,
    /// Declared iteration count, 0 meaning infinite. Not enforced.
    #[serde(default = "default_loop_count")]
    pub loop_count: u32,
    /// Loop label
    #[serde(default)]
    pub label: String,
}

impl LoopSegment {
    /// Create a loop segment with a single declared iteration.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            loop_count: 1,
            label: String::new(),
        }
    }
}

/// A window where playback time is locally eased and re-scaled
/// before property lookup (speed ramps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRemapping {
    /// Remap window start in seconds
    pub start_time: f64,
    /// Remap window end in seconds
    pub end_time: f64,
    /// Speed factor: 0.5 = slow motion, 2.0 = fast forward
    #[serde(default = "default_speed")]
    pub speed_multiplier: f64,
    /// Easing applied to the local progress through the window
    #[serde(default)]
    pub easing: Easing,
}

impl TimeRemapping {
    /// Create a remapping with the given speed and linear easing.
    pub fn new(start_time: f64, end_time: f64, speed_multiplier: f64) -> Self {
        Self {
            start_time,
            end_time,
            speed_multiplier,
            easing: Easing::Linear,
        }
    }
}

/// Keyframe timeline for one animated scene.
///
/// Property tracks are keyed by an opaque dotted path chosen by the
/// caller (for example `"layer.0.opacity"`); the engine does not
/// interpret its structure. The timeline is value-like: every mutator
/// consumes `self` and returns the updated timeline, so UI layers can
/// replace-and-rerender without shared mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Total duration in seconds, kept in sync with the scene by the caller
    pub duration: f64,
    /// Frame rate used by the frame/time conversions
    pub frame_rate: f64,
    /// Property tracks keyed by path
    #[serde(default)]
    pub property_tracks: IndexMap<String, PropertyTrack>,
    /// Point annotations
    #[serde(default)]
    pub markers: Vec<TimeMarker>,
    /// Cross-element alignment declarations
    #[serde(default)]
    pub sync_points: Vec<SyncPoint>,
    /// Loop windows applied during lookup
    #[serde(default)]
    pub loop_segments: Vec<LoopSegment>,
    /// Speed-ramp windows applied during lookup
    #[serde(default)]
    pub time_remappings: Vec<TimeRemapping>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new(duration: f64, frame_rate: f64) -> Self {
        Self {
            duration,
            frame_rate,
            property_tracks: IndexMap::new(),
            markers: Vec::new(),
            sync_points: Vec::new(),
            loop_segments: Vec::new(),
            time_remappings: Vec::new(),
        }
    }

    /// Insert or overwrite the property track at `path`.
    #[must_use]
    pub fn with_property_track(mut self, path: impl Into<String>, track: PropertyTrack) -> Self {
        let path = path.into();
        tracing::debug!(path = %path, keyframes = track.len(), "set property track");
        self.property_tracks.insert(path, track);
        self
    }

    /// Remove the property track at `path`, if present.
    #[must_use]
    pub fn without_property_track(mut self, path: &str) -> Self {
        self.property_tracks.shift_remove(path);
        self
    }

    /// Add a time marker.
    #[must_use]
    pub fn with_marker(mut self, marker: TimeMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Add a sync point.
    #[must_use]
    pub fn with_sync_point(mut self, sync_point: SyncPoint) -> Self {
        self.sync_points.push(sync_point);
        self
    }

    /// Add a loop segment.
    #[must_use]
    pub fn with_loop_segment(mut self, segment: LoopSegment) -> Self {
        self.loop_segments.push(segment);
        self
    }

    /// Add a time remapping.
    #[must_use]
    pub fn with_time_remapping(mut self, remapping: TimeRemapping) -> Self {
        self.time_remappings.push(remapping);
        self
    }

    /// Evaluate the property at `path` at query time `time`.
    ///
    /// Returns `None` when no track exists at `path`. The query time
    /// first passes through the first matching time remapping (closed
    /// window), then the first loop segment at or after whose start it
    /// falls, folding modulo the window back into `[start, end)`;
    /// neither stacks beyond its first match.
    pub fn value_at(&self, path: &str, time: f64) -> Option<Value> {
        let track = self.property_tracks.get(path)?;
        track.value_at(self.resolve_time(time))
    }

    /// Apply remapping then loop folding to a raw query time.
    pub fn resolve_time(&self, time: f64) -> f64 {
        let mut remapped = time;

        for remap in &self.time_remappings {
            if time >= remap.start_time && time <= remap.end_time {
                let window = remap.end_time - remap.start_time;
                let progress = (time - remap.start_time) / window;
                let eased = remap.easing.apply(progress, None);
                remapped = remap.start_time + eased * window * remap.speed_multiplier;
                break;
            }
        }

        for segment in &self.loop_segments {
            let window = segment.end_time - segment.start_time;
            if window > 0.0 && remapped >= segment.start_time {
                remapped = segment.start_time + (remapped - segment.start_time) % window;
                break;
            }
        }

        remapped
    }

    /// All markers within `tolerance` seconds of `time`.
    pub fn markers_at(&self, time: f64, tolerance: f64) -> Vec<&TimeMarker> {
        self.markers
            .iter()
            .filter(|m| (m.time - time).abs() <= tolerance)
            .collect()
    }

    /// All sync points within `tolerance` seconds of `time`.
    pub fn sync_points_at(&self, time: f64, tolerance: f64) -> Vec<&SyncPoint> {
        self.sync_points
            .iter()
            .filter(|s| (s.time - time).abs() <= tolerance)
            .collect()
    }

    /// Convert a time in seconds to a frame number.
    pub fn time_to_frame(&self, time: f64) -> u32 {
        (time * self.frame_rate) as u32
    }

    /// Convert a frame number to a time in seconds.
    pub fn frame_to_time(&self, frame: u32) -> f64 {
        f64::from(frame) / self.frame_rate
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a timeline from JSON.
    ///
    /// Only the JSON syntax is validated; a structurally unexpected
    /// but well-formed document is accepted as-is.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let timeline: Self = serde_json::from_str(json)?;
        tracing::debug!(
            tracks = timeline.property_tracks.len(),
            duration = timeline.duration,
            "imported timeline"
        );
        Ok(timeline)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(30.0, 30.0)
    }
}

/// Error from timeline JSON import/export.
#[derive(Debug, Error)]
#[error("invalid timeline JSON: {0}")]
pub struct ParseError(#[from] serde_json::Error);
