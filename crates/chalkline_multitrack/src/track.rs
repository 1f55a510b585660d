// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track lanes holding discrete timed elements.

use crate::element::{ElementId, ElementPatch, TimelineElement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default track height in pixels
pub const DEFAULT_TRACK_HEIGHT: f64 = 60.0;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build a deterministic ID from a counter, for tests and tooling
    pub fn from_index(index: u64) -> Self {
        Self(Uuid::from_u64_pair(1, index))
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of content a track lane carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Scenes, layers, drawings
    Visual,
    /// Music, narration, effects audio
    Audio,
    /// Camera moves and zooms
    Camera,
    /// Particle and post effects
    Fx,
}

impl TrackKind {
    /// All kinds in canonical lane order
    pub const ALL: [TrackKind; 4] = [
        TrackKind::Visual,
        TrackKind::Audio,
        TrackKind::Camera,
        TrackKind::Fx,
    ];

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Audio => "Audio",
            Self::Camera => "Camera",
            Self::Fx => "Fx",
        }
    }

    /// Get the lane color
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Visual => [100, 150, 255],
            Self::Audio => [200, 100, 255],
            Self::Camera => [255, 100, 150],
            Self::Fx => [255, 200, 100],
        }
    }
}

/// A lane of discrete elements of one kind.
///
/// Elements are kept sorted by start time after every mutation; the
/// overlap check relies on that only for readability, not correctness.
/// Tracks are value-like: element CRUD returns a new track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track ID
    pub id: TrackId,
    /// Track kind
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Track name
    pub name: String,
    /// Elements sorted by start time
    pub elements: Vec<TimelineElement>,
    /// Disabled tracks contribute no active elements
    pub enabled: bool,
    /// Locked tracks reject edits at the UI layer (stored only here)
    pub locked: bool,
    /// Display height in pixels
    pub height: f64,
}

impl Track {
    /// Create a track with a fresh random id, sorting `elements` by
    /// start time. An empty `name` defaults to the kind's display name.
    pub fn new(kind: TrackKind, name: impl Into<String>, elements: Vec<TimelineElement>) -> Self {
        Self::with_id(TrackId::new(), kind, name, elements)
    }

    /// Create a track with a caller-supplied id.
    pub fn with_id(
        id: TrackId,
        kind: TrackKind,
        name: impl Into<String>,
        mut elements: Vec<TimelineElement>,
    ) -> Self {
        let name = name.into();
        let name = if name.is_empty() {
            kind.display_name().to_owned()
        } else {
            name
        };
        sort_elements(&mut elements);
        Self {
            id,
            kind,
            name,
            elements,
            enabled: true,
            locked: false,
            height: DEFAULT_TRACK_HEIGHT,
        }
    }

    /// Return a new track with `element` added, re-sorted.
    #[must_use]
    pub fn with_element(mut self, element: TimelineElement) -> Self {
        tracing::trace!(track = %self.name, element = %element.label, "add element");
        self.elements.push(element);
        sort_elements(&mut self.elements);
        self
    }

    /// Return a new track with the patch applied to the element with
    /// `id`, re-sorted. An unknown id leaves the track unchanged.
    #[must_use]
    pub fn update_element(mut self, id: ElementId, patch: ElementPatch) -> Self {
        if let Some(index) = self.elements.iter().position(|el| el.id == id) {
            let element = self.elements.remove(index);
            self.elements.push(patch.apply(element));
            sort_elements(&mut self.elements);
        }
        self
    }

    /// Return a new track without the element with `id`.
    #[must_use]
    pub fn without_element(mut self, id: ElementId) -> Self {
        self.elements.retain(|el| el.id != id);
        self
    }

    /// Find an element by id.
    pub fn element(&self, id: ElementId) -> Option<&TimelineElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Would an element at `[start_time, start_time + duration)`
    /// overlap an existing element?
    ///
    /// Overlap is flagged when the candidate start falls inside an
    /// existing element, the candidate end falls inside one, or the
    /// candidate fully contains one. Touching endpoints (candidate end
    /// equal to an existing start, or vice versa) do not overlap.
    /// `exclude` skips one element so a drag or resize can check
    /// against everything but itself.
    pub fn overlaps(&self, start_time: f64, duration: f64, exclude: Option<ElementId>) -> bool {
        let end_time = start_time + duration;

        self.elements.iter().any(|element| {
            if exclude == Some(element.id) {
                return false;
            }
            let element_end = element.end_time();
            (start_time >= element.start_time && start_time < element_end)
                || (end_time > element.start_time && end_time <= element_end)
                || (start_time <= element.start_time && end_time >= element_end)
        })
    }

    /// Summary statistics for the track.
    pub fn stats(&self) -> TrackStats {
        let total_duration: f64 = self.elements.iter().map(|el| el.duration).sum();
        // Legacy heuristic carried from the original format: the
        // divisor is the last element's start time, not the timeline
        // duration, so this is not a normalized percentage.
        let coverage = if self.elements.is_empty() {
            0.0
        } else {
            let divisor = self.elements.last().map_or(1.0, |el| el.start_time);
            total_duration / divisor * 100.0
        };
        TrackStats {
            element_count: self.elements.len(),
            total_duration,
            coverage,
        }
    }
}

/// Summary statistics for one track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStats {
    /// Number of elements on the track
    pub element_count: usize,
    /// Sum of element durations in seconds
    pub total_duration: f64,
    /// Legacy coverage heuristic; see [`Track::stats`]
    pub coverage: f64,
}

fn sort_elements(elements: &mut [TimelineElement]) {
    elements.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn element(index: u64, start_time: f64, duration: f64) -> TimelineElement {
        TimelineElement::with_id(
            ElementId::from_index(index),
            start_time,
            duration,
            "scene",
            IndexMap::new(),
            "",
        )
    }

    fn start_times(track: &Track) -> Vec<f64> {
        track.elements.iter().map(|el| el.start_time).collect()
    }

    #[test]
    fn test_empty_name_defaults_to_kind() {
        let track = Track::new(TrackKind::Audio, "", Vec::new());
        assert_eq!(track.name, "Audio");
        assert!(track.enabled);
        assert!(!track.locked);
        assert_eq!(track.height, DEFAULT_TRACK_HEIGHT);
    }

    #[test]
    fn test_construction_sorts_elements() {
        let track = Track::new(
            TrackKind::Visual,
            "Main",
            vec![element(1, 5.0, 1.0), element(2, 0.0, 1.0), element(3, 3.0, 1.0)],
        );
        assert_eq!(start_times(&track), vec![0.0, 3.0, 5.0]);
    }

    #[test]
    fn test_add_and_update_keep_sorted() {
        let track = Track::new(TrackKind::Visual, "Main", Vec::new())
            .with_element(element(1, 4.0, 1.0))
            .with_element(element(2, 1.0, 1.0))
            .with_element(element(3, 2.5, 1.0));
        assert_eq!(start_times(&track), vec![1.0, 2.5, 4.0]);

        // Moving the first element past the others re-sorts.
        let track = track.update_element(ElementId::from_index(2), ElementPatch::move_to(9.0));
        assert_eq!(start_times(&track), vec![2.5, 4.0, 9.0]);
        assert_eq!(track.elements.last().unwrap().id, ElementId::from_index(2));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let track = Track::new(TrackKind::Visual, "Main", vec![element(1, 1.0, 1.0)]);
        let updated = track.clone().update_element(ElementId::from_index(99), ElementPatch::move_to(5.0));
        assert_eq!(updated, track);
    }

    #[test]
    fn test_without_element() {
        let track = Track::new(
            TrackKind::Visual,
            "Main",
            vec![element(1, 1.0, 1.0), element(2, 2.0, 1.0)],
        )
        .without_element(ElementId::from_index(1));
        assert_eq!(track.elements.len(), 1);
        assert_eq!(track.elements[0].id, ElementId::from_index(2));
    }

    #[test]
    fn test_overlap_inside_existing() {
        // Existing [2, 5); candidate [4, 6) overlaps.
        let track = Track::new(TrackKind::Visual, "Main", vec![element(1, 2.0, 3.0)]);
        assert!(track.overlaps(4.0, 2.0, None));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let track = Track::new(TrackKind::Visual, "Main", vec![element(1, 2.0, 3.0)]);
        // Candidate [5, 7) touches the existing end at 5.
        assert!(!track.overlaps(5.0, 2.0, None));
        // Candidate [0, 2) touches the existing start at 2.
        assert!(!track.overlaps(0.0, 2.0, None));
    }

    #[test]
    fn test_overlap_containment() {
        let track = Track::new(TrackKind::Visual, "Main", vec![element(1, 2.0, 1.0)]);
        // Candidate [1, 5) fully contains [2, 3).
        assert!(track.overlaps(1.0, 4.0, None));
    }

    #[test]
    fn test_overlap_exclude_self() {
        let track = Track::new(TrackKind::Visual, "Main", vec![element(1, 2.0, 3.0)]);
        // Resizing the element over its own interval is not an overlap.
        assert!(!track.overlaps(2.0, 4.0, Some(ElementId::from_index(1))));
        assert!(track.overlaps(2.0, 4.0, None));
    }

    #[test]
    fn test_stats() {
        let track = Track::new(
            TrackKind::Visual,
            "Main",
            vec![element(1, 0.0, 2.0), element(2, 4.0, 2.0)],
        );
        let stats = track.stats();
        assert_eq!(stats.element_count, 2);
        assert_eq!(stats.total_duration, 4.0);
        // Legacy formula: 4 / last start (4) * 100.
        assert_eq!(stats.coverage, 100.0);
    }

    #[test]
    fn test_stats_empty_track() {
        let stats = Track::new(TrackKind::Fx, "", Vec::new()).stats();
        assert_eq!(stats.element_count, 0);
        assert_eq!(stats.total_duration, 0.0);
        assert_eq!(stats.coverage, 0.0);
    }

    #[test]
    fn test_kind_wire_format_is_lowercase() {
        let json = serde_json::to_string(&TrackKind::Fx).unwrap();
        assert_eq!(json, "\"fx\"");
    }
}
