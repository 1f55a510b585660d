// SPDX-License-Identifier: MIT OR Apache-2.0
//! Discrete timed elements placed on multi-track lanes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a timeline element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build a deterministic ID from a counter, for tests and tooling
    pub fn from_index(index: u64) -> Self {
        Self(Uuid::from_u64_pair(0, index))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

/// A discrete timed item on a track: a start time, a duration, a
/// payload and a label. Not keyframed internally. The id is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineElement {
    /// Unique element ID
    pub id: ElementId,
    /// Start time in seconds
    pub start_time: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Element kind, an opaque caller-owned tag (e.g. `"scene"`, `"clip"`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Caller-owned payload
    #[serde(default)]
    pub data: IndexMap<String, serde_json::Value>,
    /// Display label
    pub label: String,
}

impl TimelineElement {
    /// Create an element with a fresh random id.
    ///
    /// An empty `label` defaults to `"{kind} {start_time}s"` with the
    /// start time printed to one decimal.
    pub fn new(
        start_time: f64,
        duration: f64,
        kind: impl Into<String>,
        data: IndexMap<String, serde_json::Value>,
        label: impl Into<String>,
    ) -> Self {
        Self::with_id(ElementId::new(), start_time, duration, kind, data, label)
    }

    /// Create an element with a caller-supplied id.
    pub fn with_id(
        id: ElementId,
        start_time: f64,
        duration: f64,
        kind: impl Into<String>,
        data: IndexMap<String, serde_json::Value>,
        label: impl Into<String>,
    ) -> Self {
        let kind = kind.into();
        let label = label.into();
        let label = if label.is_empty() {
            format!("{kind} {start_time:.1}s")
        } else {
            label
        };
        Self {
            id,
            start_time,
            duration,
            kind,
            data,
            label,
        }
    }

    /// End time in seconds (start + duration).
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Partial update applied to an element by
/// [`Track::update_element`](crate::track::Track::update_element).
/// Unset fields leave the element untouched; the id never changes.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    /// New start time
    pub start_time: Option<f64>,
    /// New duration
    pub duration: Option<f64>,
    /// New kind tag
    pub kind: Option<String>,
    /// Replacement payload
    pub data: Option<IndexMap<String, serde_json::Value>>,
    /// New label
    pub label: Option<String>,
}

impl ElementPatch {
    /// Patch that moves an element to a new start time.
    pub fn move_to(start_time: f64) -> Self {
        Self {
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    /// Patch that resizes an element.
    pub fn resize(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Apply this patch to an element.
    pub(crate) fn apply(self, mut element: TimelineElement) -> TimelineElement {
        if let Some(start_time) = self.start_time {
            element.start_time = start_time;
        }
        if let Some(duration) = self.duration {
            element.duration = duration;
        }
        if let Some(kind) = self.kind {
            element.kind = kind;
        }
        if let Some(data) = self.data {
            element.data = data;
        }
        if let Some(label) = self.label {
            element.label = label;
        }
        element
    }
}
