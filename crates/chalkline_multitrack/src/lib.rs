// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multi-track scene timeline for Chalkline.
//!
//! Parallel lanes of discrete timed elements, one lane kind each for
//! visual, audio, camera and fx content:
//! - Element CRUD with a sorted-by-start-time invariant
//! - Overlap detection and grid snapping for drag/resize
//! - Active-element queries per playback time
//! - Structural JSON import/export
//!
//! Unlike the keyframe timeline, elements here are discrete intervals
//! with a payload; nothing is interpolated. The engine is pure:
//! mutators consume and return new values, lookups borrow.

pub mod element;
pub mod timeline;
pub mod track;

pub use element::{ElementId, ElementPatch, TimelineElement};
pub use timeline::{snap_to_grid, MultiTimeline, ParseError, SyncMarker, DEFAULT_GRID};
pub use track::{Track, TrackId, TrackKind, TrackStats, DEFAULT_TRACK_HEIGHT};
