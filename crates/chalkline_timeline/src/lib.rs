// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe animation timeline for Chalkline.
//!
//! This crate computes what value an animated property should have at
//! a given time:
//! - Easing curves and generic value interpolation
//! - Property tracks (sorted keyframe sequences)
//! - Timelines with markers, sync points, loop segments and
//!   time remappings
//! - Structural JSON import/export
//!
//! ## Architecture
//!
//! Everything is a pure function over value-like data: mutators
//! consume and return new objects, lookups borrow. The engine holds no
//! hidden state and performs no I/O, so UI layers can edit with simple
//! replace-and-rerender semantics.

pub mod easing;
pub mod keyframe;
pub mod timeline;
pub mod track;
pub mod value;

pub use easing::Easing;
pub use keyframe::Keyframe;
pub use timeline::{
    LoopSegment, ParseError, SyncPoint, TimeMarker, TimeRemapping, Timeline, DEFAULT_TOLERANCE,
};
pub use track::PropertyTrack;
pub use value::Value;
