// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property tracks: ordered keyframe sequences for one animated property.

use crate::keyframe::Keyframe;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// An ordered sequence of keyframes for a single animatable property.
///
/// Keyframes are kept sorted ascending by time after every mutation;
/// lookup relies on that order. Two keyframes at exactly the same time
/// are tolerated: the first one in scan order governs the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PropertyTrack {
    /// Keyframes sorted by time
    pub keyframes: Vec<Keyframe>,
}

impl PropertyTrack {
    /// Create a track, sorting the given keyframes by time.
    pub fn new(mut keyframes: Vec<Keyframe>) -> Self {
        sort_keyframes(&mut keyframes);
        Self { keyframes }
    }

    /// Return a new track with one keyframe added, re-sorted.
    #[must_use]
    pub fn with_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        sort_keyframes(&mut self.keyframes);
        self
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// True when the track has no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last keyframe, or 0 when empty.
    pub fn end_time(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |kf| kf.time)
    }

    /// Evaluate the track at `time`.
    ///
    /// Returns `None` when the track has no keyframes. Outside the
    /// keyframed range the first/last value is held (clamp). Between
    /// two keyframes the progress is eased by the *earlier* keyframe's
    /// curve and the values are interpolated at the eased progress.
    pub fn value_at(&self, time: f64) -> Option<Value> {
        let first = self.keyframes.first()?;
        if time <= first.time {
            return Some(first.value.clone());
        }

        let last = self.keyframes.last()?;
        if time >= last.time {
            return Some(last.value.clone());
        }

        for pair in self.keyframes.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if time >= current.time && time <= next.time {
                let progress = (time - current.time) / (next.time - current.time);
                let eased = current.interpolation.apply(progress, current.bezier_handles);
                return Some(current.value.interpolate(&next.value, eased));
            }
        }

        Some(last.value.clone())
    }
}

fn sort_keyframes(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn ramp() -> PropertyTrack {
        PropertyTrack::new(vec![Keyframe::new(0.0, 0.0), Keyframe::new(10.0, 100.0)])
    }

    #[test]
    fn test_empty_track_returns_none() {
        assert_eq!(PropertyTrack::default().value_at(1.0), None);
    }

    #[test]
    fn test_clamp_left_and_right() {
        let track = ramp();
        assert_eq!(track.value_at(-5.0), Some(Value::Number(0.0)));
        assert_eq!(track.value_at(50.0), Some(Value::Number(100.0)));
    }

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(ramp().value_at(5.0), Some(Value::Number(50.0)));
    }

    #[test]
    fn test_ease_in_midpoint() {
        let track = PropertyTrack::new(vec![
            Keyframe::new(0.0, 0.0).with_easing(Easing::EaseIn),
            Keyframe::new(10.0, 100.0),
        ]);
        // progress 0.5 eased to 0.25
        assert_eq!(track.value_at(5.0), Some(Value::Number(25.0)));
    }

    #[test]
    fn test_earlier_keyframe_governs_segment() {
        // The second keyframe's curve must not affect the first segment.
        let track = PropertyTrack::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(2.0, 1.0).with_easing(Easing::EaseOut),
        ]);
        assert_eq!(track.value_at(1.0), Some(Value::Number(0.5)));
    }

    #[test]
    fn test_step_holds_then_jumps() {
        let track = PropertyTrack::new(vec![
            Keyframe::new(0.0, 0.0).with_easing(Easing::Step),
            Keyframe::new(10.0, 100.0),
        ]);
        assert_eq!(track.value_at(9.999), Some(Value::Number(0.0)));
        assert_eq!(track.value_at(10.0), Some(Value::Number(100.0)));
    }

    #[test]
    fn test_construction_sorts() {
        let track = PropertyTrack::new(vec![
            Keyframe::new(5.0, 5.0),
            Keyframe::new(1.0, 1.0),
            Keyframe::new(3.0, 3.0),
        ]);
        let times: Vec<f64> = track.keyframes.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_with_keyframe_resorts() {
        let track = ramp().with_keyframe(Keyframe::new(2.0, 20.0));
        let times: Vec<f64> = track.keyframes.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 2.0, 10.0]);
        assert_eq!(track.value_at(1.0), Some(Value::Number(10.0)));
    }

    #[test]
    fn test_single_keyframe_clamps_everywhere() {
        let track = PropertyTrack::new(vec![Keyframe::new(3.0, 7.0)]);
        assert_eq!(track.value_at(0.0), Some(Value::Number(7.0)));
        assert_eq!(track.value_at(3.0), Some(Value::Number(7.0)));
        assert_eq!(track.value_at(9.0), Some(Value::Number(7.0)));
    }

    #[test]
    fn test_tuple_value_interpolation() {
        let track = PropertyTrack::new(vec![
            Keyframe::new(0.0, Value::from(vec![0.0, 0.0])),
            Keyframe::new(1.0, Value::from(vec![10.0, 10.0])),
        ]);
        assert_eq!(track.value_at(0.5), Some(Value::from(vec![5.0, 5.0])));
    }
}
