// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for the animation timeline.

use crate::easing::Easing;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A keyframe in a property track.
///
/// Keyframes are value-like: edits replace a keyframe rather than
/// mutating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Time in seconds
    pub time: f64,
    /// Value at this keyframe
    pub value: Value,
    /// Easing curve towards the next keyframe
    #[serde(default)]
    pub interpolation: Easing,
    /// Control points `[x1, y1, x2, y2]` for bezier easing
    #[serde(default)]
    pub bezier_handles: Option<[f64; 4]>,
}

impl Keyframe {
    /// Create a linear keyframe.
    pub fn new(time: f64, value: impl Into<Value>) -> Self {
        Self {
            time,
            value: value.into(),
            interpolation: Easing::Linear,
            bezier_handles: None,
        }
    }

    /// Set the easing curve towards the next keyframe.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.interpolation = easing;
        self
    }

    /// Use bezier easing with the given `[x1, y1, x2, y2]` handles.
    pub fn with_bezier(mut self, handles: [f64; 4]) -> Self {
        self.interpolation = Easing::Bezier;
        self.bezier_handles = Some(handles);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_linear() {
        let kf = Keyframe::new(1.0, 0.5);
        assert_eq!(kf.interpolation, Easing::Linear);
        assert!(kf.bezier_handles.is_none());
    }

    #[test]
    fn test_with_bezier_sets_curve() {
        let kf = Keyframe::new(0.0, 0.0).with_bezier([0.25, 0.1, 0.25, 1.0]);
        assert_eq!(kf.interpolation, Easing::Bezier);
        assert_eq!(kf.bezier_handles, Some([0.25, 0.1, 0.25, 1.0]));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let kf = Keyframe::new(2.0, 1.0).with_bezier([0.0, 0.0, 1.0, 1.0]);
        let json = serde_json::to_string(&kf).unwrap();
        assert!(json.contains("\"bezierHandles\""));
        let back: Keyframe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kf);
    }

    #[test]
    fn test_missing_easing_defaults_on_import() {
        let kf: Keyframe = serde_json::from_str(r#"{"time":1.0,"value":3.0}"#).unwrap();
        assert_eq!(kf.interpolation, Easing::Linear);
    }
}
