// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves for keyframe interpolation.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Easing curve applied to the progress between two keyframes.
///
/// Serialized as a `snake_case` string (`"ease_in_out"` etc.) to match
/// the scene file format. Unrecognized curve names deserialize as
/// [`Easing::Linear`] rather than failing the import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Quadratic acceleration
    EaseIn,
    /// Quadratic deceleration
    EaseOut,
    /// Quadratic acceleration then deceleration
    EaseInOut,
    /// Cubic acceleration
    EaseInCubic,
    /// Cubic deceleration
    EaseOutCubic,
    /// Hold the start value, jumping to the end only at t = 1
    Step,
    /// Cubic bezier shaped by per-keyframe handles
    Bezier,
}

impl Easing {
    /// Parse a curve name, falling back to [`Easing::Linear`] for
    /// anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ease_in" => Easing::EaseIn,
            "ease_out" => Easing::EaseOut,
            "ease_in_out" => Easing::EaseInOut,
            "ease_in_cubic" => Easing::EaseInCubic,
            "ease_out_cubic" => Easing::EaseOutCubic,
            "step" => Easing::Step,
            "bezier" => Easing::Bezier,
            _ => Easing::Linear,
        }
    }

    /// Apply this curve to a progress value in `[0, 1]`.
    ///
    /// `bezier_handles` is `[x1, y1, x2, y2]` and only consulted by
    /// [`Easing::Bezier`]. The bezier evaluation is a weighted-y
    /// approximation carried over from the original scene format: the
    /// `x1`/`x2` handles are accepted but do not influence the result,
    /// and a missing handle set falls back to linear.
    pub fn apply(self, t: f64, bezier_handles: Option<[f64; 4]>) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
            // Hold-then-jump: the eased value reaches 1 only at t = 1,
            // not at the midpoint. This matches the original curves.
            Easing::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::Bezier => match bezier_handles {
                Some([_x1, y1, _x2, y2]) => {
                    let t2 = t * t;
                    let t3 = t2 * t;
                    3.0 * (1.0 - t) * (1.0 - t) * t * y1 + 3.0 * (1.0 - t) * t2 * y2 + t3
                }
                None => t,
            },
        }
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EasingVisitor;

        impl Visitor<'_> for EasingVisitor {
            type Value = Easing;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an easing curve name")
            }

            fn visit_str<E>(self, name: &str) -> Result<Easing, E>
            where
                E: de::Error,
            {
                Ok(Easing::from_name(name))
            }
        }

        deserializer.deserialize_str(EasingVisitor)
    }
}
