// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolable property values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value stored in a keyframe.
///
/// Serialized untagged, so the JSON shape is structural: numbers,
/// arrays, objects, booleans and strings round-trip exactly as the
/// scene files store them. Insertion order of map keys is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Scalar number
    Number(f64),
    /// Boolean flag (discrete, never blended)
    Bool(bool),
    /// Text (discrete, never blended)
    Text(String),
    /// Fixed-length tuple such as a color or position
    List(Vec<Value>),
    /// Keyed record such as `{x, y}`
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Interpolate from `self` towards `to` at progress `t`.
    ///
    /// Numbers blend linearly; equal-length lists blend element-wise;
    /// maps blend per key shared by both sides, dropping one-sided
    /// keys. Every other pairing (bools, strings, mismatched shapes,
    /// unequal-length lists) switches discretely from `self` to `to`
    /// at `t >= 0.5`.
    pub fn interpolate(&self, to: &Value, t: f64) -> Value {
        match (self, to) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + (b - a) * t),
            (Value::List(a), Value::List(b)) if a.len() == b.len() => Value::List(
                a.iter()
                    .zip(b.iter())
                    .map(|(from, to)| from.interpolate(to, t))
                    .collect(),
            ),
            (Value::Map(a), Value::Map(b)) => Value::Map(
                a.iter()
                    .filter_map(|(key, from)| {
                        b.get(key).map(|to| (key.clone(), from.interpolate(to, t)))
                    })
                    .collect(),
            ),
            _ => {
                if t < 0.5 {
                    self.clone()
                } else {
                    to.clone()
                }
            }
        }
    }

    /// Get the scalar number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::List(items.into_iter().map(Value::Number).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> Value {
        Value::Map(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), Value::Number(*v)))
                .collect(),
        )
    }

    #[test]
    fn test_number_blend() {
        let mid = Value::Number(0.0).interpolate(&Value::Number(10.0), 0.5);
        assert_eq!(mid, Value::Number(5.0));
    }

    #[test]
    fn test_list_blend_elementwise() {
        let from = Value::from(vec![0.0, 0.0]);
        let to = Value::from(vec![10.0, 10.0]);
        assert_eq!(from.interpolate(&to, 0.5), Value::from(vec![5.0, 5.0]));
    }

    #[test]
    fn test_map_blend_shared_keys() {
        let from = map(&[("x", 0.0), ("y", 0.0)]);
        let to = map(&[("x", 10.0), ("y", 20.0)]);
        assert_eq!(from.interpolate(&to, 0.5), map(&[("x", 5.0), ("y", 10.0)]));
    }

    #[test]
    fn test_map_drops_one_sided_keys() {
        let from = map(&[("x", 0.0), ("gone", 1.0)]);
        let to = map(&[("x", 10.0), ("other", 2.0)]);
        assert_eq!(from.interpolate(&to, 0.5), map(&[("x", 5.0)]));
    }

    #[test]
    fn test_discrete_switch_at_half() {
        let from = Value::from("a");
        let to = Value::from("b");
        assert_eq!(from.interpolate(&to, 0.49), from);
        assert_eq!(from.interpolate(&to, 0.5), to);
    }

    #[test]
    fn test_mismatched_lists_are_discrete() {
        let from = Value::from(vec![0.0, 0.0]);
        let to = Value::from(vec![1.0, 1.0, 1.0]);
        assert_eq!(from.interpolate(&to, 0.25), from);
        assert_eq!(from.interpolate(&to, 0.75), to);
    }

    #[test]
    fn test_nested_recursion() {
        let from = Value::List(vec![map(&[("x", 0.0)]), Value::Number(0.0)]);
        let to = Value::List(vec![map(&[("x", 4.0)]), Value::Number(2.0)]);
        let mid = from.interpolate(&to, 0.5);
        assert_eq!(mid, Value::List(vec![map(&[("x", 2.0)]), Value::Number(1.0)]));
    }

    #[test]
    fn test_untagged_json_shapes() {
        assert_eq!(serde_json::to_string(&Value::Number(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&Value::from(vec![1.0, 2.0])).unwrap(),
            "[1.0,2.0]"
        );
        let parsed: Value = serde_json::from_str(r#"{"x":1.0}"#).unwrap();
        assert_eq!(parsed, map(&[("x", 1.0)]));
    }
}
