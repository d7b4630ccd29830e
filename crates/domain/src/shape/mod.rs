//! Structural matching of JSON documents.
//!
//! An [`ExpectedShape`] maps dotted paths to [`Expectation`]s and checks a
//! document against all of them, reporting every difference rather than
//! requiring exact textual equality.
//!
//! Paths are dot-separated; numeric segments index into arrays and an empty
//! path (or `$`) addresses the whole document:
//!
//! ```
//! use routecheck_domain::shape::{ExpectedShape, Expectation};
//! use serde_json::json;
//!
//! let shape = ExpectedShape::new()
//!     .with("user.name", Expectation::equals("ada"))
//!     .with("user.roles", Expectation::Length(2))
//!     .with("user.roles.0", Expectation::equals("admin"));
//!
//! let body = r#"{"user": {"name": "ada", "roles": ["admin", "dev"], "age": 36}}"#;
//! assert!(shape.check_json_str(body).is_ok());
//! ```

mod expectation;
mod mismatch;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use expectation::{Expectation, ValueKind};
pub use mismatch::{Mismatch, ShapeMismatch};

const ROOT: &str = "$";

/// Expected structure of a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedShape(BTreeMap<String, Expectation>);

impl ExpectedShape {
    /// Creates a shape with no expectations.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds an expectation for a path (builder pattern).
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, expectation: Expectation) -> Self {
        self.0.insert(path.into(), expectation);
        self
    }

    /// Returns the number of expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the shape has no expectations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks a raw JSON string against the shape.
    ///
    /// # Errors
    ///
    /// Returns every mismatch found; text that is not valid JSON is a
    /// single mismatch at the root.
    pub fn check_json_str(&self, raw: &str) -> Result<(), ShapeMismatch> {
        let document: Value = serde_json::from_str(raw).map_err(|e| ShapeMismatch {
            mismatches: vec![Mismatch::new(ROOT, format!("body is not valid JSON: {e}"))],
        })?;
        self.check_value(&document)
    }

    /// Checks an already decoded document against the shape.
    ///
    /// # Errors
    ///
    /// Returns every mismatch found, in path order.
    pub fn check_value(&self, document: &Value) -> Result<(), ShapeMismatch> {
        let mut mismatches = Vec::new();
        for (path, expectation) in &self.0 {
            let label = if path.is_empty() { ROOT } else { path.as_str() };
            check_path(label, resolve(document, path), expectation, &mut mismatches);
        }
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(ShapeMismatch { mismatches })
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Expectation)> for ExpectedShape {
    fn from_iter<T: IntoIterator<Item = (K, Expectation)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || path == ROOT {
        return Some(document);
    }
    path.split('.').try_fold(document, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn check_path(
    path: &str,
    found: Option<&Value>,
    expectation: &Expectation,
    mismatches: &mut Vec<Mismatch>,
) {
    match (expectation, found) {
        (Expectation::Missing, None) => {}
        (Expectation::Missing, Some(value)) => {
            mismatches.push(Mismatch::new(path, format!("expected no value, found {value}")));
        }
        (_, None) => mismatches.push(Mismatch::new(path, "missing")),
        (Expectation::Exists, Some(_)) => {}
        (Expectation::Equals(expected), Some(actual)) => {
            compare(path, expected, actual, mismatches);
        }
        (Expectation::Length(expected), Some(actual)) => match length_of(actual) {
            Some(len) if len == *expected => {}
            Some(len) => mismatches.push(Mismatch::new(
                path,
                format!("expected length {expected}, found {len}"),
            )),
            None => mismatches.push(Mismatch::new(
                path,
                format!("expected a value with a length, found {}", ValueKind::of(actual)),
            )),
        },
        (Expectation::Contains(text), Some(Value::String(actual))) => {
            if !actual.contains(text.as_str()) {
                mismatches.push(Mismatch::new(
                    path,
                    format!("expected string containing {text:?}, found {actual:?}"),
                ));
            }
        }
        (Expectation::Contains(_), Some(actual)) => mismatches.push(Mismatch::new(
            path,
            format!("expected a string, found {}", ValueKind::of(actual)),
        )),
        (Expectation::Kind(kind), Some(actual)) => {
            let found_kind = ValueKind::of(actual);
            if found_kind != *kind {
                mismatches.push(Mismatch::new(
                    path,
                    format!("expected {kind}, found {found_kind}"),
                ));
            }
        }
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::String(s) => Some(s.chars().count()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

fn child_path(parent: &str, segment: &str) -> String {
    if parent == ROOT {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

fn compare(path: &str, expected: &Value, actual: &Value, mismatches: &mut Vec<Mismatch>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, expected_value) in expected {
                let nested = child_path(path, key);
                match actual.get(key) {
                    Some(actual_value) => compare(&nested, expected_value, actual_value, mismatches),
                    None => mismatches.push(Mismatch::new(nested, "missing")),
                }
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            if expected.len() != actual.len() {
                mismatches.push(Mismatch::new(
                    path,
                    format!(
                        "expected array of length {}, found {}",
                        expected.len(),
                        actual.len()
                    ),
                ));
                return;
            }
            for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
                compare(&child_path(path, &i.to_string()), e, a, mismatches);
            }
        }
        (Value::Number(e), Value::Number(a)) => {
            let equal = match (e.as_i64(), a.as_i64()) {
                (Some(e), Some(a)) => e == a,
                _ => e.as_f64() == a.as_f64(),
            };
            if !equal {
                mismatches.push(Mismatch::new(path, format!("expected {e}, found {a}")));
            }
        }
        _ if expected == actual => {}
        _ => mismatches.push(Mismatch::new(
            path,
            format!("expected {expected}, found {actual}"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "id": 42,
            "name": "release",
            "tags": ["a", "b"],
            "artist": {"name": "Nina", "verified": true},
            "price": 9.5
        })
    }

    #[test]
    fn test_partial_object_match() {
        let shape = ExpectedShape::new()
            .with("", Expectation::equals(json!({"id": 42, "artist": {"name": "Nina"}})));
        assert!(shape.check_value(&doc()).is_ok());
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let shape = ExpectedShape::new()
            .with("id", Expectation::equals(42.0))
            .with("price", Expectation::equals(9.5));
        assert!(shape.check_value(&doc()).is_ok());
    }

    #[test]
    fn test_reports_every_mismatch() {
        let shape = ExpectedShape::new()
            .with("artist.name", Expectation::equals("Ana"))
            .with("id", Expectation::equals(7))
            .with("tags", Expectation::Length(3));
        let err = shape.check_value(&doc()).unwrap_err();
        assert_eq!(
            err.mismatches,
            vec![
                Mismatch::new("artist.name", "expected \"Ana\", found \"Nina\""),
                Mismatch::new("id", "expected 7, found 42"),
                Mismatch::new("tags", "expected length 3, found 2"),
            ]
        );
        assert!(err.to_string().starts_with("3 structural mismatch(es):"));
    }

    #[test]
    fn test_array_index_paths() {
        let shape = ExpectedShape::new()
            .with("tags.1", Expectation::equals("b"))
            .with("tags.5", Expectation::Missing)
            .with("tags.x", Expectation::Missing);
        assert!(shape.check_value(&doc()).is_ok());
    }

    #[test]
    fn test_existence_and_kind() {
        let shape = ExpectedShape::new()
            .with("artist.verified", Expectation::Kind(ValueKind::Bool))
            .with("name", Expectation::Contains("lea".to_string()))
            .with("deleted_at", Expectation::Missing)
            .with("artist", Expectation::Exists);
        assert!(shape.check_value(&doc()).is_ok());

        let err = ExpectedShape::new()
            .with("nope", Expectation::Exists)
            .check_value(&doc())
            .unwrap_err();
        assert_eq!(err.first(), Some(&Mismatch::new("nope", "missing")));
    }

    #[test]
    fn test_array_length_mismatch_in_equals() {
        let shape = ExpectedShape::new().with("tags", Expectation::equals(json!(["a"])));
        let err = shape.check_value(&doc()).unwrap_err();
        assert_eq!(
            err.first().unwrap().reason,
            "expected array of length 1, found 2"
        );
    }

    #[test]
    fn test_nested_missing_key_path() {
        let shape = ExpectedShape::new()
            .with("artist", Expectation::equals(json!({"country": "CA"})));
        let err = shape.check_value(&doc()).unwrap_err();
        assert_eq!(err.first().unwrap().path, "artist.country");
    }

    #[test]
    fn test_invalid_json_string() {
        let err = ExpectedShape::new()
            .with("id", Expectation::Exists)
            .check_json_str("<html>")
            .unwrap_err();
        assert_eq!(err.first().unwrap().path, "$");
        assert!(err.first().unwrap().reason.contains("not valid JSON"));
    }

    #[test]
    fn test_deserialize_shape() {
        let shape: ExpectedShape = serde_json::from_value(json!({
            "name": "release",
            "tags": {"$len": 2}
        }))
        .unwrap();
        assert_eq!(shape.len(), 2);
        assert!(shape.check_value(&doc()).is_ok());
    }
}
