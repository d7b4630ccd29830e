//! Expectations attached to a path of an expected shape

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON value kinds, for type-only expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
    /// Any number
    Number,
    /// Any string
    String,
    /// Any array
    Array,
    /// Any object
    Object,
}

impl ValueKind {
    /// Returns the kind of a value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "null" => Some(Self::Null),
            "bool" | "boolean" => Some(Self::Bool),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What must hold for the value found at a path.
///
/// In serialized form any plain JSON value is [`Expectation::Equals`];
/// single-key objects with a `$` operator select the other variants:
/// `{"$exists": true}`, `{"$missing": true}`, `{"$len": 3}`,
/// `{"$contains": "text"}` and `{"$type": "string"}`. `{"$eq": value}`
/// is always [`Expectation::Equals`], which is how a literal object that
/// looks like an operator is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Expectation {
    /// Structurally equal: objects match as a subset, arrays element-wise.
    Equals(Value),
    /// The path resolves to any value.
    Exists,
    /// The path does not resolve.
    Missing,
    /// Array length, string character count or object size.
    Length(usize),
    /// A string value containing the text.
    Contains(String),
    /// A value of the given kind.
    Kind(ValueKind),
}

impl Expectation {
    /// Shorthand for [`Expectation::Equals`].
    #[must_use]
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    fn from_operator(object: &Map<String, Value>) -> Option<Self> {
        if object.len() != 1 {
            return None;
        }
        let (op, arg) = object.iter().next()?;
        match (op.as_str(), arg) {
            ("$exists", Value::Bool(true)) | ("$missing", Value::Bool(false)) => Some(Self::Exists),
            ("$exists", Value::Bool(false)) | ("$missing", Value::Bool(true)) => Some(Self::Missing),
            ("$len", Value::Number(n)) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Self::Length),
            ("$contains", Value::String(text)) => Some(Self::Contains(text.clone())),
            ("$type", Value::String(kind)) => ValueKind::parse(kind).map(Self::Kind),
            ("$eq", value) => Some(Self::Equals(value.clone())),
            _ => None,
        }
    }
}

impl From<Value> for Expectation {
    fn from(value: Value) -> Self {
        if let Value::Object(object) = &value {
            if let Some(expectation) = Self::from_operator(object) {
                return expectation;
            }
        }
        Self::Equals(value)
    }
}

impl From<Expectation> for Value {
    fn from(expectation: Expectation) -> Self {
        let (op, arg) = match expectation {
            Expectation::Equals(value) if !looks_like_operator(&value) => return value,
            Expectation::Equals(value) => ("$eq", value),
            Expectation::Exists => ("$exists", Self::Bool(true)),
            Expectation::Missing => ("$missing", Self::Bool(true)),
            Expectation::Length(n) => ("$len", Self::from(n)),
            Expectation::Contains(text) => ("$contains", Self::String(text)),
            Expectation::Kind(kind) => ("$type", Self::String(kind.to_string())),
        };
        let mut object = Map::new();
        object.insert(op.to_string(), arg);
        Self::Object(object)
    }
}

/// Single-key objects with a `$` key would read back as an operator.
fn looks_like_operator(value: &Value) -> bool {
    matches!(value, Value::Object(object)
        if object.len() == 1 && object.keys().all(|key| key.starts_with('$')))
}
