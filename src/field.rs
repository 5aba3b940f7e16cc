use serde::Serialize;
use serde_json::{Map, Number};
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

/// Typed value of a single structured field.
///
/// Nested objects and arrays are variants of the same closed type, so a
/// backend never has to guess what it was handed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Strings(Vec<String>),
    Ints(Vec<i64>),
    Error(String),
    Object(Vec<Field>),
    Array(Vec<Value>),
    Json(serde_json::Value),
    Null,
}

/// A key/value pair attached to one log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Field { key: key.into(), value }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Field::new(key, Value::Str(value.into()))
    }

    pub fn strings(key: impl Into<String>, value: Vec<String>) -> Self {
        Field::new(key, Value::Strings(value))
    }

    pub fn stringer(key: impl Into<String>, value: &dyn Display) -> Self {
        Field::new(key, Value::Str(value.to_string()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Field::new(key, Value::Int(value))
    }

    pub fn ints(key: impl Into<String>, value: Vec<i64>) -> Self {
        Field::new(key, Value::Ints(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Field::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Field::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Field::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Field::new(key, Value::Duration(value))
    }

    /// Error under the conventional `error` key.
    pub fn error(err: &dyn StdError) -> Self {
        Field::named_error("error", err)
    }

    pub fn named_error(key: impl Into<String>, err: &dyn StdError) -> Self {
        Field::new(key, Value::Error(err.to_string()))
    }

    /// Optional integer; `None` renders as null.
    pub fn int_opt(key: impl Into<String>, value: Option<i64>) -> Self {
        Field::new(key, value.map(Value::Int).unwrap_or(Value::Null))
    }

    /// Optional error under `key`; `None` renders as null.
    pub fn named_error_opt(key: impl Into<String>, err: Option<&dyn StdError>) -> Self {
        match err {
            Some(err) => Field::named_error(key, err),
            None => Field::new(key, Value::Null),
        }
    }

    /// Any serializable value. Serialization failures are kept as error text.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Field::new(key, Value::Json(json)),
            Err(e) => Field::new(key, Value::Error(e.to_string())),
        }
    }
}

impl Value {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Str(s) | Value::Error(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Uint(u) => serde_json::Value::from(*u),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Duration(d) => serde_json::Value::String(format!("{:?}", d)),
            Value::Strings(v) => serde_json::Value::from(v.clone()),
            Value::Ints(v) => serde_json::Value::from(v.clone()),
            Value::Object(fields) => fields_to_json(fields),
            Value::Array(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Json(json) => json.clone(),
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Error(s) => f.write_str(s),
            Value::Duration(d) => write!(f, "{:?}", d),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// Render fields as a JSON object. Later duplicates win, as in most
/// structured encoders.
pub fn fields_to_json(fields: &[Field]) -> serde_json::Value {
    let mut map = Map::with_capacity(fields.len());
    for field in fields {
        map.insert(field.key.clone(), field.value.to_json());
    }
    serde_json::Value::Object(map)
}

/// `version` field stamped on failure entries.
pub(crate) fn version() -> Field {
    Field::string("version", crate::VERSION)
}

/// `latency` field measured from `start`.
pub(crate) fn latency(start: Instant) -> Field {
    Field::duration("latency", start.elapsed())
}
