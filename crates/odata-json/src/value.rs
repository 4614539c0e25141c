//! [`ODataValue`], the in-memory payload tree.
//!
//! A JSON tree that can additionally hold structured date/time and duration
//! values, which the annotators produce and the serializer renders back to
//! text.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use crate::temporal::{DateValue, DurationValue};

/// Insertion-ordered object.
pub type Map = IndexMap<String, ODataValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ODataValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ODataValue>),
    Object(Map),
    /// A recognized date/time string.
    DateTime(DateValue),
    /// A duration; written in canonical `PnDTnHnMn.nS` text on output.
    Duration(DurationValue),
}

impl ODataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ODataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            ODataValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ODataValue>> {
        match self {
            ODataValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Object member lookup; `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&ODataValue> {
        self.as_object()?.get(key)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ODataValue::Null)
    }

    /// Neither an array nor an object.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ODataValue::Array(_) | ODataValue::Object(_))
    }

    /// Render as compact JSON text.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<serde_json::Value> for ODataValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => ODataValue::Null,
            serde_json::Value::Bool(b) => ODataValue::Bool(b),
            serde_json::Value::Number(n) => ODataValue::Number(n),
            serde_json::Value::String(s) => ODataValue::String(s),
            serde_json::Value::Array(arr) => {
                ODataValue::Array(arr.into_iter().map(ODataValue::from).collect())
            }
            serde_json::Value::Object(obj) => ODataValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, ODataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ODataValue> for serde_json::Value {
    fn from(v: ODataValue) -> Self {
        match v {
            ODataValue::Null => serde_json::Value::Null,
            ODataValue::Bool(b) => serde_json::Value::Bool(b),
            ODataValue::Number(n) => serde_json::Value::Number(n),
            ODataValue::String(s) => serde_json::Value::String(s),
            ODataValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            ODataValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            ODataValue::DateTime(date) => serde_json::Value::String(date.to_iso_string()),
            ODataValue::Duration(duration) => serde_json::Value::String(duration.to_string()),
        }
    }
}

impl From<&str> for ODataValue {
    fn from(s: &str) -> Self {
        ODataValue::String(s.to_string())
    }
}

impl From<String> for ODataValue {
    fn from(s: String) -> Self {
        ODataValue::String(s)
    }
}

impl From<Map> for ODataValue {
    fn from(map: Map) -> Self {
        ODataValue::Object(map)
    }
}

impl Serialize for ODataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ODataValue::Null => serializer.serialize_unit(),
            ODataValue::Bool(b) => serializer.serialize_bool(*b),
            ODataValue::Number(n) => n.serialize(serializer),
            ODataValue::String(s) => serializer.serialize_str(s),
            ODataValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ODataValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            ODataValue::DateTime(date) => serializer.serialize_str(&date.to_iso_string()),
            ODataValue::Duration(duration) => serializer.serialize_str(&duration.to_string()),
        }
    }
}
