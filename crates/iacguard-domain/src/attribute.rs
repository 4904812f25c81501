//! Attribute normalization.
//!
//! Parsers for repeated/optional fields wrap single values in a sequence, so the same
//! attribute may arrive as `"x"`, `["x"]` or `[]` depending on how it was written. Checks
//! read attributes through [`normalize`] instead of sniffing shapes themselves.
//!
//! Rules:
//! - missing key -> `Absent`
//! - empty sequence -> `Absent`
//! - non-empty sequence -> its first element (only the first is authoritative), unwrapped
//!   again if that element is itself a sequence
//! - anything else (including `null`) -> `Scalar` unchanged

use crate::model::{AttributeValue, ResourceInstance};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalized<'a> {
    Absent,
    /// Never sequence-shaped.
    Scalar(&'a AttributeValue),
}

pub fn normalize<'a>(raw: Option<&'a AttributeValue>) -> Normalized<'a> {
    let Some(mut current) = raw else {
        return Normalized::Absent;
    };
    while let Value::Array(items) = current {
        match items.first() {
            Some(first) => current = first,
            None => return Normalized::Absent,
        }
    }
    Normalized::Scalar(current)
}

/// Look up `key` on the resource and normalize it.
pub fn normalize_attr<'a>(resource: &'a ResourceInstance, key: &str) -> Normalized<'a> {
    normalize(resource.attribute(key))
}

impl<'a> Normalized<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Normalized::Absent)
    }

    pub fn as_scalar(&self) -> Option<&'a AttributeValue> {
        match *self {
            Normalized::Absent => None,
            Normalized::Scalar(v) => Some(v),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_scalar().and_then(Value::as_str)
    }

    /// Stringified scalar: strings verbatim, other values in their JSON text form,
    /// `Absent` as the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            Normalized::Absent => String::new(),
            Normalized::Scalar(Value::String(s)) => s.clone(),
            Normalized::Scalar(other) => other.to_string(),
        }
    }

    /// Re-apply normalization to an already normalized value. Always returns `self`.
    pub fn normalize(self) -> Normalized<'a> {
        match self {
            Normalized::Absent => Normalized::Absent,
            Normalized::Scalar(v) => normalize(Some(v)),
        }
    }
}
