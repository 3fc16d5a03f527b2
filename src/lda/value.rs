//! Decoder for the linked-data value micro-format.
//!
//! The upstream service is inconsistent about how it serializes scalars: a
//! field may arrive as a bare JSON scalar, as a `{"_value": …}` object with
//! an optional `_datatype` tag, or as a one-element list of either. [`Field`]
//! absorbs all of these shapes at deserialization time and offers typed
//! conversions on top.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A single linked-data field in any of its upstream serializations.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Field {
    Wrapped(WrappedValue),
    Many(Vec<Field>),
    Plain(Value),
}

/// The `{"_value": …, "_datatype": …}` wrapper shape.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WrappedValue {
    #[serde(rename = "_value")]
    value: Value,
    #[serde(rename = "_datatype")]
    #[allow(dead_code)]
    datatype: Option<String>,
}

impl Field {
    /// Unwrap a list to its first element; lists beyond the first element
    /// carry no extra information for scalar fields.
    fn scalar(&self) -> Option<&Self> {
        match self {
            Self::Many(items) => items.first().and_then(Self::scalar),
            _ => Some(self),
        }
    }

    fn scalar_value(&self) -> Option<&Value> {
        match self.scalar()? {
            Self::Wrapped(wrapped) => Some(&wrapped.value),
            Self::Plain(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    /// The field as text. Numbers are rendered in decimal.
    pub fn as_text(&self) -> Option<String> {
        match self.scalar_value()? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// The field as an unsigned count. Upstream serves counts both as JSON
    /// numbers and as decimal strings.
    pub fn as_u32(&self) -> Option<u32> {
        match self.scalar_value()? {
            Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// The field as a calendar date. `dateTime` values keep only the date
    /// part; trailing time and zone designators are ignored.
    pub fn as_date(&self) -> Option<NaiveDate> {
        let text = self.as_text()?;
        let date_part = text.get(..10)?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

pub(crate) fn require_text(field: &Field, attribute: &'static str) -> Result<String> {
    field
        .as_text()
        .ok_or_else(|| Error::decode(attribute, "expected a text value"))
}

pub(crate) fn require_u32(field: &Field, attribute: &'static str) -> Result<u32> {
    field
        .as_u32()
        .ok_or_else(|| Error::decode(attribute, "expected a numeric value"))
}

pub(crate) fn require_date(field: &Field, attribute: &'static str) -> Result<NaiveDate> {
    field
        .as_date()
        .ok_or_else(|| Error::decode(attribute, "expected a date value"))
}
