//! Field identifiers and type-erased field values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::{iso_date, parse_date};

/// Identifier of a field within a form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}

/// Committed value of a number-like field (`None` = not set)
pub type NumberValue = Option<f64>;

/// Committed value of a date field: `yyyy-mm-dd` (`None` = not set)
pub type DateValue = Option<String>;

/// A field value with its type erased, as it crosses the save boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Text, title, textarea and select (option value) fields
    Text(String),
    /// Number, currency and percent fields
    Number(NumberValue),
    /// Date fields
    Date(DateValue),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Date(_) => "date",
        }
    }

    /// True for empty text and unset numbers/dates
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => n.is_none(),
            FieldValue::Date(d) => d.is_none(),
        }
    }

    /// Plain JSON rendering (`"text"`, `12.5`, `null`)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Number(Some(n)) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Date(Some(d)) => serde_json::Value::String(d.clone()),
            FieldValue::Number(None) | FieldValue::Date(None) => serde_json::Value::Null,
        }
    }
}

/// Generic string conversion used when no formatter is supplied
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(Some(n)) => write!(f, "{}", n),
            FieldValue::Date(Some(d)) => f.write_str(d),
            FieldValue::Number(None) | FieldValue::Date(None) => Ok(()),
        }
    }
}

/// A concrete value type a field can hold
pub trait FieldData: Clone + PartialEq + fmt::Debug + Send + 'static {
    fn into_field_value(self) -> FieldValue;

    fn from_field_value(value: FieldValue) -> Result<Self, String>;

    /// Parse a raw textual value (config files, scripts)
    fn parse_raw(raw: &str) -> Result<Self, String>;
}

impl FieldData for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(format!("expected a text value, got {}", other.kind())),
        }
    }

    fn parse_raw(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl FieldData for NumberValue {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Number(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Number(n) => Ok(n),
            other => Err(format!("expected a number value, got {}", other.kind())),
        }
    }

    fn parse_raw(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid number: {:?}", raw))
    }
}

impl FieldData for DateValue {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Date(self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, String> {
        match value {
            FieldValue::Date(d) => Ok(d),
            other => Err(format!("expected a date value, got {}", other.kind())),
        }
    }

    fn parse_raw(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(None);
        }
        parse_date(raw)
            .map(|date| Some(iso_date(date)))
            .ok_or_else(|| format!("invalid date: {:?}", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_serde_shape() {
        let json = serde_json::to_string(&FieldValue::Number(Some(12.5))).unwrap();
        assert_eq!(json, r#"{"type":"number","value":12.5}"#);
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FieldValue::Number(Some(12.5)));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(FieldValue::Number(None).to_json(), serde_json::Value::Null);
        assert_eq!(
            FieldValue::Text("a".into()).to_json(),
            serde_json::Value::String("a".into())
        );
    }

    #[test]
    fn test_display_generic_conversion() {
        assert_eq!(FieldValue::Number(Some(5.0)).to_string(), "5");
        assert_eq!(FieldValue::Number(None).to_string(), "");
        assert_eq!(FieldValue::Text("x".into()).to_string(), "x");
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(NumberValue::parse_raw(""), Ok(None));
        assert_eq!(NumberValue::parse_raw("99.99"), Ok(Some(99.99)));
        assert!(NumberValue::parse_raw("abc").is_err());
        assert_eq!(
            DateValue::parse_raw("01/20/2025"),
            Ok(Some("2025-01-20".to_string()))
        );
        assert!(DateValue::parse_raw("someday").is_err());
    }

    #[test]
    fn test_from_field_value_kind_mismatch() {
        assert!(String::from_field_value(FieldValue::Number(None)).is_err());
        assert_eq!(
            NumberValue::from_field_value(FieldValue::Number(Some(1.0))),
            Ok(Some(1.0))
        );
    }
}
