//! Cached Value Module
//!
//! Wire format of cached values: text is stored verbatim, everything else as
//! JSON. Reads try JSON first and fall back to raw text, so entries written in
//! either form stay readable.

use serde::Serialize;

use crate::error::Result;

// == Value ==
/// A cached value, tagged by how it is encoded in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Plain text, stored as-is
    Text(String),
    /// Structured data, stored as compact JSON
    Structured(serde_json::Value),
}

impl Value {
    /// Serializes any record into a structured value.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self> {
        Ok(Value::Structured(serde_json::to_value(record)?))
    }

    // == Encode ==
    /// Canonical stored form of the value.
    pub fn encode(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Structured(json) => json.to_string(),
        }
    }

    // == Decode ==
    /// Interprets stored text. Never fails: anything that is not valid JSON
    /// comes back as `Text`.
    pub fn decode(raw: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(json) => Value::Structured(json),
            Err(_) => Value::Text(raw),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Structured(json) => Some(json),
            Value::Text(_) => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Structured(json)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_is_stored_verbatim() {
        let value = Value::from("hello world");
        assert_eq!(value.encode(), "hello world");
    }

    #[test]
    fn test_structured_is_stored_as_compact_json() {
        let value = Value::from(json!({"id": "1", "price": 19.99}));
        assert_eq!(value.encode(), r#"{"id":"1","price":19.99}"#);
    }

    #[test]
    fn test_decode_falls_back_to_text() {
        let value = Value::decode("not json {".to_string());
        assert_eq!(value, Value::Text("not json {".to_string()));
    }

    #[test]
    fn test_decode_prefers_json() {
        assert_eq!(Value::decode("42".to_string()), Value::Structured(json!(42)));
        assert_eq!(
            Value::decode(r#"{"name":"Widget"}"#.to_string()),
            Value::Structured(json!({"name": "Widget"}))
        );
    }

    #[test]
    fn test_decode_empty_string_is_text() {
        assert_eq!(Value::decode(String::new()), Value::Text(String::new()));
    }

    #[test]
    fn test_serializes_untagged() {
        let text = serde_json::to_string(&Value::from("plain")).unwrap();
        let structured = serde_json::to_string(&Value::from(json!({"a": 1}))).unwrap();

        assert_eq!(text, r#""plain""#);
        assert_eq!(structured, r#"{"a":1}"#);
    }

    #[test]
    fn test_from_record() {
        #[derive(Serialize)]
        struct Record {
            id: &'static str,
        }

        let value = Value::from_record(&Record { id: "9" }).unwrap();
        assert_eq!(value.as_structured(), Some(&json!({"id": "9"})));
        assert!(value.as_text().is_none());
    }
}
