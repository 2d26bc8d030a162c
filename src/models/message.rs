//! Message record structure and field value coercion.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{ChannelEntity, MediaDescriptor};

/// One field value from the remote source.
///
/// Values that have no native JSON form carry an explicit coercion rule:
/// timestamps serialize as ISO-8601 strings, byte strings decode as
/// UTF-8 text when valid and fall back to a lossless ASCII-escaped
/// representation otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    List(Vec<FieldValue>),
    Map(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Convert to the JSON value written to the lake.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Bytes(bytes) => Value::String(coerce_bytes(bytes)),
            FieldValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

/// Decode bytes as UTF-8 text, falling back to an ASCII-escaped string
/// that loses no information.
fn coerce_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.escape_ascii().to_string(),
    }
}

/// The full set of fields the remote source exposes for one message.
///
/// `fields` is an open, order-preserving mapping; the pipeline never
/// interprets it beyond serialization. Identity is (channel id,
/// message id).
#[derive(Debug, Clone)]
pub struct MessageRecord {
    /// Message id, unique within its channel
    pub id: i64,

    /// Attached media, if any
    pub media: MediaDescriptor,

    /// All native source fields, in source order
    pub fields: Vec<(String, FieldValue)>,
}

impl MessageRecord {
    pub fn new(id: i64, media: MediaDescriptor, fields: Vec<(String, FieldValue)>) -> Self {
        Self { id, media, fields }
    }

    /// Build the enriched JSON document written to the lake: every
    /// native field in source order, then the `channel_id` and
    /// `channel_title` enrichment fields.
    pub fn to_document(&self, channel: &ChannelEntity) -> Value {
        let mut map = Map::new();
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json());
        }
        map.insert("channel_id".to_string(), Value::from(channel.id));
        map.insert(
            "channel_title".to_string(),
            Value::String(channel.title.clone()),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn channel() -> ChannelEntity {
        ChannelEntity {
            id: 42,
            title: "PharmaNews".to_string(),
        }
    }

    #[test]
    fn utf8_bytes_coerce_to_text() {
        let value = FieldValue::Bytes(b"hello".to_vec());
        assert_eq!(value.to_json(), Value::String("hello".to_string()));
    }

    #[test]
    fn non_utf8_bytes_coerce_to_escaped_text() {
        let value = FieldValue::Bytes(vec![0xff, 0xfe, b'a']);
        assert_eq!(value.to_json(), Value::String("\\xff\\xfea".to_string()));
    }

    #[test]
    fn timestamps_serialize_as_iso_8601() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let value = FieldValue::Timestamp(ts);
        assert_eq!(
            value.to_json(),
            Value::String("2024-03-01T12:30:00+00:00".to_string())
        );
    }

    #[test]
    fn document_appends_enrichment_fields_in_order() {
        let record = MessageRecord::new(
            100,
            MediaDescriptor::None,
            vec![
                ("id".to_string(), FieldValue::Int(100)),
                ("message".to_string(), FieldValue::Text("hi".to_string())),
            ],
        );

        let document = record.to_document(&channel());
        let object = document.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "message", "channel_id", "channel_title"]);
        assert_eq!(object["channel_id"], Value::from(42));
        assert_eq!(object["channel_title"], Value::String("PharmaNews".to_string()));
    }

    #[test]
    fn nested_values_coerce_recursively() {
        let value = FieldValue::Map(vec![
            ("raw".to_string(), FieldValue::Bytes(vec![0x00])),
            (
                "tags".to_string(),
                FieldValue::List(vec![FieldValue::Text("a".to_string()), FieldValue::Null]),
            ),
        ]);

        let json = value.to_json();
        assert_eq!(json["raw"], Value::String("\\x00".to_string()));
        assert_eq!(json["tags"][0], Value::String("a".to_string()));
        assert_eq!(json["tags"][1], Value::Null);
    }
}
