//! Singer message types
//!
//! Each message serializes to a single JSON object tagged by `type`.

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;

/// A message emitted on the output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Stream schema, emitted before any record of the stream
    Schema {
        /// Stream name
        stream: String,
        /// JSON Schema of the records
        schema: JsonValue,
        /// Primary key fields
        key_properties: Vec<String>,
    },
    /// A single extracted record
    Record {
        /// Stream name
        stream: String,
        /// Record body
        record: JsonValue,
        /// Extraction timestamp
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_time",
            default
        )]
        time_extracted: Option<DateTime<Utc>>,
    },
    /// Replication state
    State {
        /// State value
        value: JsonValue,
    },
}

fn serialize_time<S: Serializer>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Micros, true)),
        None => serializer.serialize_none(),
    }
}

impl Message {
    /// Create a schema message
    pub fn schema(
        stream: impl Into<String>,
        schema: JsonValue,
        key_properties: Vec<String>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties,
        }
    }

    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: JsonValue) -> Self {
        Self::record_at(stream, record, Utc::now())
    }

    /// Create a record message with an explicit extraction time
    pub fn record_at(
        stream: impl Into<String>,
        record: JsonValue,
        time_extracted: DateTime<Utc>,
    ) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Some(time_extracted),
        }
    }

    /// Create a state message
    pub fn state(value: JsonValue) -> Self {
        Self::State { value }
    }

    /// Final state of a full-table extract
    pub fn empty_state() -> Self {
        Self::state(json!({ "bookmarks": JsonObject::new() }))
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Record body, for record messages
    pub fn as_record(&self) -> Option<&JsonValue> {
        match self {
            Self::Record { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Stream name, for schema and record messages
    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => Some(stream),
            Self::State { .. } => None,
        }
    }
}
