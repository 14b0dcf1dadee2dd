//! Singer catalog
//!
//! `--discover` prints a [`Catalog`]; a catalog passed back with `--catalog`
//! decides which streams are synced.

use super::streams::StreamDefinition;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, ReplicationMethod};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

/// Catalog of available streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Stream entries
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream identifier
    pub tap_stream_id: String,
    /// Stream name
    pub stream: String,
    /// JSON Schema of records
    #[serde(default)]
    pub schema: JsonValue,
    /// Primary key fields
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Metadata attached to a breadcrumb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Empty for stream-level metadata
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    /// Metadata values
    #[serde(default)]
    pub metadata: JsonObject,
}

impl CatalogEntry {
    /// Entry describing a stream definition
    pub fn from_stream(stream: &StreamDefinition) -> Self {
        let method = match stream.replication_method {
            ReplicationMethod::FullTable => "FULL_TABLE",
        };
        let mut metadata = JsonObject::new();
        metadata.insert("table-key-properties".into(), json!(stream.key_properties));
        metadata.insert("replication-method".into(), json!(method));
        metadata.insert("inclusion".into(), json!("available"));

        Self {
            tap_stream_id: stream.name.clone(),
            stream: stream.name.clone(),
            schema: stream.schema_json(),
            key_properties: stream.key_properties.clone(),
            metadata: vec![MetadataEntry {
                breadcrumb: Vec::new(),
                metadata,
            }],
        }
    }

    /// Stream-level metadata, if present
    pub fn stream_metadata(&self) -> Option<&JsonObject> {
        self.metadata
            .iter()
            .find(|m| m.breadcrumb.is_empty())
            .map(|m| &m.metadata)
    }

    /// A stream is selected unless its metadata says `selected: false`
    pub fn is_selected(&self) -> bool {
        self.stream_metadata()
            .and_then(|m| m.get("selected"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(true)
    }
}

impl Catalog {
    /// Catalog of the given streams
    pub fn discover(streams: &[StreamDefinition]) -> Self {
        Self {
            streams: streams.iter().map(CatalogEntry::from_stream).collect(),
        }
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid catalog: {e}")))
    }

    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read catalog {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Find an entry by stream name
    pub fn get(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams
            .iter()
            .find(|e| e.tap_stream_id == stream || e.stream == stream)
    }

    /// Whether a stream should be synced
    ///
    /// Streams missing from the catalog are not synced.
    pub fn is_selected(&self, stream: &str) -> bool {
        self.get(stream).is_some_and(CatalogEntry::is_selected)
    }

    /// Keep only the selected streams from `streams`
    pub fn select(&self, streams: Vec<StreamDefinition>) -> Vec<StreamDefinition> {
        streams
            .into_iter()
            .filter(|s| self.is_selected(&s.name))
            .collect()
    }

    /// Pretty JSON for stdout
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
