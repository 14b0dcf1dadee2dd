//! Schema module
//!
//! Stream definitions, their declared JSON Schemas and the Singer catalog.
//!
//! # Features
//!
//! - **Stream definitions**: name, key properties, record path
//! - **Declared schema**: the worker record shape, not enforced
//! - **Catalog**: discovery output and stream selection

mod catalog;
mod streams;
mod types;

pub use catalog::{Catalog, CatalogEntry, MetadataEntry};
pub use streams::{
    all_streams, humanresources, humanresources_schema, StreamDefinition, DEFAULT_RECORD_PATH,
    HUMANRESOURCES_STREAM, WORKER_ID_KEY,
};
pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};

#[cfg(test)]
mod tests;
