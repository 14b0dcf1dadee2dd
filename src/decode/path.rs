//! Record path expressions
//!
//! A deliberately small subset of JSONPath, enough to point at the records
//! inside a normalized response:
//!
//! - `$` the node itself
//! - `[*]` or `.*` every element of a sequence (a lone mapping counts as one)
//! - `.name` the child `name` of a mapping
//!
//! `$[*].wd_Worker_Data` selects the data node of every worker.

use super::node::Node;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A single step of a record path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Every element
    Wildcard,
    /// A named child
    Field(String),
}

/// A parsed record path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPath {
    source: String,
    steps: Vec<PathStep>,
}

impl RecordPath {
    /// Parse a path expression
    pub fn parse(path: &str) -> Result<Self> {
        let rest = path
            .trim()
            .strip_prefix('$')
            .ok_or_else(|| Error::record_path(path, "must start with '$'"))?;

        let mut steps = Vec::new();
        let mut rest = rest;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("[*]") {
                steps.push(PathStep::Wildcard);
                rest = after;
            } else if let Some(after) = rest.strip_prefix('.') {
                let end = after.find(['.', '[']).unwrap_or(after.len());
                let name = &after[..end];
                match name {
                    "" => return Err(Error::record_path(path, "empty field name")),
                    "*" => steps.push(PathStep::Wildcard),
                    _ => steps.push(PathStep::Field(name.to_string())),
                }
                rest = &after[end..];
            } else {
                return Err(Error::record_path(
                    path,
                    format!("unsupported syntax at '{rest}'"),
                ));
            }
        }

        Ok(Self {
            source: path.trim().to_string(),
            steps,
        })
    }

    /// Path selecting every element of a collection
    pub fn every_element() -> Self {
        Self {
            source: "$[*]".to_string(),
            steps: vec![PathStep::Wildcard],
        }
    }

    /// Parsed steps
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Apply the path to a node, yielding every match
    ///
    /// Matches are produced per step, so the returned iterator is finite
    /// and owns its records; it cannot be restarted.
    pub fn extract(&self, node: Node) -> std::vec::IntoIter<Node> {
        let mut current = vec![node];
        for step in &self.steps {
            current = match step {
                PathStep::Wildcard => current.into_iter().flat_map(Node::into_sequence).collect(),
                PathStep::Field(name) => current
                    .into_iter()
                    .filter_map(|mut n| n.take(name))
                    .collect(),
            };
        }
        current.into_iter()
    }
}

impl FromStr for RecordPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Extract records from a worker collection
///
/// Shorthand for `RecordPath::every_element().extract(collection)`: each
/// element directly under the collection is yielded as-is.
pub fn extract(collection: Node) -> std::vec::IntoIter<Node> {
    RecordPath::every_element().extract(collection)
}
