//! Response decoder module
//!
//! Turns XML response bodies into normalized [`Node`] trees and pulls
//! records out of them.
//!
//! # Overview
//!
//! - [`parse_xml`] builds the raw tree, element names as written
//! - [`Node::normalize_keys`] rewrites `prefix:Name` keys to `prefix_Name`
//! - [`normalize`] does both in one step
//! - [`RecordPath`] selects records from a normalized tree

mod node;
mod path;
mod xml;

pub use node::{normalize_key, Node, NAMESPACE_SEPARATOR, NORMALIZED_SEPARATOR};
pub use path::{extract, PathStep, RecordPath};
pub use xml::{parse_xml, ATTRIBUTE_PREFIX, TEXT_KEY};

use crate::error::Result;

/// Parse an XML body and normalize every key
pub fn normalize(xml: &str) -> Result<Node> {
    Ok(parse_xml(xml)?.normalize_keys())
}
