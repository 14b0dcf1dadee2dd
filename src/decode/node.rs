//! Normalized XML tree
//!
//! A parsed document is a [`Node`]: a mapping, an ordered sequence, or a
//! scalar. Code that walks the tree matches on the variant instead of
//! probing for "is this a dict or a list".

use serde_json::{Map, Value};

/// Character separating a namespace prefix from a local name
pub const NAMESPACE_SEPARATOR: char = ':';

/// Replacement for [`NAMESPACE_SEPARATOR`] in normalized keys
pub const NORMALIZED_SEPARATOR: char = '_';

/// One node of a parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element text; `None` for an empty element
    Scalar(Option<String>),
    /// Attributes and child elements, in document order
    Mapping(Vec<(String, Node)>),
    /// Repeated sibling elements sharing one name
    Sequence(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Scalar(None)
    }
}

impl Node {
    /// Create a text scalar
    pub fn text(value: impl Into<String>) -> Self {
        Node::Scalar(Some(value.into()))
    }

    /// Create the null scalar
    pub fn null() -> Self {
        Node::Scalar(None)
    }

    /// Check for the null scalar
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(None))
    }

    /// Text of a scalar node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Scalar(Some(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a chain of keys through nested mappings
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Remove a key from a mapping node and return its value
    pub fn take(&mut self, key: &str) -> Option<Node> {
        match self {
            Node::Mapping(entries) => {
                let idx = entries.iter().position(|(k, _)| k == key)?;
                Some(entries.remove(idx).1)
            }
            _ => None,
        }
    }

    /// Keys of a mapping node, in order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Node::Mapping(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Add a child under `key`, turning repeated keys into a sequence
    ///
    /// Repeats collapse onto the first occurrence even when other keys were
    /// inserted in between.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        if !matches!(self, Node::Mapping(_)) {
            *self = Node::Mapping(Vec::new());
        }
        let Node::Mapping(entries) = self else {
            return;
        };

        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Node::Sequence(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::take(existing);
                *existing = Node::Sequence(vec![first, value]);
            }
            None => entries.push((key, value)),
        }
    }

    /// Coerce a node that may hold one or many elements into a list
    ///
    /// A single repeated element parses as a bare mapping rather than a
    /// one-element sequence; both shapes come out of here as a `Vec`.
    /// The null scalar (element absent or empty) yields no elements.
    pub fn into_sequence(self) -> Vec<Node> {
        match self {
            Node::Sequence(items) => items,
            Node::Scalar(None) => Vec::new(),
            other => vec![other],
        }
    }

    /// Number of elements [`Node::into_sequence`] would produce
    pub fn sequence_len(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Scalar(None) => 0,
            _ => 1,
        }
    }

    /// Rewrite namespace-qualified keys into single tokens, recursively
    ///
    /// `wd:Worker_ID` becomes `wd_Worker_ID`, `@wd:type` becomes `@wd_type`.
    /// Sequence elements are normalized too; scalars are left untouched.
    pub fn normalize_keys(self) -> Node {
        match self {
            Node::Mapping(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (normalize_key(&k), v.normalize_keys()))
                    .collect(),
            ),
            Node::Sequence(items) => {
                Node::Sequence(items.into_iter().map(Node::normalize_keys).collect())
            }
            scalar @ Node::Scalar(_) => scalar,
        }
    }

    /// Whether any key in the tree still carries a namespace separator
    pub fn has_qualified_keys(&self) -> bool {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .any(|(k, v)| k.contains(NAMESPACE_SEPARATOR) || v.has_qualified_keys()),
            Node::Sequence(items) => items.iter().any(Node::has_qualified_keys),
            Node::Scalar(_) => false,
        }
    }

    /// Convert into a JSON value, preserving key order
    pub fn into_json(self) -> Value {
        Value::from(self)
    }
}

/// Replace the namespace separator in a single key
pub fn normalize_key(key: &str) -> String {
    key.replace(NAMESPACE_SEPARATOR, &NORMALIZED_SEPARATOR.to_string())
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(Some(s)) => Value::String(s),
            Node::Scalar(None) => Value::Null,
            Node::Mapping(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (k, v) in entries {
                    map.insert(k, Value::from(v));
                }
                Value::Object(map)
            }
            Node::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}
