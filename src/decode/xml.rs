//! XML to [`Node`] conversion using quick-xml
//!
//! Conventions:
//! - the document root becomes a one-entry mapping `{root_name: ...}`
//! - attributes are stored as `@name` entries ahead of child elements
//! - an element with text and nothing else becomes a scalar
//! - an empty element becomes the null scalar
//! - text next to attributes or children is stored under `#text`
//! - repeated children collapse into a sequence
//!
//! Names are kept exactly as written, prefixes included. Text is never
//! coerced into numbers or booleans.

use super::node::Node;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Key prefix for attributes
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key for text content of an element with attributes or children
pub const TEXT_KEY: &str = "#text";

/// An element whose end tag has not been reached yet
struct OpenElement {
    name: String,
    node: Node,
    text: String,
}

impl OpenElement {
    fn start(e: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut node = Node::Scalar(None);

        for attr in e.attributes() {
            let attr = attr.map_err(|err| Error::xml(format!("bad attribute on <{name}>: {err}")))?;
            let key = format!(
                "{ATTRIBUTE_PREFIX}{}",
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr
                .unescape_value()
                .map_err(|err| Error::xml(format!("bad attribute value on <{name}>: {err}")))?;
            node.insert(key, Node::text(value.into_owned()));
        }

        Ok(Self {
            name,
            node,
            text: String::new(),
        })
    }

    fn finish(self) -> (String, Node) {
        let Self {
            name,
            mut node,
            text,
        } = self;

        let node = match node {
            Node::Scalar(_) if text.is_empty() => Node::null(),
            Node::Scalar(_) => Node::text(text),
            _ => {
                if !text.is_empty() {
                    node.insert(TEXT_KEY, Node::text(text));
                }
                node
            }
        };
        (name, node)
    }
}

/// Parse an XML document into a [`Node`] tree
pub fn parse_xml(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::xml(format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => stack.push(OpenElement::start(&e)?),
            Event::Empty(e) => {
                let (name, node) = OpenElement::start(&e)?.finish();
                attach(&mut stack, &mut root, name, node)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml("closing tag without matching opening tag"))?;
                let (name, node) = element.finish();
                attach(&mut stack, &mut root, name, node)?;
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| Error::xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(c) => {
                let bytes = c.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    let (name, node) = root.ok_or_else(|| Error::xml("document has no root element"))?;
    Ok(Node::Mapping(vec![(name, node)]))
}

fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<(String, Node)>,
    name: String,
    node: Node,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.node.insert(name, node);
            Ok(())
        }
        None if root.is_some() => Err(Error::xml(format!(
            "second root element <{name}> after document end"
        ))),
        None => {
            *root = Some((name, node));
            Ok(())
        }
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::xml("text outside the root element")),
    }
}
