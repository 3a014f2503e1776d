//! Markdown AST node model.
//!
//! Documents arrive as nested JSON arrays:
//!
//! ```text
//! [["h3", {}, "What is WCAG?"], ["p", {"class": "lead"}, "A standard."], "bare text"]
//! ```
//!
//! An element is an array whose first item is a string tag name, whose second
//! item is an attribute object, and whose remaining items are children. Plain
//! strings are text leaves. Anything else is kept verbatim as [`Node::Other`]
//! so that passthrough stays lossless.
//!
//! Conversion happens once at the boundary; the transforms only ever see
//! [`Node`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Element attributes (insertion order preserved).
pub type Attrs = Map<String, Value>;

/// A single AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    Element(Element),
    Text(String),
    /// Non-conforming JSON (null, numbers, objects, arrays without a tag).
    Other(Value),
}

/// An element node: `[tag, attrs, ...children]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder: replace children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

/// Check whether a raw JSON value has element shape.
///
/// This is the only discriminant between structural nodes and leaves.
#[inline]
pub fn is_element_node(value: &Value) -> bool {
    matches!(value, Value::Array(items) if is_element_node_items(items))
}

#[inline]
fn is_element_node_items(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::String(_)))
}

impl Node {
    /// Shorthand for an element with text children only.
    pub fn element(tag: &str, texts: &[&str]) -> Self {
        let children = texts.iter().map(|t| Node::Text((*t).to_string())).collect();
        Node::Element(Element::new(tag).with_children(children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Tag name of an element node.
    #[inline]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element(elem) => Some(elem.tag.as_str()),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(elem)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Node::Text(text),
            Value::Array(items) if is_element_node_items(&items) => {
                Node::Element(element_from_items(items))
            }
            other => Node::Other(other),
        }
    }
}

/// Build an element from an array already known to start with a tag.
fn element_from_items(items: Vec<Value>) -> Element {
    let mut iter = items.into_iter();

    let tag = match iter.next() {
        Some(Value::String(tag)) => tag,
        _ => String::new(),
    };

    // A missing or non-object second slot is dropped; children start at index 2.
    let attrs = match iter.next() {
        Some(Value::Object(attrs)) => attrs,
        _ => Attrs::new(),
    };

    Element {
        tag,
        attrs,
        children: iter.map(Node::from).collect(),
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Element(elem) => {
                let mut items = Vec::with_capacity(elem.children.len() + 2);
                items.push(Value::String(elem.tag));
                items.push(Value::Object(elem.attrs));
                items.extend(elem.children.into_iter().map(Value::from));
                Value::Array(items)
            }
            Node::Text(text) => Value::String(text),
            Node::Other(value) => value,
        }
    }
}

/// Convert a JSON document into top-level nodes.
///
/// Returns `None` when the value is not an array.
pub fn document_from_value(value: &Value) -> Option<Vec<Node>> {
    match value {
        Value::Array(items) => Some(items.iter().cloned().map(Node::from).collect()),
        _ => None,
    }
}

/// Convert top-level nodes back into a JSON document.
pub fn document_to_value(nodes: Vec<Node>) -> Value {
    Value::Array(nodes.into_iter().map(Value::from).collect())
}
