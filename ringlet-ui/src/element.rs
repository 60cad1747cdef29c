//! # Element Trees
//!
//! Components in ringlet describe their output as an [`Element`] tree: a small,
//! renderer-agnostic description of SVG shapes with ordered attributes. The tree
//! is plain data, so it can be compared in tests, inspected by hosts, or handed
//! to any drawing layer.
//!
//! ## Serialization
//!
//! [`Element::to_svg_node`] converts the tree into an [`svg`] crate node, which
//! takes care of markup and escaping. [`Element::to_svg_string`] and
//! [`Element::write_to`] build on it.
//!
//! ```
//! use ringlet_ui::{Element, Tag};
//!
//! let tree = Element::new(Tag::Svg)
//!     .attr("viewBox", "0 0 100 100")
//!     .child(Element::new(Tag::Circle).attr("r", 50.0));
//!
//! assert_eq!(tree.children().len(), 1);
//! assert!(tree.to_svg_string().contains("<circle"));
//! ```

use std::{fmt, io::Write};

use smallvec::SmallVec;
use svg::Node as _;
use thiserror::Error;

use crate::format_number;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Errors produced while serializing an element tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the serialized document failed.
    #[error("failed to write SVG document: {0}")]
    Io(#[from] std::io::Error),
}

/// SVG element kinds that ringlet components emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Document root.
    Svg,
    /// `<circle>` shape.
    Circle,
    /// `<path>` shape.
    Path,
    /// `<text>` label.
    Text,
}

impl Tag {
    /// The SVG element name.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Svg => "svg",
            Tag::Circle => "circle",
            Tag::Path => "path",
            Tag::Text => "text",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single element attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// Numeric value, kept unformatted so drawing layers can use it directly.
    Number(f64),
    /// Free-form text such as class lists, path data or inline styles.
    Text(String),
}

impl AttributeValue {
    /// Numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            AttributeValue::Text(_) => None,
        }
    }

    /// Text payload, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Number(_) => None,
            AttributeValue::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => f.write_str(&format_number(*value)),
            AttributeValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// A node of a declarative SVG tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    tag: Tag,
    attributes: SmallVec<[(&'static str, AttributeValue); 6]>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: SmallVec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Sets an attribute, replacing a previous value with the same name while
    /// keeping its position.
    pub fn attr(mut self, name: &'static str, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content of this element.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = Some(content.into());
        self
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.attributes.iter().map(|(key, value)| (*key, value))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .and_then(AttributeValue::as_text)
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Returns `true` when `class` is one of this element's class tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|token| token == class)
    }

    /// Depth-first search for the first element carrying `class`, including
    /// this element itself.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_class(class))
    }

    /// Converts the tree into an [`svg`] crate node.
    ///
    /// A root [`Tag::Svg`] element gains the SVG namespace so the output is a
    /// standalone document.
    pub fn to_svg_node(&self) -> svg::node::element::Element {
        let mut node = svg::node::element::Element::new(self.tag.as_str());
        if self.tag == Tag::Svg && self.attribute("xmlns").is_none() {
            node.assign("xmlns", SVG_NAMESPACE);
        }
        for (name, value) in &self.attributes {
            node.assign(*name, value.to_string());
        }
        if let Some(text) = &self.text {
            node.append(svg::node::Text::new(text.clone()));
        }
        for child in &self.children {
            node.append(child.to_svg_node());
        }
        node
    }

    /// Serializes the tree as SVG markup.
    pub fn to_svg_string(&self) -> String {
        self.to_svg_node().to_string()
    }

    /// Writes the tree as SVG markup into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), RenderError> {
        svg::write(writer, &self.to_svg_node())?;
        Ok(())
    }
}
