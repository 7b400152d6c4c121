//! Markup tree for Doxygen XML documents.
//!
//! The tree is a closed set of node kinds: an element with ordered children,
//! or a run of text. Text that follows an element inside its parent (the
//! element's "tail") is simply the next `Node::Text` sibling.

mod parser;
pub mod text;

use std::collections::HashMap;

pub use parser::parse;

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Child elements in document order, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|el| el.tag == tag)
    }

    /// All direct child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.tag == tag)
    }

    /// Depth-first search for the first element with the given tag,
    /// starting with `self`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.elements().find_map(|el| el.find(tag))
    }

    /// Append text, merging with a preceding text run.
    pub(crate) fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}
