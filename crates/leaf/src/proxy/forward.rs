// ABOUTME: Enumerated property forwarding from a NodeProxy to its underlying node.
// ABOUTME: Capability names what to read; Property is the explicitly re-wrapped result.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::NodeProxy;
use crate::error::{LeafError, Result};

/// A structural property a proxy can forward to its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Tag,
    /// Text before the first child.
    Text,
    /// Text after the node, before its next sibling.
    Tail,
    Children,
    Parent,
    Next,
    Previous,
    Attributes,
    TextContent,
    Descendants,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::Tag,
        Capability::Text,
        Capability::Tail,
        Capability::Children,
        Capability::Parent,
        Capability::Next,
        Capability::Previous,
        Capability::Attributes,
        Capability::TextContent,
        Capability::Descendants,
    ];

    /// Canonical property name.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Tag => "tag",
            Capability::Text => "text",
            Capability::Tail => "tail",
            Capability::Children => "children",
            Capability::Parent => "parent",
            Capability::Next => "next",
            Capability::Previous => "previous",
            Capability::Attributes => "attrib",
            Capability::TextContent => "text_content",
            Capability::Descendants => "descendants",
        }
    }
}

impl FromStr for Capability {
    type Err = LeafError;

    /// Accepts canonical names and the lxml spellings (`getparent`, `iterchildren`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let cap = match s {
            "tag" => Capability::Tag,
            "text" => Capability::Text,
            "tail" => Capability::Tail,
            "children" | "getchildren" | "iterchildren" => Capability::Children,
            "parent" | "getparent" => Capability::Parent,
            "next" | "getnext" => Capability::Next,
            "previous" | "getprevious" => Capability::Previous,
            "attrib" | "attributes" => Capability::Attributes,
            "text_content" => Capability::TextContent,
            "descendants" | "iterdescendants" => Capability::Descendants,
            _ => return Err(LeafError::UnknownProperty(s.to_string())),
        };
        Ok(cap)
    }
}

/// The result of forwarding a property, with nodes already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property<'a> {
    Nodes(Vec<NodeProxy<'a>>),
    Node(NodeProxy<'a>),
    Text(String),
    Attributes(BTreeMap<String, String>),
    Absent,
}

impl<'a> Property<'a> {
    fn from_node(node: Option<NodeProxy<'a>>) -> Self {
        node.map(Property::Node).unwrap_or(Property::Absent)
    }

    fn from_text(text: Option<String>) -> Self {
        text.map(Property::Text).unwrap_or(Property::Absent)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Property::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Property::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodeProxy<'a>> {
        match self {
            Property::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Flattens node-valued results into a vec; scalars yield an empty vec.
    pub fn into_nodes(self) -> Vec<NodeProxy<'a>> {
        match self {
            Property::Nodes(nodes) => nodes,
            Property::Node(node) => vec![node],
            _ => Vec::new(),
        }
    }
}

impl<'a> NodeProxy<'a> {
    /// Reads a structural property of the underlying node.
    pub fn forward(&self, capability: Capability) -> Property<'a> {
        match capability {
            Capability::Tag => Property::from_text(self.tag()),
            Capability::Text => Property::from_text(self.text()),
            Capability::Tail => Property::from_text(self.tail()),
            Capability::Children => Property::Nodes(self.children()),
            Capability::Parent => Property::from_node(self.parent()),
            Capability::Next => Property::from_node(self.next_element()),
            Capability::Previous => Property::from_node(self.previous_element()),
            Capability::Attributes => Property::Attributes(self.attributes()),
            Capability::TextContent => Property::Text(self.to_text()),
            Capability::Descendants => Property::Nodes(self.descendants()),
        }
    }

    /// Looks a property up by name.
    ///
    /// An attribute called `name` wins over a same-named capability, so a
    /// `<meta tag="x">` reads `"x"` for `"tag"`. Names that are neither fail
    /// with `LeafError::UnknownProperty`.
    pub fn property(&self, name: &str) -> Result<Property<'a>> {
        if let Some(value) = self.attr(name) {
            return Ok(Property::Text(value));
        }
        Ok(self.forward(name.parse()?))
    }
}
