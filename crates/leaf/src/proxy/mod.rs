// ABOUTME: NodeProxy, an ergonomic wrapper over one dom_query node.
// ABOUTME: Provides selector queries, serialization, attribute access and re-wrapped navigation.

//! Element proxies.
//!
//! A [`NodeProxy`] borrows a single node of a parsed [`crate::Document`] and
//! re-wraps every node it hands back, so queries chain without touching the
//! underlying tree API. Serialization goes through the encoding the document
//! was parsed with.
//!
//! Absence is never an error here: an empty match yields an empty vec, an
//! out-of-range index yields `None`, and writing an attribute the node does
//! not carry does nothing.

mod fold;
mod forward;

pub use fold::ChildNode;
pub use forward::{Capability, Property};

use std::collections::BTreeMap;
use std::fmt;

use dom_query::{NodeData, NodeRef, Selection};
use encoding_rs::Encoding;

use crate::encoding;
use crate::error::{LeafError, Result};
use crate::selector;

/// Elements whose text children are serialized without escaping.
const RAW_TEXT_TAGS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// A lightweight view of one node in a parsed document.
///
/// Proxies are cheap to clone and compare equal when they reference the same
/// node, regardless of how they were obtained.
#[derive(Clone)]
pub struct NodeProxy<'a> {
    node: NodeRef<'a>,
    encoding: &'static Encoding,
    cached_selectors: bool,
}

impl<'a> NodeProxy<'a> {
    pub(crate) fn new(
        node: NodeRef<'a>,
        encoding: &'static Encoding,
        cached_selectors: bool,
    ) -> Self {
        Self {
            node,
            encoding,
            cached_selectors,
        }
    }

    /// Wraps another node of the same tree with this proxy's settings.
    fn wrap(&self, node: NodeRef<'a>) -> NodeProxy<'a> {
        NodeProxy::new(node, self.encoding, self.cached_selectors)
    }

    fn wrap_opt(&self, node: Option<NodeRef<'a>>) -> Option<NodeProxy<'a>> {
        node.map(|n| self.wrap(n))
    }

    /// The underlying dom_query node.
    pub fn node(&self) -> &NodeRef<'a> {
        &self.node
    }

    /// The encoding used by `html_bytes`, `html` and `to_text`.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Rebinds the serialization encoding of this proxy only.
    pub fn set_encoding(&mut self, label: &str) -> Result<()> {
        self.encoding = encoding::resolve(label)?;
        Ok(())
    }

    /// Whether the node is still attached to its document.
    pub fn is_present(&self) -> bool {
        self.node.is_document() || self.node.parent().is_some()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns the node itself, if it matches `css`, followed by every
    /// matching descendant, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<NodeProxy<'a>>> {
        let matcher = selector::matcher(css, self.cached_selectors)?;
        let mut out = Vec::new();
        if self.node.is_match(&matcher) {
            out.push(self.clone());
        }
        let found = Selection::from(self.node.clone()).select_matcher(&matcher);
        out.extend(found.nodes().iter().map(|n| self.wrap(n.clone())));
        tracing::trace!(selector = css, matches = out.len(), "select");
        Ok(out)
    }

    /// Returns the match at `index`, or `None` when there are not that many.
    pub fn get(&self, css: &str, index: usize) -> Result<Option<NodeProxy<'a>>> {
        Ok(self.select(css)?.into_iter().nth(index))
    }

    /// Like [`NodeProxy::get`], falling back to `default` when the match is absent.
    pub fn get_or(
        &self,
        css: &str,
        index: usize,
        default: NodeProxy<'a>,
    ) -> Result<NodeProxy<'a>> {
        Ok(self.get(css, index)?.unwrap_or(default))
    }

    /// Shorthand for `get(css, 0)`.
    pub fn first(&self, css: &str) -> Result<Option<NodeProxy<'a>>> {
        self.get(css, 0)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Outer markup of the node, encoded with the proxy's encoding.
    pub fn html_bytes(&self) -> Vec<u8> {
        encoding::encode(&self.node.html(), self.encoding)
    }

    /// Outer markup of the node as text.
    ///
    /// Text following the node's closing tag (its tail) is not included.
    /// This is `html_bytes` decoded with the same encoding, so characters the
    /// encoding cannot represent come back as numeric character references.
    pub fn html(&self) -> String {
        encoding::decode(&self.html_bytes(), self.encoding)
    }

    /// Markup of the node's children without its own tags.
    ///
    /// Comment children are left out; text and element children are kept in
    /// document order.
    pub fn inner_html(&self) -> String {
        let raw = self
            .tag()
            .map(|t| RAW_TEXT_TAGS.contains(&t.as_str()))
            .unwrap_or(false);
        let mut out = String::new();
        for child in self.child_nodes() {
            match child {
                ChildNode::Text(text) if raw => out.push_str(&text),
                ChildNode::Text(text) => escape_text(&text, &mut out),
                ChildNode::Element(el) => out.push_str(&el.html()),
                ChildNode::Comment(_) => {}
            }
        }
        self.round_trip(&out)
    }

    /// Visible text of the node's subtree.
    pub fn to_text(&self) -> String {
        self.round_trip(&self.node.text())
    }

    fn round_trip(&self, text: &str) -> String {
        encoding::decode(&encoding::encode(text, self.encoding), self.encoding)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Value of the attribute `name`, if the node carries it.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.node.attr(name).map(|v| v.to_string())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    /// All attributes of the node, keyed by local name.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.node
            .attrs()
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect()
    }

    /// Overwrites an existing attribute in place.
    ///
    /// Returns false and leaves the tree untouched when the node has no
    /// attribute called `name`.
    pub fn set_attr(&self, name: &str, value: &str) -> bool {
        if !self.node.has_attr(name) {
            tracing::trace!(attribute = name, "ignoring write to missing attribute");
            return false;
        }
        self.node.set_attr(name, value);
        true
    }

    /// Like [`NodeProxy::set_attr`], but a missing attribute is an error.
    pub fn set_attr_strict(&self, name: &str, value: &str) -> Result<()> {
        if self.set_attr(name, value) {
            Ok(())
        } else {
            Err(LeafError::UnknownAttribute(name.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Lowercase tag name, or `None` for non-element nodes.
    pub fn tag(&self) -> Option<String> {
        if self.node.is_element() {
            self.node.node_name().map(|n| n.to_string())
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        self.node.is_element()
    }

    pub fn is_comment(&self) -> bool {
        self.node.is_comment()
    }

    /// Text before the first child node.
    pub fn text(&self) -> Option<String> {
        self.node
            .first_child()
            .filter(|c| c.is_text())
            .and_then(|c| raw_contents(&c))
    }

    /// Text between the end of this node and its next sibling.
    pub fn tail(&self) -> Option<String> {
        self.node
            .next_sibling()
            .filter(|s| s.is_text())
            .and_then(|s| raw_contents(&s))
    }

    /// Element children in document order.
    pub fn children(&self) -> Vec<NodeProxy<'a>> {
        self.node
            .element_children()
            .into_iter()
            .map(|n| self.wrap(n))
            .collect()
    }

    pub fn parent(&self) -> Option<NodeProxy<'a>> {
        self.wrap_opt(self.node.parent().filter(|p| p.is_element()))
    }

    pub fn next_element(&self) -> Option<NodeProxy<'a>> {
        self.wrap_opt(self.node.next_element_sibling())
    }

    pub fn previous_element(&self) -> Option<NodeProxy<'a>> {
        self.wrap_opt(self.node.prev_element_sibling())
    }

    /// Element descendants in document order, excluding the node itself.
    pub fn descendants(&self) -> Vec<NodeProxy<'a>> {
        self.node
            .descendants()
            .into_iter()
            .filter(|n| n.is_element())
            .map(|n| self.wrap(n))
            .collect()
    }
}

impl PartialEq for NodeProxy<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id == other.node.id && std::ptr::eq(self.node.tree, other.node.tree)
    }
}

impl Eq for NodeProxy<'_> {}

impl fmt::Debug for NodeProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProxy")
            .field("tag", &self.tag())
            .field("encoding", &self.encoding.name())
            .finish()
    }
}

impl fmt::Display for NodeProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Contents of a text or comment node.
pub(crate) fn raw_contents(node: &NodeRef<'_>) -> Option<String> {
    node.query(|n| match &n.data {
        NodeData::Text { contents } | NodeData::Comment { contents } => {
            Some(contents.to_string())
        }
        _ => None,
    })
    .flatten()
}

/// Escapes text the way the html5ever serializer does for text nodes.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
