// ABOUTME: Bottom-up rendering over a node's raw children.
// ABOUTME: ChildNode tags elements, text and comments; fold and render drive caller transforms.

use dom_query::NodeRef;

use super::{raw_contents, NodeProxy};

/// One raw child of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildNode<'a> {
    Element(NodeProxy<'a>),
    Text(String),
    Comment(String),
}

impl<'a> ChildNode<'a> {
    pub fn as_element(&self) -> Option<&NodeProxy<'a>> {
        match self {
            ChildNode::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl<'a> NodeProxy<'a> {
    /// Direct children, including text and comments. Doctypes and
    /// processing instructions are skipped.
    pub fn child_nodes(&self) -> Vec<ChildNode<'a>> {
        self.node
            .children()
            .into_iter()
            .filter_map(|n| self.classify(n))
            .collect()
    }

    fn classify(&self, node: NodeRef<'a>) -> Option<ChildNode<'a>> {
        if node.is_element() {
            Some(ChildNode::Element(self.wrap(node)))
        } else if node.is_text() {
            raw_contents(&node).map(ChildNode::Text)
        } else if node.is_comment() {
            raw_contents(&node).map(ChildNode::Comment)
        } else {
            None
        }
    }

    /// Folds the subtree bottom-up.
    ///
    /// `combine` sees every child together with the folded text of that
    /// child's own children (empty for text and comments); its results are
    /// concatenated in document order.
    pub fn fold<F>(&self, combine: &mut F) -> String
    where
        F: FnMut(&ChildNode<'a>, String) -> String,
    {
        let mut out = String::new();
        for child in self.child_nodes() {
            let inner = match &child {
                ChildNode::Element(el) => el.fold(combine),
                _ => String::new(),
            };
            out.push_str(&combine(&child, inner));
        }
        out
    }

    /// Renders the subtree with a per-element transform.
    ///
    /// Each element child is handed to `transform` along with its already
    /// rendered children; `None` or an empty string drops it from the output.
    /// Text is copied verbatim and comments keep their `<!--...-->` form.
    pub fn render<F>(&self, mut transform: F) -> String
    where
        F: FnMut(&NodeProxy<'a>, String) -> Option<String>,
    {
        self.fold(&mut |child, inner| match child {
            ChildNode::Element(el) => transform(el, inner).unwrap_or_default(),
            ChildNode::Text(text) => text.clone(),
            ChildNode::Comment(comment) => format!("<!--{}-->", comment),
        })
    }
}
