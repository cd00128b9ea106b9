// ABOUTME: Error types for leaf operations.
// ABOUTME: Provides LeafError with Selector, UnknownEncoding, UnknownProperty and UnknownAttribute variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while querying or serializing a document.
///
/// Structural absence (no selector match, missing attribute on write,
/// out-of-range index) is never an error; see `NodeProxy::get`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeafError {
    /// The CSS selector could not be compiled.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    /// The encoding label is not a known WHATWG label.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A forwarded property name does not exist on the underlying node.
    #[error("node has no property named {0:?}")]
    UnknownProperty(String),

    /// A strict attribute write targeted an attribute the node does not carry.
    #[error("node has no attribute named {0:?}")]
    UnknownAttribute(String),
}

impl LeafError {
    /// Creates a Selector error from the compiler's failure.
    pub fn selector(selector: impl Into<String>, reason: impl fmt::Display) -> Self {
        LeafError::Selector {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an UnknownEncoding error.
    pub fn unknown_encoding(label: impl Into<String>) -> Self {
        LeafError::UnknownEncoding(label.into())
    }

    /// Returns true if this is a Selector error.
    pub fn is_selector(&self) -> bool {
        matches!(self, LeafError::Selector { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LeafError>;
