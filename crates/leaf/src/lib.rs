// ABOUTME: Main library entry point for leaf, an ergonomic HTML query and text-cleaning layer.
// ABOUTME: Re-exports the public API: parse, Document, NodeProxy, Options, LeafError and the text helpers.

//! Leaf - convenient querying and normalizing of parsed HTML.
//!
//! Markup is parsed into an owned [`Document`]; its root and every query
//! result come back as [`NodeProxy`] values that chain further queries,
//! read and write attributes, and serialize with the document's encoding.
//! The [`text`] module cleans up whatever text is pulled out.
//!
//! # Example
//!
//! ```
//! use leaf::{parse, text};
//!
//! # fn main() -> Result<(), leaf::LeafError> {
//! let doc = parse(r#"<ul><li class="price">Café: 1 200 ₽</li></ul>"#);
//! let item = doc.root().first("li.price")?.expect("one price");
//! assert_eq!(text::strip_accents(&item.to_text()), "Cafe: 1 200 ₽");
//! assert_eq!(text::extract_digits(&item.to_text()), 1200);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod encoding;
pub mod error;
pub mod options;
pub mod proxy;
pub mod selector;
pub mod text;

pub use crate::document::{parse, parse_bytes, parse_with, Document};
pub use crate::encoding::to_unicode;
pub use crate::error::{LeafError, Result};
pub use crate::options::{Options, OptionsBuilder, ParseMode};
pub use crate::proxy::{Capability, ChildNode, NodeProxy, Property};
pub use crate::text::{
    collapse_linebreaks, collapse_spaces, extract_digits, strip_accents, strip_symbols, Normalizer,
};
