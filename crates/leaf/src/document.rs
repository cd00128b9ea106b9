// ABOUTME: Entry point that parses markup into an owned tree and wraps its root.
// ABOUTME: Chooses the root element the way lxml's fromstring does for documents and fragments.

use dom_query::NodeRef;
use encoding_rs::Encoding;

use crate::encoding;
use crate::error::Result;
use crate::options::{Options, ParseMode, AUTO_ENCODING};
use crate::proxy::{raw_contents, NodeProxy};

/// An owned parsed tree. Every [`NodeProxy`] borrows from one of these.
pub struct Document {
    inner: dom_query::Document,
    encoding: &'static Encoding,
    as_document: bool,
    options: Options,
}

/// Parses markup with UTF-8 serialization and default options.
pub fn parse(markup: &str) -> Document {
    Document::build(markup, encoding_rs::UTF_8, Options::default())
}

/// Parses already-decoded markup with explicit options.
///
/// The `auto` encoding label falls back to UTF-8 here since there are no
/// bytes to sniff.
pub fn parse_with(markup: &str, opts: &Options) -> Result<Document> {
    let encoding = if is_auto(&opts.encoding) {
        encoding_rs::UTF_8
    } else {
        encoding::resolve(&opts.encoding)?
    };
    Ok(Document::build(markup, encoding, opts.clone()))
}

/// Decodes raw bytes with the configured encoding, or a sniffed one for `auto`, then parses.
pub fn parse_bytes(bytes: &[u8], opts: &Options) -> Result<Document> {
    let encoding = if is_auto(&opts.encoding) {
        encoding::detect(bytes)
    } else {
        encoding::resolve(&opts.encoding)?
    };
    let markup = encoding::decode(bytes, encoding);
    Ok(Document::build(&markup, encoding, opts.clone()))
}

fn is_auto(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(AUTO_ENCODING)
}

/// True for input lxml would treat as a whole document.
fn looks_like_document(markup: &str) -> bool {
    let head: String = markup
        .trim_start_matches('\u{FEFF}')
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

impl Document {
    fn build(markup: &str, encoding: &'static Encoding, options: Options) -> Self {
        let as_document = match options.mode {
            ParseMode::Auto => looks_like_document(markup),
            ParseMode::Document => true,
            ParseMode::Fragment => false,
        };
        tracing::debug!(
            mode = %options.mode,
            as_document,
            encoding = encoding.name(),
            len = markup.len(),
            "parsing markup"
        );
        let doc = Self {
            inner: dom_query::Document::from(markup),
            encoding,
            as_document,
            options,
        };
        if !as_document {
            doc.name_fragment_wrapper();
        }
        doc
    }

    /// Renames `body` to `div` (or `span` when no block-level element sits
    /// inside) when a fragment has no single top-level element.
    fn name_fragment_wrapper(&self) {
        let Some(html) = child_named(&self.inner.root(), "html") else {
            return;
        };
        let Some(body) = fragment_body(&html) else {
            return;
        };
        if fragment_root(&html, &body).is_some() {
            return;
        }
        let name = if contains_block_level(&body) { "div" } else { "span" };
        tracing::trace!(wrapper = name, "wrapping fragment");
        body.rename(name);
    }

    /// The wrapped root element.
    ///
    /// For documents this is `html`. For fragments it is the single
    /// top-level element, or a `div`/`span` wrapper when the fragment has
    /// several top-level nodes.
    pub fn root(&self) -> NodeProxy<'_> {
        NodeProxy::new(self.root_node(), self.encoding, self.options.selector_cache)
    }

    fn root_node(&self) -> NodeRef<'_> {
        let doc_node = self.inner.root();
        let Some(html) = child_named(&doc_node, "html") else {
            return doc_node;
        };
        if self.as_document {
            return html;
        }
        let Some(body) = fragment_body(&html) else {
            return html;
        };
        fragment_root(&html, &body).unwrap_or(body)
    }

    /// The encoding the document was decoded with and serializes to.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The underlying dom_query document.
    pub fn inner(&self) -> &dom_query::Document {
        &self.inner
    }
}

fn child_named<'a>(node: &NodeRef<'a>, name: &str) -> Option<NodeRef<'a>> {
    node.element_children()
        .into_iter()
        .find(|c| c.node_name().as_deref() == Some(name))
}

/// Tags whose presence makes a fragment wrapper a `div` rather than a `span`.
const BLOCK_TAGS: &[&str] = &[
    "address", "blockquote", "center", "dir", "div", "dl", "fieldset", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "hr", "isindex", "menu", "noframes", "noscript", "ol", "p", "pre", "table",
    "ul",
];

/// The parser's `body`, found by position since it may already be renamed.
fn fragment_body<'a>(html: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    html.element_children()
        .into_iter()
        .find(|c| c.node_name().as_deref() != Some("head"))
}

/// The element a fragment stands for, when there is exactly one.
fn fragment_root<'a>(html: &NodeRef<'a>, body: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    if body.children().is_empty() {
        // Head-only fragments such as `<title>x</title>`.
        if let Some(only) = child_named(html, "head").and_then(|h| sole_element(&h)) {
            return Some(only);
        }
    }
    sole_element(body)
}

fn contains_block_level(node: &NodeRef<'_>) -> bool {
    node.descendants().iter().any(|d| {
        d.is_element()
            && d.node_name()
                .is_some_and(|n| BLOCK_TAGS.contains(&n.to_ascii_lowercase().as_str()))
    })
}

/// The only element child of `node`, provided no non-blank text sits beside it.
fn sole_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut elements = node.element_children();
    let stray_text = node
        .children()
        .iter()
        .any(|c| c.is_text() && raw_contents(c).is_some_and(|t| !t.trim().is_empty()));
    if elements.len() == 1 && !stray_text {
        elements.pop()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_document() {
        assert!(looks_like_document("<!DOCTYPE html><html></html>"));
        assert!(looks_like_document("  \n<HTML lang=\"en\">"));
        assert!(looks_like_document("\u{FEFF}<html>"));
        assert!(!looks_like_document("<div>x</div>"));
        assert!(!looks_like_document("plain text"));
    }

    #[test]
    fn test_document_root_is_html() {
        let doc = parse("<!doctype html><html><head></head><body><p>x</p></body></html>");
        assert_eq!(doc.root().tag().as_deref(), Some("html"));
    }

    #[test]
    fn test_single_element_fragment_root() {
        let doc = parse("<div id=\"main\"><p>x</p></div>\n");
        let root = doc.root();
        assert_eq!(root.tag().as_deref(), Some("div"));
        assert_eq!(root.attr("id").as_deref(), Some("main"));
    }

    #[test]
    fn test_multi_element_fragment_wrapped_in_div() {
        let doc = parse("<p>a</p><p>b</p>");
        let root = doc.root();
        assert_eq!(root.tag().as_deref(), Some("div"));
        assert_eq!(root.html(), "<div><p>a</p><p>b</p></div>");
    }

    #[test]
    fn test_inline_fragment_wrapped_in_span() {
        let doc = parse("hello <b>world</b>");
        let root = doc.root();
        assert_eq!(root.tag().as_deref(), Some("span"));
        assert!(root.html().starts_with("<span>"));
        assert_eq!(root.to_text(), "hello world");
    }

    #[test]
    fn test_nested_block_makes_div_wrapper() {
        let doc = parse("<b>x</b><span><p>y</p></span>");
        assert_eq!(doc.root().tag().as_deref(), Some("div"));
    }

    #[test]
    fn test_wrapper_is_stable_across_root_calls() {
        let doc = parse("<i>a</i><i>b</i>");
        assert_eq!(doc.root(), doc.root());
        assert_eq!(doc.root().children().len(), 2);
    }

    #[test]
    fn test_document_body_keeps_its_name() {
        let doc = parse("<!doctype html><html><body><p>a</p><p>b</p></body></html>");
        let body = doc.root().first("body").unwrap();
        assert!(body.is_some());
    }

    #[test]
    fn test_head_only_fragment() {
        let doc = parse("<title>Hi</title>");
        assert_eq!(doc.root().tag().as_deref(), Some("title"));
    }

    #[test]
    fn test_forced_modes() {
        let opts = Options::builder().mode(ParseMode::Document).build();
        let doc = parse_with("<div>x</div>", &opts).unwrap();
        assert_eq!(doc.root().tag().as_deref(), Some("html"));

        let opts = Options::builder().mode(ParseMode::Fragment).build();
        let doc = parse_with("<!doctype html><html><body><main></main></body></html>", &opts)
            .unwrap();
        assert_eq!(doc.root().tag().as_deref(), Some("main"));
    }

    #[test]
    fn test_parse_with_unknown_encoding() {
        let opts = Options::builder().encoding("nope").build();
        assert!(parse_with("<p>x</p>", &opts).is_err());
    }

    #[test]
    fn test_parse_bytes_windows_1251() {
        let opts = Options::builder().encoding("windows-1251").build();
        let bytes = b"<p>\xEF\xF0\xE8\xE2\xE5\xF2</p>";
        let doc = parse_bytes(bytes, &opts).unwrap();
        assert_eq!(doc.encoding(), encoding_rs::WINDOWS_1251);
        assert_eq!(doc.root().to_text(), "привет");
        assert_eq!(doc.root().html_bytes(), bytes.to_vec());
    }

    #[test]
    fn test_parse_bytes_auto_detects_utf8() {
        let opts = Options::builder().encoding("auto").build();
        let doc = parse_bytes("<p>Grüße aus Köln</p>".as_bytes(), &opts).unwrap();
        assert_eq!(doc.encoding(), encoding_rs::UTF_8);
        assert_eq!(doc.root().to_text(), "Grüße aus Köln");
    }
}
