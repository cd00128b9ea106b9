// ABOUTME: Configuration options for parsing, including ParseMode, Options and OptionsBuilder.
// ABOUTME: OptionsBuilder provides a fluent API for constructing Options with custom settings.

use std::fmt;

/// How `parse` chooses the root element of the tree it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Documents (leading `<!doctype` or `<html`) root at `html`; anything
    /// else follows the fragment rule.
    #[default]
    Auto,
    /// Always root at the `html` element.
    Document,
    /// Root at the single top-level element, or at a `div`/`span` wrapper when there are several.
    Fragment,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseMode::Auto => "auto",
            ParseMode::Document => "document",
            ParseMode::Fragment => "fragment",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for ParseMode {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "document" | "doc" => ParseMode::Document,
            "fragment" | "frag" => ParseMode::Fragment,
            _ => ParseMode::Auto,
        }
    }
}

/// Label that asks `parse_bytes` to sniff the encoding from the input.
pub const AUTO_ENCODING: &str = "auto";

/// Configuration options for parsing and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// WHATWG encoding label threaded through every serialization call.
    pub encoding: String,
    pub mode: ParseMode,
    /// Reuse compiled selectors across queries.
    pub selector_cache: bool,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            mode: ParseMode::Auto,
            selector_cache: false,
        }
    }
}

/// Builder for constructing Options with custom configuration.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    opts: Options,
}

impl OptionsBuilder {
    /// Create a new OptionsBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the encoding label used for serialization (and for decoding in `parse_bytes`).
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.opts.encoding = label.into();
        self
    }

    /// Set how the root element is chosen.
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.opts.mode = mode;
        self
    }

    /// Enable or disable the process-wide compiled selector cache.
    pub fn selector_cache(mut self, enabled: bool) -> Self {
        self.opts.selector_cache = enabled;
        self
    }

    pub fn build(self) -> Options {
        self.opts
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
