// ABOUTME: Text normalization for strings extracted from documents.
// ABOUTME: Digit extraction, accent and symbol stripping, and space/linebreak collapsing.

//! Text normalization.
//!
//! Every function here is a pure transform over already-decoded text.
//! Stripping works one character at a time so that pass symbols survive
//! untouched: `й` decomposes to `и` + U+0306, and dropping the breve
//! would turn it into a different letter.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Characters copied through `strip_accents` and `strip_symbols` unchanged.
pub const DEFAULT_PASS_SYMBOLS: &[char] = &['й', 'Й', '\n'];

/// Collects the ASCII digits of `s` into a base-10 number.
///
/// Input without digits yields 0. Values beyond `u64::MAX` saturate.
pub fn extract_digits(s: &str) -> u64 {
    s.chars()
        .filter_map(|c| c.to_digit(10).filter(|_| c.is_ascii_digit()))
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d))
        })
}

/// Strips diacritical marks, keeping `DEFAULT_PASS_SYMBOLS` intact.
pub fn strip_accents(s: &str) -> String {
    strip_accents_with(s, DEFAULT_PASS_SYMBOLS)
}

/// Strips diacritical marks: NFD-decomposes each character and drops nonspacing marks.
pub fn strip_accents_with(s: &str, pass_symbols: &[char]) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if pass_symbols.contains(&c) {
            result.push(c);
            continue;
        }
        result.extend(
            std::iter::once(c)
                .nfd()
                .filter(|d| get_general_category(*d) != GeneralCategory::NonspacingMark),
        );
    }
    result
}

/// Strips decorative and invisible characters, keeping `DEFAULT_PASS_SYMBOLS` intact.
pub fn strip_symbols(s: &str) -> String {
    strip_symbols_with(s, DEFAULT_PASS_SYMBOLS)
}

/// NFKC-normalizes each character, turns space separators into plain spaces
/// and drops symbols, marks, other letters, unassigned, private-use, format
/// and control characters.
pub fn strip_symbols_with(s: &str, pass_symbols: &[char]) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if pass_symbols.contains(&c) {
            result.push(c);
            continue;
        }
        for n in std::iter::once(c).nfkc() {
            match get_general_category(n) {
                GeneralCategory::SpaceSeparator => result.push(' '),
                GeneralCategory::OtherSymbol
                | GeneralCategory::NonspacingMark
                | GeneralCategory::OtherLetter
                | GeneralCategory::Unassigned
                | GeneralCategory::PrivateUse
                | GeneralCategory::Format
                | GeneralCategory::Control => {}
                _ => result.push(n),
            }
        }
    }
    result
}

/// Collapses runs of plain spaces into one and trims them at both ends.
///
/// Tabs, newlines and other whitespace are left alone.
pub fn collapse_spaces(s: &str) -> String {
    collapse_on(s, ' ')
}

/// Collapses runs of newlines into one and trims them at both ends.
pub fn collapse_linebreaks(s: &str) -> String {
    collapse_on(s, '\n')
}

fn collapse_on(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    for part in s.split(sep).filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(sep);
        }
        out.push_str(part);
    }
    out
}

/// A configurable chain of normalization steps.
///
/// Steps run in a fixed order: symbols, accents, spaces, linebreaks.
/// Symbol stripping comes first because it can turn exotic whitespace into
/// plain spaces that the collapsing steps then merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    symbols: bool,
    accents: bool,
    spaces: bool,
    linebreaks: bool,
    pass_symbols: Option<Vec<char>>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every step.
    pub fn all() -> Self {
        Self::new()
            .strip_symbols(true)
            .strip_accents(true)
            .collapse_spaces(true)
            .collapse_linebreaks(true)
    }

    pub fn strip_symbols(mut self, on: bool) -> Self {
        self.symbols = on;
        self
    }

    pub fn strip_accents(mut self, on: bool) -> Self {
        self.accents = on;
        self
    }

    pub fn collapse_spaces(mut self, on: bool) -> Self {
        self.spaces = on;
        self
    }

    pub fn collapse_linebreaks(mut self, on: bool) -> Self {
        self.linebreaks = on;
        self
    }

    /// Replaces `DEFAULT_PASS_SYMBOLS` for the stripping steps.
    pub fn pass_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.pass_symbols = Some(symbols.into_iter().collect());
        self
    }

    pub fn apply(&self, s: &str) -> String {
        let pass = self.pass_symbols.as_deref().unwrap_or(DEFAULT_PASS_SYMBOLS);
        let mut out = s.to_string();
        if self.symbols {
            out = strip_symbols_with(&out, pass);
        }
        if self.accents {
            out = strip_accents_with(&out, pass);
        }
        if self.spaces {
            out = collapse_spaces(&out);
        }
        if self.linebreaks {
            out = collapse_linebreaks(&out);
        }
        out
    }
}
