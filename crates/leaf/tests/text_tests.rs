// ABOUTME: Integration tests for the text normalization helpers.
// ABOUTME: Covers digit extraction, stripping, collapsing and cleanup of text pulled from documents.

use leaf::text::{strip_accents_with, strip_symbols_with, DEFAULT_PASS_SYMBOLS};
use leaf::{
    collapse_linebreaks, collapse_spaces, extract_digits, parse, strip_accents, strip_symbols,
    to_unicode, Normalizer,
};

mod digits_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_digits_are_concatenated() {
        assert_eq!(extract_digits("ab12c3"), 123);
        assert_eq!(extract_digits("+7 (912) 345-67-89"), 79123456789);
    }

    #[test]
    fn test_digit_free_input_is_zero() {
        assert_eq!(extract_digits("no digits"), 0);
        assert_eq!(extract_digits(""), 0);
    }
}

mod strip_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_accents_examples() {
        assert_eq!(strip_accents("café"), "cafe");
        assert_eq!(strip_accents("йод"), "йод");
        assert_eq!(strip_accents("São Paulo, Zürich"), "Sao Paulo, Zurich");
    }

    #[test]
    fn test_strip_accents_decomposed_input() {
        // "e" followed by a combining acute accent
        assert_eq!(strip_accents("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_default_pass_symbols() {
        assert_eq!(DEFAULT_PASS_SYMBOLS, &['й', 'Й', '\n']);
        assert_eq!(strip_accents_with("йЙ", DEFAULT_PASS_SYMBOLS), "йЙ");
    }

    #[test]
    fn test_strip_symbols_examples() {
        assert_eq!(strip_symbols("Hello\u{2009}world ✓"), "Hello world ");
        assert_eq!(strip_symbols("a\u{0007}b\u{E000}c"), "abc");
        assert_eq!(strip_symbols_with("й", &[]), "й");
    }
}

mod collapse_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("a   b  c"), "a b c");
    }

    #[test]
    fn test_collapse_linebreaks() {
        assert_eq!(collapse_linebreaks("a\n\n\nb"), "a\nb");
    }
}

mod pipeline_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_text_extracted_from_document() {
        let doc = parse(
            "<div class=\"card\">\n  <h2>Crème   brûlée</h2>\n  <span class=\"price\">1\u{00A0}250 ₽</span>\n</div>",
        );
        let root = doc.root();
        let title = root.first("h2").unwrap().unwrap().to_text();
        let price = root.first(".price").unwrap().unwrap().to_text();

        let clean = Normalizer::new()
            .strip_symbols(true)
            .strip_accents(true)
            .collapse_spaces(true);
        assert_eq!(clean.apply(&title), "Creme brulee");
        assert_eq!(clean.apply(&price), "1 250 ₽");
        assert_eq!(extract_digits(&price), 1250);
    }

    #[test]
    fn test_collapse_document_text() {
        let doc = parse("<pre>line one\n\n\n\nline two\n</pre>");
        let text = doc.root().to_text();
        assert_eq!(collapse_linebreaks(&text), "line one\nline two");
    }

    #[test]
    fn test_to_unicode() {
        assert_eq!(to_unicode(b"caf\xE9", "latin1").unwrap(), "café");
        assert!(to_unicode(b"x", "not-a-charset").is_err());
    }
}
