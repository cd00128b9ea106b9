// ABOUTME: Encoding label resolution and byte/text conversion for serialized markup.
// ABOUTME: Wraps encoding_rs lookups and chardetng sniffing for undeclared input.

use encoding_rs::Encoding;

use crate::error::{LeafError, Result};

/// Resolves a WHATWG encoding label (`utf8`, `utf-8`, `windows-1251`, ...).
///
/// Labels whose encoder cannot produce bytes in that encoding (UTF-16 and
/// `replacement`) resolve to their output encoding so that encode and decode
/// stay symmetric.
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .map(Encoding::output_encoding)
        .ok_or_else(|| LeafError::unknown_encoding(label))
}

/// Encodes text, replacing unmappable characters with numeric character references.
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

/// Decodes bytes, replacing malformed sequences with U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Guess the encoding of undeclared input.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decodes raw bytes using a named encoding.
pub fn to_unicode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = resolve(label)?;
    Ok(decode(bytes, encoding))
}
