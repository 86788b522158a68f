//! String literal decoding and escaping.
//!
//! A literal body is the text between the double quotes, still escaped.
//! Supported escapes: `\\`, `\"`, `\n`, `\r`, `\t`, `\xNN` (one byte),
//! `\uNNNN` and `\UNNNNNNNN` (one Unicode scalar value, UTF-8 encoded).

use std::fmt::Write;
use thiserror::Error;

/// The flavour of a string literal, decided by its decoded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// Decoded content is 7-bit ASCII.
    Ascii,
    /// Decoded content is valid UTF-8 with at least one non-ASCII character.
    Utf8,
    /// Decoded content is not valid UTF-8.
    Binary,
}

/// Decoded literal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Text(String),
    Bytes(Vec<u8>),
}

/// A string literal error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("truncated escape sequence")]
    TruncatedEscape,

    #[error("invalid unicode code point U+{0:X}")]
    InvalidCodePoint(u32),

    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,
}

/// Decode the escape sequences of a literal body into raw bytes.
pub fn unescape(raw: &str) -> Result<Vec<u8>, LiteralError> {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        match chars.next() {
            Some('\\') => bytes.push(b'\\'),
            Some('"') => bytes.push(b'"'),
            Some('n') => bytes.push(b'\n'),
            Some('r') => bytes.push(b'\r'),
            Some('t') => bytes.push(b'\t'),
            Some('x') => {
                let value = read_hex(&mut chars, 2)?;
                // two hex digits always fit in a byte
                bytes.push(value as u8);
            }
            Some(kind @ ('u' | 'U')) => {
                let digits = if kind == 'u' { 4 } else { 8 };
                let value = read_hex(&mut chars, digits)?;
                let c = char::from_u32(value).ok_or(LiteralError::InvalidCodePoint(value))?;
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Some(other) => return Err(LiteralError::InvalidEscape(other)),
            None => return Err(LiteralError::TruncatedEscape),
        }
    }

    Ok(bytes)
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<u32, LiteralError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let c = chars.next().ok_or(LiteralError::TruncatedEscape)?;
        let digit = c.to_digit(16).ok_or(LiteralError::InvalidEscape(c))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Classify decoded literal content.
pub fn classify(bytes: &[u8]) -> StringKind {
    if bytes.is_ascii() {
        StringKind::Ascii
    } else if std::str::from_utf8(bytes).is_ok() {
        StringKind::Utf8
    } else {
        StringKind::Binary
    }
}

/// Decode a literal body according to its kind.
pub fn decode(kind: StringKind, raw: &str) -> Result<Decoded, LiteralError> {
    let bytes = unescape(raw)?;
    match kind {
        StringKind::Ascii | StringKind::Utf8 => String::from_utf8(bytes)
            .map(Decoded::Text)
            .map_err(|_| LiteralError::InvalidUtf8),
        StringKind::Binary => Ok(Decoded::Bytes(bytes)),
    }
}

/// Escape text content into a literal body (without the quotes).
///
/// Non-ASCII characters are kept as they are.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' || c == '\x7f' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Escape binary content into a literal body (without the quotes).
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_simple() {
        assert_eq!(unescape(r#"a\tb\n\"c\"\\"#).unwrap(), b"a\tb\n\"c\"\\".to_vec());
    }

    #[test]
    fn test_unescape_hex_and_unicode() {
        assert_eq!(unescape(r"\x41é").unwrap(), "Aé".as_bytes().to_vec());
        assert_eq!(unescape(r"\U0001F600").unwrap(), "😀".as_bytes().to_vec());
        assert_eq!(unescape(r"\xff").unwrap(), vec![0xff]);
    }

    #[test]
    fn test_unescape_errors() {
        assert_eq!(unescape(r"\q"), Err(LiteralError::InvalidEscape('q')));
        assert_eq!(unescape(r"\x4"), Err(LiteralError::TruncatedEscape));
        assert_eq!(unescape("\\"), Err(LiteralError::TruncatedEscape));
        assert_eq!(
            unescape(r"\ud800"),
            Err(LiteralError::InvalidCodePoint(0xd800))
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b"hello"), StringKind::Ascii);
        assert_eq!(classify("héllo".as_bytes()), StringKind::Utf8);
        assert_eq!(classify(&[0x61, 0xff]), StringKind::Binary);
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            decode(StringKind::Utf8, r"café").unwrap(),
            Decoded::Text("café".to_string())
        );
        assert_eq!(
            decode(StringKind::Binary, r"\x00\xff").unwrap(),
            Decoded::Bytes(vec![0x00, 0xff])
        );
        assert_eq!(
            decode(StringKind::Ascii, r"\xff"),
            Err(LiteralError::InvalidUtf8)
        );
    }

    #[test]
    fn test_escape_str() {
        assert_eq!(escape_str("a\"b\\c\nd"), r#"a\"b\\c\nd"#);
        assert_eq!(escape_str("\u{1}é"), "\\x01é");
    }

    #[test]
    fn test_escape_bytes() {
        assert_eq!(escape_bytes(&[b'a', 0x00, 0xff, b'"']), r#"a\x00\xff\""#);
    }

    #[test]
    fn test_escape_then_unescape() {
        let text = "tab\there \"quoted\" \u{7f} ünïcode";
        assert_eq!(unescape(&escape_str(text)).unwrap(), text.as_bytes().to_vec());
    }
}
