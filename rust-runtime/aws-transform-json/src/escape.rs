/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
enum EscapeErrorKind {
    ExpectedSurrogatePair(String),
    InvalidEscapeCharacter(char),
    InvalidSurrogatePair(u16, u16),
    InvalidUnicodeEscape(String),
    InvalidUtf8,
    UnexpectedEndOfString,
}

/// A JSON string contained an escape sequence that couldn't be decoded.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct EscapeError {
    kind: EscapeErrorKind,
}

impl std::error::Error for EscapeError {}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EscapeErrorKind::*;
        match &self.kind {
            ExpectedSurrogatePair(low) => write!(
                f,
                "expected a UTF-16 surrogate pair, but got {low} as the low word"
            ),
            InvalidEscapeCharacter(chr) => write!(f, "invalid JSON escape: \\{chr}"),
            InvalidSurrogatePair(high, low) => {
                write!(f, "invalid surrogate pair: \\u{high:04X}\\u{low:04X}")
            }
            InvalidUnicodeEscape(escape) => write!(f, "invalid JSON Unicode escape: \\u{escape}"),
            InvalidUtf8 => write!(f, "invalid UTF-8 codepoint in JSON string"),
            UnexpectedEndOfString => write!(f, "unexpected end of string"),
        }
    }
}

impl From<EscapeErrorKind> for EscapeError {
    fn from(kind: EscapeErrorKind) -> Self {
        Self { kind }
    }
}

fn needs_escape(byte: u8) -> bool {
    matches!(byte, 0..=0x1F | b'"' | b'\\')
}

/// Escapes a string for embedding in a JSON string value.
///
/// Strings without anything to escape are returned as-is.
pub(crate) fn escape_string(value: &str) -> Cow<'_, str> {
    match value.bytes().position(needs_escape) {
        None => Cow::Borrowed(value),
        Some(first) => {
            let mut escaped = String::with_capacity(value.len() + 8);
            escaped.push_str(&value[..first]);
            for chr in value[first..].chars() {
                match chr {
                    '"' => escaped.push_str("\\\""),
                    '\\' => escaped.push_str("\\\\"),
                    '\u{08}' => escaped.push_str("\\b"),
                    '\u{0C}' => escaped.push_str("\\f"),
                    '\n' => escaped.push_str("\\n"),
                    '\r' => escaped.push_str("\\r"),
                    '\t' => escaped.push_str("\\t"),
                    '\u{00}'..='\u{1F}' => {
                        escaped.push_str(&format!("\\u{:04x}", chr as u32));
                    }
                    other => escaped.push(other),
                }
            }
            Cow::Owned(escaped)
        }
    }
}

/// Unescapes a JSON-escaped string.
///
/// If there are no escape sequences, the input is returned directly.
pub(crate) fn unescape_string(value: &str) -> Result<Cow<'_, str>, EscapeError> {
    let first = match value.find('\\') {
        None => return Ok(Cow::Borrowed(value)),
        Some(index) => index,
    };

    let bytes = value.as_bytes();
    let mut unescaped: Vec<u8> = Vec::with_capacity(bytes.len());
    unescaped.extend_from_slice(&bytes[..first]);

    let mut index = first;
    while index < bytes.len() {
        if bytes[index] != b'\\' {
            unescaped.push(bytes[index]);
            index += 1;
            continue;
        }
        let escape = *bytes
            .get(index + 1)
            .ok_or(EscapeErrorKind::UnexpectedEndOfString)?;
        let simple = match escape {
            b'"' => Some(b'"'),
            b'\\' => Some(b'\\'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'u' => None,
            other => return Err(EscapeErrorKind::InvalidEscapeCharacter(other.into()).into()),
        };
        match simple {
            Some(byte) => {
                unescaped.push(byte);
                index += 2;
            }
            None => {
                let (read, chr) = read_unicode_escape(&bytes[index..])?;
                let mut buffer = [0; 4];
                unescaped.extend_from_slice(chr.encode_utf8(&mut buffer).as_bytes());
                index += read;
            }
        }
    }

    String::from_utf8(unescaped)
        .map(Cow::Owned)
        .map_err(|_| EscapeErrorKind::InvalidUtf8.into())
}

/// Reads one `\uXXXX` code unit from the start of `bytes`.
fn read_code_unit(bytes: &[u8]) -> Result<u16, EscapeError> {
    if bytes.len() < 6 {
        return Err(EscapeErrorKind::UnexpectedEndOfString.into());
    }
    if &bytes[..2] != b"\\u" {
        // only reachable for the low half of a surrogate pair
        return Err(EscapeErrorKind::ExpectedSurrogatePair(
            String::from_utf8_lossy(&bytes[..6]).into(),
        )
        .into());
    }
    let hex = std::str::from_utf8(&bytes[2..6]).map_err(|_| EscapeErrorKind::InvalidUtf8)?;
    // from_str_radix would accept a leading `+`
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(EscapeErrorKind::InvalidUnicodeEscape(hex.into()).into());
    }
    u16::from_str_radix(hex, 16).map_err(|_| EscapeErrorKind::InvalidUnicodeEscape(hex.into()).into())
}

/// Reads a Unicode escape, plus its low surrogate if the first code unit is a high surrogate.
/// Returns the number of bytes consumed along with the decoded character.
fn read_unicode_escape(bytes: &[u8]) -> Result<(usize, char), EscapeError> {
    let high = read_code_unit(bytes)?;
    if (0xD800..0xDC00).contains(&high) {
        let low = read_code_unit(&bytes[6..])?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(EscapeErrorKind::InvalidSurrogatePair(high, low).into());
        }
        let codepoint = 0x10000 + (u32::from(high) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00);
        let chr = char::from_u32(codepoint)
            .ok_or(EscapeErrorKind::InvalidSurrogatePair(high, low))?;
        Ok((12, chr))
    } else {
        let chr = char::from_u32(u32::from(high)).ok_or_else(|| {
            EscapeErrorKind::InvalidUnicodeEscape(String::from_utf8_lossy(&bytes[2..6]).into())
        })?;
        Ok((6, chr))
    }
}

#[cfg(test)]
mod test {
    use super::{escape_string, unescape_string, EscapeErrorKind};
    use proptest::proptest;
    use std::borrow::Cow;

    #[test]
    fn escape() {
        assert_eq!("", escape_string(""));
        assert_eq!("QueueUrl", escape_string("QueueUrl"));
        assert!(matches!(escape_string("QueueUrl"), Cow::Borrowed(_)));
        assert_eq!("line\\r\\nbreak", escape_string("line\r\nbreak"));
        assert_eq!(r"arn\\path", escape_string(r"arn\path"));
        assert_eq!("\\\"quoted\\\"", escape_string("\"quoted\""));
        assert_eq!(r"\bf\fo\t", escape_string("\u{08}f\u{0C}o\t"));
        assert_eq!("\\u0000", escape_string("\u{0}"));
        assert_eq!("\\u001f", escape_string("\u{1f}"));
        assert_eq!("\u{10437}\\n", escape_string("\u{10437}\n"));
    }

    #[test]
    fn unescape() {
        assert!(matches!(
            unescape_string("no escapes").unwrap(),
            Cow::Borrowed("no escapes")
        ));
        assert_eq!("\x08f\x0Co\to\r\n", unescape_string(r"\bf\fo\to\r\n").unwrap());
        assert_eq!("a/b", unescape_string(r"a\/b").unwrap());
        assert_eq!("\"q\"", unescape_string(r#"\"q\""#).unwrap());
        assert_eq!("\x1f", unescape_string("\\u001f").unwrap());
        assert_eq!("é", unescape_string("\\u00e9").unwrap());
        assert_eq!("\u{10437}", unescape_string("\\uD801\\uDC37").unwrap());
    }

    #[test]
    fn unescape_errors() {
        assert_eq!(
            Err(EscapeErrorKind::UnexpectedEndOfString.into()),
            unescape_string("\\")
        );
        assert_eq!(
            Err(EscapeErrorKind::UnexpectedEndOfString.into()),
            unescape_string("\\u00")
        );
        assert_eq!(
            Err(EscapeErrorKind::InvalidEscapeCharacter('z').into()),
            unescape_string("\\z")
        );
        assert_eq!(
            Err(EscapeErrorKind::ExpectedSurrogatePair("\\nabcd".into()).into()),
            unescape_string("\\uD801\\nabcd")
        );
        assert_eq!(
            Err(EscapeErrorKind::InvalidSurrogatePair(0xD801, 0xC501).into()),
            unescape_string("\\uD801\\uC501")
        );
        assert_eq!(
            Err(EscapeErrorKind::InvalidUnicodeEscape("+04D".into()).into()),
            unescape_string("\\u+04D")
        );
    }

    proptest! {
        #[test]
        fn matches_serde_json(s in ".*") {
            let serde_escaped = serde_json::to_string(&s).unwrap();
            let serde_escaped = &serde_escaped[1..(serde_escaped.len() - 1)];
            assert_eq!(serde_escaped, escape_string(&s))
        }

        #[test]
        fn round_trip(s in "\\PC*") {
            let escaped = escape_string(&s);
            assert_eq!(s, unescape_string(&escaped).unwrap());
        }
    }
}
