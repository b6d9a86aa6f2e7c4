/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::deserialize::error::{SyntaxError, SyntaxErrorKind};
use crate::escape::unescape_string;
use aws_transform_types::Number;
use std::borrow::Cow;

pub use crate::escape::EscapeError;

/// New-type around `&str` that indicates the string is an escaped JSON string.
/// Provides functions for retrieving the string in either form.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct EscapedStr<'a>(&'a str);

impl<'a> EscapedStr<'a> {
    /// Wraps a string that is already JSON-escaped.
    pub fn new(value: &'a str) -> EscapedStr<'a> {
        EscapedStr(value)
    }

    /// Returns the escaped string value
    pub fn as_escaped_str(&self) -> &'a str {
        self.0
    }

    /// Unescapes the string and returns it.
    /// If the string doesn't need unescaping, it will be returned directly.
    pub fn to_unescaped(&self) -> Result<Cow<'a, str>, EscapeError> {
        unescape_string(self.0)
    }
}

/// Byte offset of a token in the input
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Offset(pub usize);

/// JSON tokens returned by [`json_token_iter`](crate::deserialize::json_token_iter).
#[allow(missing_docs)]
#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    StartArray {
        offset: Offset,
    },
    EndArray {
        offset: Offset,
    },
    ObjectKey {
        offset: Offset,
        key: EscapedStr<'a>,
    },
    StartObject {
        offset: Offset,
    },
    EndObject {
        offset: Offset,
    },
    ValueBool {
        offset: Offset,
        value: bool,
    },
    ValueNull {
        offset: Offset,
    },
    /// `text` is the number exactly as written, for readers that need more precision than
    /// `value` holds (fractional epoch seconds).
    ValueNumber {
        offset: Offset,
        value: Number,
        text: &'a str,
    },
    ValueString {
        offset: Offset,
        value: EscapedStr<'a>,
    },
}

impl Token<'_> {
    /// Where the token starts in the input.
    pub fn offset(&self) -> Offset {
        use Token::*;
        *match self {
            StartArray { offset } => offset,
            EndArray { offset } => offset,
            ObjectKey { offset, .. } => offset,
            StartObject { offset } => offset,
            EndObject { offset } => offset,
            ValueBool { offset, .. } => offset,
            ValueNull { offset } => offset,
            ValueNumber { offset, .. } => offset,
            ValueString { offset, .. } => offset,
        }
    }

    /// Short description of the token, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::StartArray { .. } => "start of array",
            Token::EndArray { .. } => "end of array",
            Token::ObjectKey { .. } => "object key",
            Token::StartObject { .. } => "start of object",
            Token::EndObject { .. } => "end of object",
            Token::ValueBool { .. } => "boolean",
            Token::ValueNull { .. } => "null",
            Token::ValueNumber { .. } => "number",
            Token::ValueString { .. } => "string",
        }
    }

    /// Error for reading this token where `expected` was needed.
    pub fn unexpected(&self, expected: &'static str) -> SyntaxError {
        SyntaxError::at(
            self.offset().0,
            SyntaxErrorKind::UnexpectedToken {
                found: self.describe(),
                expected,
            },
        )
    }
}

/// Expects the next token to open an object.
pub fn expect_start_object(
    token: Option<Result<Token<'_>, SyntaxError>>,
) -> Result<(), SyntaxError> {
    match token.transpose()? {
        Some(Token::StartObject { .. }) => Ok(()),
        Some(token) => Err(token.unexpected("start of object")),
        None => Err(SyntaxError::end_of_input()),
    }
}

/// Expects a string or null token. If the value was a string, its **unescaped** value will be
/// returned.
pub fn expect_string_or_null(
    token: Option<Result<Token<'_>, SyntaxError>>,
) -> Result<Option<String>, SyntaxError> {
    match token.transpose()? {
        Some(Token::ValueNull { .. }) => Ok(None),
        Some(Token::ValueString { offset, value }) => value
            .to_unescaped()
            .map(|value| Some(value.into_owned()))
            .map_err(|err| SyntaxError::invalid_escape(offset.0, err)),
        Some(token) => Err(token.unexpected("string or null")),
        None => Err(SyntaxError::end_of_input()),
    }
}

/// Skips an entire value in the token stream. Errors if it isn't a value.
pub fn skip_value<'a>(
    tokens: &mut impl Iterator<Item = Result<Token<'a>, SyntaxError>>,
) -> Result<(), SyntaxError> {
    let mut depth = 0usize;
    loop {
        match tokens.next().transpose()? {
            Some(Token::StartObject { .. }) | Some(Token::StartArray { .. }) => depth += 1,
            Some(token @ (Token::EndObject { .. } | Token::EndArray { .. })) => {
                if depth == 0 {
                    return Err(token.unexpected("value"));
                }
                depth -= 1;
            }
            Some(token @ Token::ObjectKey { .. }) => {
                if depth == 0 {
                    return Err(token.unexpected("value"));
                }
            }
            Some(_) => {}
            None => return Err(SyntaxError::end_of_input()),
        }
        if depth == 0 {
            return Ok(());
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::deserialize::json_token_iter;

    pub(crate) fn start_array<'a>(offset: usize) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::StartArray {
            offset: Offset(offset),
        }))
    }

    pub(crate) fn start_object<'a>(offset: usize) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::StartObject {
            offset: Offset(offset),
        }))
    }

    pub(crate) fn value_bool<'a>(
        offset: usize,
        boolean: bool,
    ) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::ValueBool {
            offset: Offset(offset),
            value: boolean,
        }))
    }

    pub(crate) fn value_null<'a>(offset: usize) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::ValueNull {
            offset: Offset(offset),
        }))
    }

    pub(crate) fn value_number<'a>(
        offset: usize,
        number: Number,
        text: &'a str,
    ) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::ValueNumber {
            offset: Offset(offset),
            value: number,
            text,
        }))
    }

    pub(crate) fn value_string<'a>(
        offset: usize,
        string: &'a str,
    ) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::ValueString {
            offset: Offset(offset),
            value: EscapedStr::new(string),
        }))
    }

    fn next_is_true<'a>(tokens: &mut impl Iterator<Item = Result<Token<'a>, SyntaxError>>) {
        assert!(matches!(
            tokens.next(),
            Some(Ok(Token::ValueBool { value: true, .. }))
        ))
    }

    #[test]
    fn skip_scalar() {
        let mut tokens = json_token_iter(b"null true");
        skip_value(&mut tokens).unwrap();
        next_is_true(&mut tokens);
    }

    #[test]
    fn skip_containers() {
        let mut tokens = json_token_iter(b"[1, 2, {\"a\": []}] true");
        skip_value(&mut tokens).unwrap();
        next_is_true(&mut tokens);

        let mut tokens = json_token_iter(
            br#"{"trail": {"name": "t", "tags": [{"k": "v"}, []]}, "x": [[[]]]} true"#,
        );
        skip_value(&mut tokens).unwrap();
        next_is_true(&mut tokens);
    }

    #[test]
    fn skip_reports_truncation() {
        let err = skip_value(&mut json_token_iter(br#"{"a": [1, 2"#)).unwrap_err();
        assert!(err.is_unexpected_end(), "{}", err);
    }

    #[test]
    fn skip_rejects_a_closing_token() {
        let mut tokens = json_token_iter(br#"{"a": 1}"#);
        tokens.next();
        tokens.next();
        tokens.next();
        assert_eq!(
            Err(SyntaxError::at(
                7,
                SyntaxErrorKind::UnexpectedToken {
                    found: "end of object",
                    expected: "value"
                }
            )),
            skip_value(&mut tokens)
        );
    }

    #[test]
    fn mismatched_braces_are_caught_by_the_tokenizer() {
        assert_eq!(
            Err(SyntaxError::at(
                10,
                SyntaxErrorKind::UnexpectedByte {
                    found: ']',
                    expected: "'}' or ','"
                }
            )),
            skip_value(&mut json_token_iter(br#"[{"foo": 5]}"#))
        );
        assert_eq!(
            Err(SyntaxError::at(
                4,
                SyntaxErrorKind::UnexpectedByte {
                    found: '}',
                    expected: "']' or ','"
                }
            )),
            skip_value(&mut json_token_iter(br#"[5,6}"#))
        );
    }

    #[test]
    fn expect_start() {
        assert_eq!(
            Err(SyntaxError::at(
                2,
                SyntaxErrorKind::UnexpectedToken {
                    found: "boolean",
                    expected: "start of object"
                }
            )),
            expect_start_object(value_bool(2, true))
        );
        assert_eq!(Ok(()), expect_start_object(start_object(0)));
        assert_eq!(
            Err(SyntaxError::end_of_input()),
            expect_start_object(None)
        );
    }

    #[test]
    fn expect_string() {
        assert_eq!(Ok(None), expect_string_or_null(value_null(0)));
        assert_eq!(
            Ok(Some("tab\t".to_string())),
            expect_string_or_null(value_string(0, "tab\\t"))
        );
        assert_eq!(
            Err(SyntaxError::at(
                4,
                SyntaxErrorKind::UnexpectedToken {
                    found: "number",
                    expected: "string or null"
                }
            )),
            expect_string_or_null(value_number(4, Number::PosInt(5), "5"))
        );
        let err = expect_string_or_null(value_string(9, "\\q")).unwrap_err();
        assert!(matches!(err.kind(), SyntaxErrorKind::InvalidEscape(_)));
        assert_eq!(Some(9), err.offset());
    }
}
