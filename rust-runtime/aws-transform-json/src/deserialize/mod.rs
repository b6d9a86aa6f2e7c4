/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Forward-only JSON tokenizer.
//!
//! [`json_token_iter`] walks a byte slice and yields [`Token`]s without ever materializing a
//! document tree. Strings are handed out still escaped and borrowed from the input; callers
//! unescape only the ones they keep.

use crate::deserialize::error::SyntaxErrorKind as ErrorKind;
use aws_transform_types::Number;

mod error;
pub mod token;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use token::{EscapedStr, Offset, Token};

/// Creates a JSON token iterator over `input`.
///
/// The iterator yields `None` once the input is exhausted, even if containers are still open;
/// it is up to the consumer to notice an unbalanced stream. After the first error, it yields
/// `None`.
pub fn json_token_iter(input: &[u8]) -> JsonTokenIterator<'_> {
    JsonTokenIterator {
        input,
        index: 0,
        state_stack: vec![State::Initial],
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum State {
    Initial,
    ArrayFirstValueOrEnd,
    ArrayNextValueOrEnd,
    ObjectFirstKeyOrEnd,
    ObjectNextKeyOrEnd,
    ObjectFieldValue,
}

/// Iterator over the tokens of a JSON document. Created by [`json_token_iter`].
#[derive(Debug)]
pub struct JsonTokenIterator<'a> {
    input: &'a [u8],
    index: usize,
    state_stack: Vec<State>,
}

impl<'a> JsonTokenIterator<'a> {
    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.index).copied()
    }

    fn peek_expect(&self) -> Result<u8, SyntaxError> {
        self.peek_byte().ok_or_else(|| self.error(ErrorKind::UnexpectedEnd))
    }

    fn advance(&mut self) {
        if self.index < self.input.len() {
            self.index += 1;
        }
    }

    fn next_expect(&mut self) -> Result<u8, SyntaxError> {
        let byte = self.peek_expect()?;
        self.advance();
        Ok(byte)
    }

    fn error_at(&self, offset: usize, kind: ErrorKind) -> SyntaxError {
        SyntaxError::at(offset, kind)
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        self.error_at(self.index, kind)
    }

    fn discard_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek_byte() {
            self.advance();
        }
    }

    fn state(&self) -> State {
        *self
            .state_stack
            .last()
            .expect("the initial state is never popped")
    }

    fn replace_state(&mut self, state: State) {
        self.state_stack.pop();
        self.state_stack.push(state);
    }

    fn offset(&self) -> Offset {
        Offset(self.index)
    }

    fn start_object(&mut self) -> Token<'a> {
        let offset = self.offset();
        self.advance();
        self.state_stack.push(State::ObjectFirstKeyOrEnd);
        Token::StartObject { offset }
    }

    fn end_object(&mut self) -> Token<'a> {
        let offset = self.offset();
        self.advance();
        self.state_stack.pop();
        Token::EndObject { offset }
    }

    fn start_array(&mut self) -> Token<'a> {
        let offset = self.offset();
        self.advance();
        self.state_stack.push(State::ArrayFirstValueOrEnd);
        Token::StartArray { offset }
    }

    fn end_array(&mut self) -> Token<'a> {
        let offset = self.offset();
        self.advance();
        self.state_stack.pop();
        Token::EndArray { offset }
    }

    /// Reads a string starting at the opening quote. The returned value excludes the quotes.
    fn read_string(&mut self) -> Result<&'a str, SyntaxError> {
        debug_assert_eq!(self.peek_byte(), Some(b'"'));
        self.advance();
        let input = self.input;
        let start = self.index;
        loop {
            match self.peek_expect()? {
                b'"' => {
                    let value = std::str::from_utf8(&input[start..self.index])
                        .map_err(|_| self.error_at(start, ErrorKind::InvalidUtf8))?;
                    self.advance();
                    return Ok(value);
                }
                b'\\' => {
                    // the escaped byte is validated when the string is unescaped
                    self.advance();
                    self.next_expect()?;
                }
                byte @ 0x00..=0x1F => {
                    return Err(self.error(ErrorKind::ControlCharacter(byte)))
                }
                _ => self.advance(),
            }
        }
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<(), SyntaxError> {
        let rest = &self.input[self.index..];
        if rest.len() < literal.len() {
            return Err(self.error_at(self.input.len(), ErrorKind::UnexpectedEnd));
        }
        if &rest[..literal.len()] != literal.as_bytes() {
            return Err(self.error(ErrorKind::InvalidLiteral { expected: literal }));
        }
        self.index += literal.len();
        Ok(())
    }

    /// Scans the extent of a number and parses it, returning the parsed value with its text.
    ///
    /// Integers that fit are kept exact; everything else becomes a float.
    fn read_number(&mut self) -> Result<(Number, &'a str), SyntaxError> {
        let start = self.index;
        while let Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9') = self.peek_byte() {
            self.advance();
        }
        let input = self.input;
        let text = &input[start..self.index];
        if !is_valid_number(text) {
            return Err(self.error_at(start, ErrorKind::InvalidNumber));
        }
        // ASCII only by construction
        let text = std::str::from_utf8(text)
            .map_err(|_| self.error_at(start, ErrorKind::InvalidNumber))?;
        let is_integer = !text.contains(['.', 'e', 'E']);
        let parsed = if is_integer && text.starts_with('-') {
            text.parse::<i64>().ok().map(Number::from)
        } else if is_integer {
            text.parse::<u64>().ok().map(Number::PosInt)
        } else {
            None
        };
        let number = match parsed {
            Some(number) => number,
            None => text
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Number::Float)
                .ok_or_else(|| self.error_at(start, ErrorKind::InvalidNumber))?,
        };
        Ok((number, text))
    }

    fn read_value(&mut self) -> Result<Token<'a>, SyntaxError> {
        self.discard_whitespace();
        let offset = self.offset();
        match self.peek_expect()? {
            b'{' => Ok(self.start_object()),
            b'[' => Ok(self.start_array()),
            b'"' => self.read_string().map(|value| Token::ValueString {
                offset,
                value: EscapedStr::new(value),
            }),
            b'n' => self
                .expect_literal("null")
                .map(|_| Token::ValueNull { offset }),
            b't' => self
                .expect_literal("true")
                .map(|_| Token::ValueBool {
                    offset,
                    value: true,
                }),
            b'f' => self
                .expect_literal("false")
                .map(|_| Token::ValueBool {
                    offset,
                    value: false,
                }),
            b'-' | b'0'..=b'9' => self
                .read_number()
                .map(|(value, text)| Token::ValueNumber {
                    offset,
                    value,
                    text,
                }),
            byte => Err(self.error(ErrorKind::UnexpectedByte {
                found: byte.into(),
                expected: "a value",
            })),
        }
    }

    fn state_array_first_value_or_end(&mut self) -> Result<Token<'a>, SyntaxError> {
        match self.peek_expect()? {
            b']' => Ok(self.end_array()),
            _ => {
                self.replace_state(State::ArrayNextValueOrEnd);
                self.read_value()
            }
        }
    }

    fn state_array_next_value_or_end(&mut self) -> Result<Token<'a>, SyntaxError> {
        match self.peek_expect()? {
            b']' => Ok(self.end_array()),
            b',' => {
                self.advance();
                self.read_value()
            }
            byte => Err(self.error(ErrorKind::UnexpectedByte {
                found: byte.into(),
                expected: "']' or ','",
            })),
        }
    }

    fn object_key(&mut self) -> Result<Token<'a>, SyntaxError> {
        let offset = self.offset();
        match self.peek_expect()? {
            b'"' => {
                let key = self.read_string()?;
                self.replace_state(State::ObjectFieldValue);
                Ok(Token::ObjectKey {
                    offset,
                    key: EscapedStr::new(key),
                })
            }
            byte => Err(self.error(ErrorKind::UnexpectedByte {
                found: byte.into(),
                expected: "an object key",
            })),
        }
    }

    fn state_object_first_key_or_end(&mut self) -> Result<Token<'a>, SyntaxError> {
        match self.peek_expect()? {
            b'}' => Ok(self.end_object()),
            _ => self.object_key(),
        }
    }

    fn state_object_next_key_or_end(&mut self) -> Result<Token<'a>, SyntaxError> {
        match self.peek_expect()? {
            b'}' => Ok(self.end_object()),
            b',' => {
                self.advance();
                self.discard_whitespace();
                self.object_key()
            }
            byte => Err(self.error(ErrorKind::UnexpectedByte {
                found: byte.into(),
                expected: "'}' or ','",
            })),
        }
    }

    fn state_object_field_value(&mut self) -> Result<Token<'a>, SyntaxError> {
        match self.next_expect()? {
            b':' => {
                self.replace_state(State::ObjectNextKeyOrEnd);
                self.read_value()
            }
            byte => Err(self.error_at(
                self.index - 1,
                ErrorKind::UnexpectedByte {
                    found: byte.into(),
                    expected: "':'",
                },
            )),
        }
    }
}

impl<'a> Iterator for JsonTokenIterator<'a> {
    type Item = Result<Token<'a>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        debug_assert!(self.index <= self.input.len());
        self.discard_whitespace();
        if self.index == self.input.len() {
            return None;
        }

        let result = match self.state() {
            State::Initial => self.read_value(),
            State::ArrayFirstValueOrEnd => self.state_array_first_value_or_end(),
            State::ArrayNextValueOrEnd => self.state_array_next_value_or_end(),
            State::ObjectFirstKeyOrEnd => self.state_object_first_key_or_end(),
            State::ObjectNextKeyOrEnd => self.state_object_next_key_or_end(),
            State::ObjectFieldValue => self.state_object_field_value(),
        };
        if result.is_err() {
            // stop tokenizing after the first error
            self.index = self.input.len();
        }
        Some(result)
    }
}

/// Checks `text` against the JSON number grammar: `-? int frac? exp?`
fn is_valid_number(text: &[u8]) -> bool {
    fn digits(text: &[u8]) -> usize {
        text.iter().take_while(|byte| byte.is_ascii_digit()).count()
    }

    let mut rest = text.strip_prefix(b"-").unwrap_or(text);
    let int = digits(rest);
    if int == 0 || (int > 1 && rest[0] == b'0') {
        return false;
    }
    rest = &rest[int..];
    if let Some(fraction) = rest.strip_prefix(b".") {
        let count = digits(fraction);
        if count == 0 {
            return false;
        }
        rest = &fraction[count..];
    }
    if let Some(exponent) = rest.strip_prefix(b"e").or_else(|| rest.strip_prefix(b"E")) {
        let exponent = exponent
            .strip_prefix(b"+")
            .or_else(|| exponent.strip_prefix(b"-"))
            .unwrap_or(exponent);
        let count = digits(exponent);
        if count == 0 {
            return false;
        }
        rest = &exponent[count..];
    }
    rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::error::SyntaxErrorKind::*;
    use super::token::test::*;
    use super::{json_token_iter, EscapedStr, Offset, SyntaxError, Token};
    use aws_transform_types::Number;
    use proptest::prelude::*;

    fn end_array<'a>(offset: usize) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::EndArray {
            offset: Offset(offset),
        }))
    }

    fn end_object<'a>(offset: usize) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::EndObject {
            offset: Offset(offset),
        }))
    }

    fn object_key<'a>(offset: usize, key: &'a str) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Ok(Token::ObjectKey {
            offset: Offset(offset),
            key: EscapedStr::new(key),
        }))
    }

    fn error<'a>(
        kind: super::error::SyntaxErrorKind,
        offset: usize,
    ) -> Option<Result<Token<'a>, SyntaxError>> {
        Some(Err(SyntaxError::at(offset, kind)))
    }

    #[test]
    fn test_empty() {
        assert!(json_token_iter(b"").next().is_none());
        assert!(json_token_iter(b" \r\n\t ").next().is_none());
    }

    #[test]
    fn test_scalars() {
        assert_eq!(value_null(1), json_token_iter(b" null ").next());
        assert_eq!(value_bool(0, true), json_token_iter(b"true").next());
        assert_eq!(value_bool(0, false), json_token_iter(b"false").next());
        assert_eq!(
            value_number(0, Number::PosInt(5), "5"),
            json_token_iter(b"5").next()
        );
        assert_eq!(
            value_number(0, Number::NegInt(-5), "-5"),
            json_token_iter(b"-5").next()
        );
        assert_eq!(
            value_number(0, Number::PosInt(0), "-0"),
            json_token_iter(b"-0").next()
        );
        assert_eq!(
            value_number(0, Number::Float(1576540098.52), "1576540098.52"),
            json_token_iter(b"1576540098.52").next()
        );
        assert_eq!(
            value_number(0, Number::Float(1.5e10), "1.5E+10"),
            json_token_iter(b"1.5E+10").next()
        );
        assert_eq!(
            value_number(0, Number::Float(18446744073709551616.0), "18446744073709551616"),
            json_token_iter(b"18446744073709551616").next()
        );
        assert_eq!(value_string(0, "test"), json_token_iter(b"\"test\"").next());
        assert_eq!(
            value_string(0, "with \\\"escape\\\""),
            json_token_iter(b"\"with \\\"escape\\\"\"").next()
        );
    }

    #[test]
    fn test_invalid_scalars() {
        assert_eq!(error(InvalidNumber, 0), json_token_iter(b"01").next());
        assert_eq!(error(InvalidNumber, 0), json_token_iter(b"1.").next());
        assert_eq!(error(InvalidNumber, 0), json_token_iter(b"-").next());
        assert_eq!(error(InvalidNumber, 0), json_token_iter(b"1e").next());
        assert_eq!(
            error(InvalidLiteral { expected: "true" }, 0),
            json_token_iter(b"trve").next()
        );
        assert_eq!(error(UnexpectedEnd, 3), json_token_iter(b"nul").next());
        assert_eq!(error(UnexpectedEnd, 5), json_token_iter(b"\"test").next());
        assert_eq!(
            error(ControlCharacter(0x0A), 3),
            json_token_iter(b"\"ab\ncd\"").next()
        );
        assert_eq!(
            error(
                UnexpectedByte {
                    found: 'x',
                    expected: "a value"
                },
                0
            ),
            json_token_iter(b"x").next()
        );
    }

    #[test]
    fn test_object_and_array() {
        let mut iter = json_token_iter(br#"{ "Names": ["a", 2], "Empty": {} }"#);
        assert_eq!(start_object(0), iter.next());
        assert_eq!(object_key(2, "Names"), iter.next());
        assert_eq!(start_array(11), iter.next());
        assert_eq!(value_string(12, "a"), iter.next());
        assert_eq!(value_number(17, Number::PosInt(2), "2"), iter.next());
        assert_eq!(end_array(18), iter.next());
        assert_eq!(object_key(21, "Empty"), iter.next());
        assert_eq!(start_object(30), iter.next());
        assert_eq!(end_object(31), iter.next());
        assert_eq!(end_object(33), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn test_truncated_stream_ends_without_closing() {
        let mut iter = json_token_iter(br#"{"a": [1"#);
        assert_eq!(start_object(0), iter.next());
        assert_eq!(object_key(1, "a"), iter.next());
        assert_eq!(start_array(6), iter.next());
        assert_eq!(value_number(7, Number::PosInt(1), "1"), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn test_structural_errors() {
        let mut iter = json_token_iter(br#"{"a" 5}"#);
        assert_eq!(start_object(0), iter.next());
        assert_eq!(object_key(1, "a"), iter.next());
        assert_eq!(
            error(
                UnexpectedByte {
                    found: '5',
                    expected: "':'"
                },
                5
            ),
            iter.next()
        );
        assert_eq!(None, iter.next());

        let mut iter = json_token_iter(b"{5: 1}");
        assert_eq!(start_object(0), iter.next());
        assert_eq!(
            error(
                UnexpectedByte {
                    found: '5',
                    expected: "an object key"
                },
                1
            ),
            iter.next()
        );

        let mut iter = json_token_iter(b"[1, ]");
        assert_eq!(start_array(0), iter.next());
        assert_eq!(value_number(1, Number::PosInt(1), "1"), iter.next());
        assert!(matches!(iter.next(), Some(Err(_))));
    }

    proptest! {
        #[test]
        fn never_panics(input in proptest::collection::vec(any::<u8>(), 0..64)) {
            for token in json_token_iter(&input) {
                let _ = token;
            }
        }

        #[test]
        fn integers_match_serde(value: i64) {
            let text = serde_json::to_string(&value).unwrap();
            let token = json_token_iter(text.as_bytes()).next().unwrap().unwrap();
            prop_assert_eq!(
                token,
                Token::ValueNumber {
                    offset: Offset(0),
                    value: Number::from(value),
                    text: text.as_str(),
                }
            );
        }

        #[test]
        fn strings_match_serde(value in "\\PC*") {
            let text = serde_json::to_string(&value).unwrap();
            match json_token_iter(text.as_bytes()).next().unwrap().unwrap() {
                Token::ValueString { value: escaped, .. } => {
                    prop_assert_eq!(escaped.to_unescaped().unwrap(), value);
                }
                other => panic!("unexpected token {:?}", other),
            }
        }
    }
}
