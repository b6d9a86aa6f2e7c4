/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::escape::EscapeError;
use std::fmt;

/// What made a response body unreadable as JSON.
#[non_exhaustive]
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum SyntaxErrorKind {
    /// The body ended inside a value, or before the value a caller asked for.
    UnexpectedEnd,
    /// A byte that cannot appear at this position.
    UnexpectedByte {
        /// The offending byte, as a character.
        found: char,
        /// What the grammar allows here.
        expected: &'static str,
    },
    /// A well-formed token where the reader needed a different one.
    UnexpectedToken {
        /// Short description of the token that was read.
        found: &'static str,
        /// What the reader needed.
        expected: &'static str,
    },
    /// A misspelled `null`, `true` or `false`.
    InvalidLiteral {
        /// The literal the first byte promised.
        expected: &'static str,
    },
    /// A number that does not follow the JSON grammar or does not fit in an `f64`.
    InvalidNumber,
    /// A string that is not valid UTF-8.
    InvalidUtf8,
    /// A raw control character inside a string.
    ControlCharacter(u8),
    /// An escape sequence that could not be decoded.
    InvalidEscape(EscapeError),
}

/// A response body that is not well-formed JSON, with the byte offset it went wrong at.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    offset: Option<usize>,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, offset: Option<usize>) -> Self {
        Self { kind, offset }
    }

    pub(crate) fn at(offset: usize, kind: SyntaxErrorKind) -> Self {
        Self::new(kind, Some(offset))
    }

    pub(crate) fn invalid_escape(offset: usize, err: EscapeError) -> Self {
        Self::at(offset, SyntaxErrorKind::InvalidEscape(err))
    }

    /// The token stream ran out before a value the caller needed.
    pub(crate) fn end_of_input() -> Self {
        Self::new(SyntaxErrorKind::UnexpectedEnd, None)
    }

    /// Returns the kind of problem.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Byte offset into the body at which the problem was found, if known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// True if the body ended in the middle of a value.
    pub fn is_unexpected_end(&self) -> bool {
        matches!(self.kind, SyntaxErrorKind::UnexpectedEnd)
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            SyntaxErrorKind::InvalidEscape(source) => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SyntaxErrorKind::*;
        match &self.kind {
            UnexpectedEnd => write!(f, "JSON body ended unexpectedly")?,
            UnexpectedByte { found, expected } => {
                write!(f, "found {found:?} where {expected} was expected")?
            }
            UnexpectedToken { found, expected } => {
                write!(f, "found {found} where {expected} was expected")?
            }
            InvalidLiteral { expected } => write!(f, "misspelled `{expected}`")?,
            InvalidNumber => write!(f, "malformed number")?,
            InvalidUtf8 => write!(f, "string is not valid UTF-8")?,
            ControlCharacter(byte) => {
                write!(f, "unescaped control character 0x{byte:02X} in string")?
            }
            InvalidEscape(_) => write!(f, "invalid escape sequence in string")?,
        }
        if let Some(offset) = self.offset {
            write!(f, " (byte {offset})")?;
        }
        Ok(())
    }
}

impl From<EscapeError> for SyntaxError {
    fn from(err: EscapeError) -> Self {
        Self::new(SyntaxErrorKind::InvalidEscape(err), None)
    }
}
