/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::deserialize::{SyntaxError, Token};
use aws_transform_schema::FieldPath;
use aws_transform_types::base64::DecodeError;
use aws_transform_types::instant::InstantParseError;
use std::error::Error as StdError;
use std::fmt;

/// Reason a response payload could not be decoded.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodingErrorKind {
    /// The payload is not well-formed JSON.
    Syntax(SyntaxError),
    /// A value had a different JSON type than its binding requires.
    UnexpectedToken {
        /// Path of the offending value.
        path: String,
        /// Kind the binding expects.
        expected: &'static str,
        /// Token that was found instead.
        found: &'static str,
        /// Byte offset of the token.
        offset: usize,
    },
    /// The stream ended before every open object and array was closed.
    Truncated,
    /// A closing token arrived with nothing open.
    UnbalancedClose {
        /// Byte offset of the token.
        offset: usize,
    },
    /// Tokens followed the end of the top-level value.
    TrailingTokens {
        /// Byte offset of the first extra token.
        offset: usize,
    },
    /// A blob was not valid base64.
    InvalidBase64 {
        /// Path of the offending value.
        path: String,
        /// Underlying failure.
        source: DecodeError,
    },
    /// A timestamp could not be parsed in its binding's format.
    InvalidTimestamp {
        /// Path of the offending value.
        path: String,
        /// Underlying failure.
        source: InstantParseError,
    },
    /// A number doesn't fit the width its binding declares.
    NumberOutOfRange {
        /// Path of the offending value.
        path: String,
        /// Kind the binding expects.
        expected: &'static str,
    },
    /// Objects and arrays nest deeper than [`MAX_NESTING_DEPTH`](aws_transform_schema::MAX_NESTING_DEPTH).
    NestingTooDeep {
        /// Byte offset of the opening token that crossed the limit.
        offset: usize,
    },
}

/// A response payload could not be decoded.
///
/// Decoding never returns a partially populated value: any of these errors discards everything
/// read so far.
#[derive(Debug)]
pub struct DecodingError {
    kind: DecodingErrorKind,
}

impl DecodingError {
    /// Creates an error from its kind.
    pub fn new(kind: DecodingErrorKind) -> Self {
        Self { kind }
    }

    /// The reason for the failure.
    pub fn kind(&self) -> &DecodingErrorKind {
        &self.kind
    }

    /// True if the payload ended early.
    pub fn is_truncated(&self) -> bool {
        match &self.kind {
            DecodingErrorKind::Truncated => true,
            DecodingErrorKind::Syntax(err) => err.is_unexpected_end(),
            _ => false,
        }
    }

    pub(crate) fn truncated() -> Self {
        Self::new(DecodingErrorKind::Truncated)
    }

    pub(crate) fn unexpected_token(
        path: &FieldPath<'_>,
        expected: &'static str,
        token: &Token<'_>,
    ) -> Self {
        Self::new(DecodingErrorKind::UnexpectedToken {
            path: path.to_string(),
            expected,
            found: token.describe(),
            offset: token.offset().0,
        })
    }

    pub(crate) fn unbalanced_close(token: &Token<'_>) -> Self {
        Self::new(DecodingErrorKind::UnbalancedClose {
            offset: token.offset().0,
        })
    }

    pub(crate) fn trailing_tokens(token: &Token<'_>) -> Self {
        Self::new(DecodingErrorKind::TrailingTokens {
            offset: token.offset().0,
        })
    }

    pub(crate) fn invalid_base64(path: &FieldPath<'_>, source: DecodeError) -> Self {
        Self::new(DecodingErrorKind::InvalidBase64 {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) fn invalid_timestamp(path: &FieldPath<'_>, source: InstantParseError) -> Self {
        Self::new(DecodingErrorKind::InvalidTimestamp {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) fn number_out_of_range(path: &FieldPath<'_>, expected: &'static str) -> Self {
        Self::new(DecodingErrorKind::NumberOutOfRange {
            path: path.to_string(),
            expected,
        })
    }

    pub(crate) fn nesting_too_deep(token: &Token<'_>) -> Self {
        Self::new(DecodingErrorKind::NestingTooDeep {
            offset: token.offset().0,
        })
    }
}

impl From<SyntaxError> for DecodingError {
    fn from(err: SyntaxError) -> Self {
        Self::new(DecodingErrorKind::Syntax(err))
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DecodingErrorKind::*;
        match &self.kind {
            Syntax(err) => match err.offset() {
                Some(offset) => write!(f, "response is not valid JSON at offset {offset}"),
                None => write!(f, "response is not valid JSON"),
            },
            UnexpectedToken {
                path,
                expected,
                found,
                offset,
            } => write!(
                f,
                "expected {expected} for `{path}` but found {found} at offset {offset}"
            ),
            Truncated => write!(f, "response ended before the document was complete"),
            UnbalancedClose { offset } => {
                write!(f, "closing token at offset {offset} has no matching opening token")
            }
            TrailingTokens { offset } => {
                write!(f, "unexpected data after the document at offset {offset}")
            }
            InvalidBase64 { path, .. } => write!(f, "blob `{path}` is not valid base64"),
            InvalidTimestamp { path, .. } => write!(f, "timestamp `{path}` could not be parsed"),
            NumberOutOfRange { path, expected } => {
                write!(f, "number `{path}` does not fit in a {expected}")
            }
            NestingTooDeep { offset } => {
                write!(f, "document nests too deeply at offset {offset}")
            }
        }
    }
}

impl StdError for DecodingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        use DecodingErrorKind::*;
        match &self.kind {
            Syntax(source) => Some(source),
            InvalidBase64 { source, .. } => Some(source),
            InvalidTimestamp { source, .. } => Some(source),
            UnexpectedToken { .. }
            | Truncated
            | UnbalancedClose { .. }
            | TrailingTokens { .. }
            | NumberOutOfRange { .. }
            | NestingTooDeep { .. } => None,
        }
    }
}
