/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors produced while building schemas or encoding requests against them.

use crate::FieldPath;
use aws_transform_types::instant::ConversionError;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Reason an encoder rejected a request value.
#[derive(Debug)]
#[non_exhaustive]
pub enum EncodingErrorKind {
    /// A field bound as required was not set.
    MissingRequiredField {
        /// Path of the missing field.
        path: String,
    },
    /// The value set for a field doesn't match the kind it is bound to.
    TypeMismatch {
        /// Path of the offending value.
        path: String,
        /// Kind the binding expects.
        expected: &'static str,
        /// Kind that was found.
        found: &'static str,
    },
    /// A float was `NaN` or infinite. Neither protocol can represent those.
    NonFiniteNumber {
        /// Path of the offending value.
        path: String,
    },
    /// The value nests deeper than [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
    NestingTooDeep {
        /// Path at which the limit was hit.
        path: String,
    },
    /// A timestamp could not be written in the format its binding asks for.
    InvalidTimestamp {
        /// Path of the offending value.
        path: String,
        /// Underlying conversion failure.
        source: ConversionError,
    },
    /// Any other failure.
    Custom(Cow<'static, str>),
}

/// A request value could not be encoded.
#[derive(Debug)]
pub struct EncodingError {
    kind: EncodingErrorKind,
}

impl EncodingError {
    /// Creates an error from its kind.
    pub fn new(kind: EncodingErrorKind) -> Self {
        Self { kind }
    }

    /// A required field at `path` was absent.
    pub fn missing_required_field(path: &FieldPath<'_>) -> Self {
        Self::new(EncodingErrorKind::MissingRequiredField {
            path: path.to_string(),
        })
    }

    /// The value at `path` was a `found` where an `expected` is bound.
    pub fn type_mismatch(path: &FieldPath<'_>, expected: &'static str, found: &'static str) -> Self {
        Self::new(EncodingErrorKind::TypeMismatch {
            path: path.to_string(),
            expected,
            found,
        })
    }

    /// The float at `path` was `NaN` or infinite.
    pub fn non_finite_number(path: &FieldPath<'_>) -> Self {
        Self::new(EncodingErrorKind::NonFiniteNumber {
            path: path.to_string(),
        })
    }

    /// The nesting limit was reached at `path`.
    pub fn nesting_too_deep(path: &FieldPath<'_>) -> Self {
        Self::new(EncodingErrorKind::NestingTooDeep {
            path: path.to_string(),
        })
    }

    /// The timestamp at `path` couldn't be formatted.
    pub fn invalid_timestamp(path: &FieldPath<'_>, source: ConversionError) -> Self {
        Self::new(EncodingErrorKind::InvalidTimestamp {
            path: path.to_string(),
            source,
        })
    }

    /// Returns a custom error.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(EncodingErrorKind::Custom(message.into()))
    }

    /// The reason for the failure.
    pub fn kind(&self) -> &EncodingErrorKind {
        &self.kind
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EncodingErrorKind::*;
        match &self.kind {
            MissingRequiredField { path } => write!(f, "required field `{path}` is not set"),
            TypeMismatch {
                path,
                expected,
                found,
            } => write!(f, "field `{path}` expects {expected} but was given {found}"),
            NonFiniteNumber { path } => {
                write!(f, "field `{path}` is not a finite number")
            }
            NestingTooDeep { path } => write!(f, "value at `{path}` is nested too deeply"),
            InvalidTimestamp { path, .. } => {
                write!(f, "timestamp at `{path}` cannot be represented")
            }
            Custom(message) => write!(f, "failed to encode request: {message}"),
        }
    }
}

impl StdError for EncodingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            EncodingErrorKind::InvalidTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
enum SchemaErrorKind {
    DuplicateWireName { shape: String, wire_name: String },
    DuplicateFieldName { shape: String, name: String },
    DuplicateOperation { name: String },
    MissingProtocol { operation: String },
    MissingApiVersion { operation: String },
    MissingTargetPrefix { operation: String },
}

/// A schema was rejected while being built.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct SchemaError {
    kind: SchemaErrorKind,
}

impl SchemaError {
    pub(crate) fn duplicate_wire_name(shape: &str, wire_name: &str) -> Self {
        Self {
            kind: SchemaErrorKind::DuplicateWireName {
                shape: shape.into(),
                wire_name: wire_name.into(),
            },
        }
    }

    pub(crate) fn duplicate_field_name(shape: &str, name: &str) -> Self {
        Self {
            kind: SchemaErrorKind::DuplicateFieldName {
                shape: shape.into(),
                name: name.into(),
            },
        }
    }

    pub(crate) fn duplicate_operation(name: &str) -> Self {
        Self {
            kind: SchemaErrorKind::DuplicateOperation { name: name.into() },
        }
    }

    pub(crate) fn missing_protocol(operation: &str) -> Self {
        Self {
            kind: SchemaErrorKind::MissingProtocol {
                operation: operation.into(),
            },
        }
    }

    pub(crate) fn missing_api_version(operation: &str) -> Self {
        Self {
            kind: SchemaErrorKind::MissingApiVersion {
                operation: operation.into(),
            },
        }
    }

    pub(crate) fn missing_target_prefix(operation: &str) -> Self {
        Self {
            kind: SchemaErrorKind::MissingTargetPrefix {
                operation: operation.into(),
            },
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SchemaErrorKind::*;
        match &self.kind {
            DuplicateWireName { shape, wire_name } => {
                write!(f, "`{shape}` binds wire name `{wire_name}` more than once")
            }
            DuplicateFieldName { shape, name } => {
                write!(f, "`{shape}` declares field `{name}` more than once")
            }
            DuplicateOperation { name } => write!(f, "operation `{name}` registered twice"),
            MissingProtocol { operation } => {
                write!(f, "operation `{operation}` has no protocol")
            }
            MissingApiVersion { operation } => write!(
                f,
                "query operation `{operation}` has no API version to send as `Version`"
            ),
            MissingTargetPrefix { operation } => write!(
                f,
                "JSON operation `{operation}` has no target prefix for `X-Amz-Target`"
            ),
        }
    }
}

impl StdError for SchemaError {}

#[cfg(test)]
mod test {
    use super::{EncodingError, EncodingErrorKind};
    use crate::FieldPath;
    use std::error::Error;

    #[test]
    fn display_includes_path() {
        let root = FieldPath::root();
        let tags = root.field("Tags");
        let first = tags.index(0);
        let key = first.field("Key");
        let err = EncodingError::missing_required_field(&key);
        assert_eq!(err.to_string(), "required field `Tags[0].Key` is not set");
        assert!(matches!(
            err.kind(),
            EncodingErrorKind::MissingRequiredField { path } if path == "Tags[0].Key"
        ));
        assert!(err.source().is_none());
    }

    #[test]
    fn type_mismatch() {
        let root = FieldPath::root();
        let err = EncodingError::type_mismatch(&root.field("Limit"), "integer", "string");
        assert_eq!(
            err.to_string(),
            "field `Limit` expects integer but was given string"
        );
    }
}
