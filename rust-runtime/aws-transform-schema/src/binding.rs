/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{StructSchema, TimestampFormat};
use std::sync::Arc;

/// Scalar types that are written as a single wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `true` / `false`
    Boolean,
    /// UTF-8 string
    String,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl ScalarType {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Long => "long",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        }
    }
}

/// Shape of the value bound to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A single scalar.
    Scalar(ScalarType),
    /// Binary data, base64 encoded on the wire.
    Blob,
    /// A timestamp. `None` uses the protocol's default format.
    Timestamp(Option<TimestampFormat>),
    /// An ordered list whose elements all have the given kind.
    List(Box<FieldKind>),
    /// A string-keyed map whose values all have the given kind.
    Map(Box<FieldKind>),
    /// A nested structure described by its own schema.
    Struct(Arc<StructSchema>),
}

impl FieldKind {
    /// `FieldKind::Scalar(ScalarType::String)`
    pub fn string() -> Self {
        FieldKind::Scalar(ScalarType::String)
    }

    /// `FieldKind::Scalar(ScalarType::Boolean)`
    pub fn boolean() -> Self {
        FieldKind::Scalar(ScalarType::Boolean)
    }

    /// `FieldKind::Scalar(ScalarType::Integer)`
    pub fn integer() -> Self {
        FieldKind::Scalar(ScalarType::Integer)
    }

    /// `FieldKind::Scalar(ScalarType::Long)`
    pub fn long() -> Self {
        FieldKind::Scalar(ScalarType::Long)
    }

    /// `FieldKind::Scalar(ScalarType::Float)`
    pub fn float() -> Self {
        FieldKind::Scalar(ScalarType::Float)
    }

    /// `FieldKind::Scalar(ScalarType::Double)`
    pub fn double() -> Self {
        FieldKind::Scalar(ScalarType::Double)
    }

    /// A timestamp written in `format` regardless of the protocol default.
    pub fn timestamp(format: TimestampFormat) -> Self {
        FieldKind::Timestamp(Some(format))
    }

    /// A list of `member`.
    pub fn list_of(member: FieldKind) -> Self {
        FieldKind::List(Box::new(member))
    }

    /// A map from strings to `value`.
    pub fn map_of(value: FieldKind) -> Self {
        FieldKind::Map(Box::new(value))
    }

    /// A nested structure.
    pub fn structure(schema: impl Into<Arc<StructSchema>>) -> Self {
        FieldKind::Struct(schema.into())
    }

    /// Name of the kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Scalar(scalar) => scalar.name(),
            FieldKind::Blob => "blob",
            FieldKind::Timestamp(_) => "timestamp",
            FieldKind::List(_) => "list",
            FieldKind::Map(_) => "map",
            FieldKind::Struct(_) => "structure",
        }
    }
}

/// Binds a logical field to its wire representation.
///
/// ```
/// use aws_transform_schema::{FieldBinding, FieldKind};
///
/// let binding = FieldBinding::new("tag_keys", FieldKind::list_of(FieldKind::string()))
///     .with_wire_name("TagKeys")
///     .required();
/// assert_eq!(binding.name(), "tag_keys");
/// assert_eq!(binding.wire_name(), "TagKeys");
/// assert!(binding.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    name: String,
    wire_name: String,
    kind: FieldKind,
    required: bool,
    member_name: Option<String>,
}

impl FieldBinding {
    /// Creates an optional binding whose wire name equals its logical `name`.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        FieldBinding {
            wire_name: name.clone(),
            name,
            kind,
            required: false,
            member_name: None,
        }
    }

    /// Overrides the name used on the wire.
    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    /// Marks the field as required. Encoding fails if it is absent.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Query protocol only: inserts `member_name` between a list's wire name and the element
    /// index, producing `Foo.member.1` instead of `Foo.1`. Lists nested directly in the list use
    /// it too (`Foo.member.1.member.1`).
    pub fn member_name(mut self, member_name: impl Into<String>) -> Self {
        self.member_name = Some(member_name.into());
        self
    }

    /// Logical (programmatic) field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field identifier used in the transmitted protocol.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// Kind of value bound to this field.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether encoding requires this field to be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Query list member name, if one was configured.
    pub fn query_member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }
}
