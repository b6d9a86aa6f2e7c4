/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Schema-driven AWS Query encoder.

use crate::writer::{QueryParams, QueryValueWriter, QueryWriter};
use aws_transform_schema::{
    EncodingError, FieldKind, FieldPath, OperationSchema, ScalarType, StructSchema,
    TimestampFormat, MAX_NESTING_DEPTH,
};
use aws_transform_types::{base64, Number, RequestValue, Struct, Value};
use tracing::trace;

/// Flattens a [`RequestValue`] into query parameters by following a [`StructSchema`].
///
/// Members are written in schema order. Lists are written as `Foo.1`, `Foo.2`, ... (or
/// `Foo.member.1` when the binding names a member, and `Foo.member.1.member.1` for a list of
/// lists), maps as `Foo.entry.N.key` / `Foo.entry.N.value` and nested structures as
/// `Foo.Child`.
///
/// ```
/// use aws_transform_query::QueryEncoder;
/// use aws_transform_schema::{FieldBinding, FieldKind, StructSchema};
/// use aws_transform_types::{Struct, Value};
///
/// let schema = StructSchema::builder("SetQueueAttributesRequest")
///     .member(FieldBinding::new("QueueUrl", FieldKind::string()).required())
///     .member(
///         FieldBinding::new("attributes", FieldKind::map_of(FieldKind::string()))
///             .with_wire_name("Attribute"),
///     )
///     .build()
///     .unwrap();
/// let input = Struct::new()
///     .with("QueueUrl", "https://queue")
///     .with("attributes", Value::map([("DelaySeconds", "5")]));
///
/// let params = QueryEncoder::default().encode(&schema, &input).unwrap();
/// assert_eq!(
///     vec![
///         ("QueueUrl", "https://queue"),
///         ("Attribute.entry.1.key", "DelaySeconds"),
///         ("Attribute.entry.1.value", "5"),
///     ],
///     params.iter().collect::<Vec<_>>()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryEncoder {
    default_timestamp_format: TimestampFormat,
}

impl Default for QueryEncoder {
    fn default() -> Self {
        Self {
            default_timestamp_format: TimestampFormat::DateTime,
        }
    }
}

impl QueryEncoder {
    /// Creates an encoder that writes untagged timestamps in `default_timestamp_format`.
    pub fn new(default_timestamp_format: TimestampFormat) -> Self {
        Self {
            default_timestamp_format,
        }
    }

    /// Encodes the members of `value`.
    pub fn encode(
        &self,
        schema: &StructSchema,
        value: &RequestValue,
    ) -> Result<QueryParams, EncodingError> {
        let mut params = QueryParams::new();
        self.write_struct(
            &mut QueryValueWriter::root(&mut params),
            schema,
            value,
            &FieldPath::root(),
        )?;
        Ok(params)
    }

    /// Encodes a full call to `operation`: `Action` and `Version` followed by the members of
    /// `value`.
    pub fn encode_operation(
        &self,
        operation: &OperationSchema,
        value: &RequestValue,
    ) -> Result<QueryParams, EncodingError> {
        let version = operation.api_version().ok_or_else(|| {
            EncodingError::custom(format!(
                "operation `{}` has no API version",
                operation.name()
            ))
        })?;
        let mut params = QueryParams::new();
        let mut writer = QueryWriter::new(&mut params, operation.name(), version);
        self.write_struct(
            &mut writer.members(),
            operation.input(),
            value,
            &FieldPath::root(),
        )?;
        writer.finish();
        Ok(params)
    }

    fn write_struct(
        &self,
        writer: &mut QueryValueWriter<'_>,
        schema: &StructSchema,
        value: &Struct,
        path: &FieldPath<'_>,
    ) -> Result<(), EncodingError> {
        for binding in schema.members() {
            let field_path = path.field(binding.name());
            match value.get(binding.name()) {
                Some(member) => self.write_value(
                    writer.prefix(binding.wire_name()),
                    binding.kind(),
                    binding.query_member_name(),
                    member,
                    &field_path,
                )?,
                None if binding.is_required() => {
                    return Err(EncodingError::missing_required_field(&field_path))
                }
                None => {}
            }
        }
        Ok(())
    }

    fn write_value(
        &self,
        writer: QueryValueWriter<'_>,
        kind: &FieldKind,
        member_name: Option<&str>,
        value: &Value,
        path: &FieldPath<'_>,
    ) -> Result<(), EncodingError> {
        let mismatch = || EncodingError::type_mismatch(path, kind.name(), value.kind_name());
        match (kind, value) {
            (FieldKind::Scalar(ScalarType::String), Value::String(value)) => writer.string(value),
            (FieldKind::Scalar(ScalarType::Boolean), Value::Bool(value)) => writer.boolean(*value),
            (FieldKind::Scalar(ScalarType::Integer), Value::Number(number)) => {
                let number = number.as_i32().ok_or_else(mismatch)?;
                writer.number(number.into())
            }
            (FieldKind::Scalar(ScalarType::Long), Value::Number(number)) => {
                let number = number.as_i64().ok_or_else(mismatch)?;
                writer.number(number.into())
            }
            (FieldKind::Scalar(ScalarType::Float | ScalarType::Double), Value::Number(number)) => {
                if !number.is_finite() {
                    return Err(EncodingError::non_finite_number(path));
                }
                writer.number(Number::Float(number.to_f64_lossy()))
            }
            (FieldKind::Blob, Value::Blob(blob)) => writer.string(&base64::encode(blob)),
            (FieldKind::Timestamp(format), Value::Timestamp(instant)) => {
                let format = format.unwrap_or(self.default_timestamp_format);
                writer
                    .instant(instant, format)
                    .map_err(|err| EncodingError::invalid_timestamp(path, err))?
            }
            (FieldKind::List(_), Value::List(items)) if items.is_empty() => {
                trace!(field = %path, "omitting empty list");
            }
            (FieldKind::List(member), Value::List(items)) => {
                check_depth(path)?;
                let mut list = writer.start_list(member_name);
                for (index, item) in items.iter().enumerate() {
                    // directly nested lists share the binding's member name
                    let item_path = path.index(index);
                    self.write_value(list.entry(), member, member_name, item, &item_path)?;
                }
                list.finish()
            }
            (FieldKind::Map(_), Value::Map(entries)) if entries.is_empty() => {
                trace!(field = %path, "omitting empty map");
            }
            (FieldKind::Map(value_kind), Value::Map(entries)) => {
                check_depth(path)?;
                let mut map = writer.start_map();
                for (key, entry) in entries {
                    self.write_value(map.entry(key), value_kind, None, entry, &path.key(key))?;
                }
                map.finish()
            }
            (FieldKind::Struct(schema), Value::Struct(nested)) => {
                check_depth(path)?;
                let mut writer = writer;
                self.write_struct(&mut writer, schema, nested, path)?;
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

fn check_depth(path: &FieldPath<'_>) -> Result<(), EncodingError> {
    if path.depth() >= MAX_NESTING_DEPTH {
        return Err(EncodingError::nesting_too_deep(path));
    }
    Ok(())
}
