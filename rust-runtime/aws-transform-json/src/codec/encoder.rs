/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Schema-driven JSON encoder.

use crate::codec::JsonCodecSettings;
use crate::serialize::{JsonObjectWriter, JsonValueWriter};
use aws_transform_schema::{
    EncodingError, FieldKind, FieldPath, ScalarType, StructSchema, MAX_NESTING_DEPTH,
};
use aws_transform_types::{base64, Number, RequestValue, Struct, Value};

/// Writes a [`RequestValue`] as a single JSON object by following a [`StructSchema`].
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    settings: JsonCodecSettings,
}

impl JsonEncoder {
    /// Creates an encoder with the given settings.
    pub fn new(settings: JsonCodecSettings) -> Self {
        Self { settings }
    }

    /// Encodes `value`. Members are written in schema order; absent members are omitted.
    pub fn encode(
        &self,
        schema: &StructSchema,
        value: &RequestValue,
    ) -> Result<Vec<u8>, EncodingError> {
        let mut output = String::new();
        let mut object = JsonObjectWriter::new(&mut output);
        self.write_struct(&mut object, schema, value, &FieldPath::root())?;
        object.finish();
        Ok(output.into_bytes())
    }

    fn write_struct(
        &self,
        object: &mut JsonObjectWriter<'_>,
        schema: &StructSchema,
        value: &Struct,
        path: &FieldPath<'_>,
    ) -> Result<(), EncodingError> {
        for binding in schema.members() {
            let field_path = path.field(binding.name());
            match value.get(binding.name()) {
                Some(member) => self.write_value(
                    object.key(binding.wire_name()),
                    binding.kind(),
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
        writer: JsonValueWriter<'_>,
        kind: &FieldKind,
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
                let format = format.unwrap_or(self.settings.default_timestamp_format);
                writer
                    .instant(instant, format)
                    .map_err(|err| EncodingError::invalid_timestamp(path, err))?
            }
            (FieldKind::List(member), Value::List(items)) => {
                check_depth(path)?;
                let mut array = writer.start_array();
                for (index, item) in items.iter().enumerate() {
                    self.write_value(array.value(), member, item, &path.index(index))?;
                }
                array.finish()
            }
            (FieldKind::Map(value_kind), Value::Map(entries)) => {
                check_depth(path)?;
                let mut object = writer.start_object();
                for (key, entry) in entries {
                    self.write_value(object.key(key), value_kind, entry, &path.key(key))?;
                }
                object.finish()
            }
            (FieldKind::Struct(schema), Value::Struct(nested)) => {
                check_depth(path)?;
                let mut object = writer.start_object();
                self.write_struct(&mut object, schema, nested, path)?;
                object.finish()
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

#[cfg(test)]
mod tests {
    use super::JsonEncoder;
    use crate::codec::JsonCodecSettings;
    use aws_transform_schema::{
        EncodingErrorKind, FieldBinding, FieldKind, StructSchema, TimestampFormat,
    };
    use aws_transform_types::{Blob, Instant, Number, Struct, Value};
    use std::sync::Arc;

    fn encode(schema: &StructSchema, value: &Struct) -> String {
        String::from_utf8(JsonEncoder::default().encode(schema, value).unwrap()).unwrap()
    }

    fn tag_schema() -> Arc<StructSchema> {
        Arc::new(
            StructSchema::builder("Tag")
                .member(FieldBinding::new("key", FieldKind::string()).with_wire_name("Key"))
                .member(FieldBinding::new("value", FieldKind::string()).with_wire_name("Value"))
                .build()
                .unwrap(),
        )
    }

    fn add_tags_schema() -> StructSchema {
        StructSchema::builder("AddTagsToResourceRequest")
            .member(
                FieldBinding::new("resource_arn", FieldKind::string())
                    .with_wire_name("ResourceArn")
                    .required(),
            )
            .member(
                FieldBinding::new("tags", FieldKind::list_of(FieldKind::structure(tag_schema())))
                    .with_wire_name("Tags")
                    .required(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn schema_order_and_wire_names() {
        let value = Struct::new()
            .with(
                "tags",
                Value::list([
                    Struct::new().with("value", "prod").with("key", "env"),
                    Struct::new().with("key", "team"),
                ]),
            )
            .with("resource_arn", "arn:aws:dms:us-east-1:123:rep:ABC")
            .with("not_in_schema", true);
        assert_eq!(
            r#"{"ResourceArn":"arn:aws:dms:us-east-1:123:rep:ABC","Tags":[{"Key":"env","Value":"prod"},{"Key":"team"}]}"#,
            encode(&add_tags_schema(), &value)
        );
    }

    #[test]
    fn missing_required_field() {
        let value = Struct::new().with("tags", Value::List(vec![]));
        let err = JsonEncoder::default()
            .encode(&add_tags_schema(), &value)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            EncodingErrorKind::MissingRequiredField { path } if path == "resource_arn"
        ));
    }

    #[test]
    fn required_in_nested_structure() {
        let tag = Arc::new(
            StructSchema::builder("Tag")
                .member(FieldBinding::new("Key", FieldKind::string()).required())
                .build()
                .unwrap(),
        );
        let schema = StructSchema::builder("Request")
            .member(FieldBinding::new(
                "Tags",
                FieldKind::list_of(FieldKind::structure(tag)),
            ))
            .build()
            .unwrap();
        let value = Struct::new().with(
            "Tags",
            Value::list([Struct::new().with("Key", "a"), Struct::new()]),
        );
        let err = JsonEncoder::default().encode(&schema, &value).unwrap_err();
        assert_eq!("required field `Tags[1].Key` is not set", err.to_string());
    }

    #[test]
    fn scalars_blobs_and_timestamps() {
        let schema = StructSchema::builder("Everything")
            .member(FieldBinding::new("Limit", FieldKind::integer()))
            .member(FieldBinding::new("Size", FieldKind::long()))
            .member(FieldBinding::new("Ratio", FieldKind::double()))
            .member(FieldBinding::new("Enabled", FieldKind::boolean()))
            .member(FieldBinding::new("Data", FieldKind::Blob))
            .member(FieldBinding::new("Start", FieldKind::Timestamp(None)))
            .member(FieldBinding::new(
                "End",
                FieldKind::timestamp(TimestampFormat::DateTime),
            ))
            .member(FieldBinding::new(
                "Created",
                FieldKind::timestamp(TimestampFormat::EpochMillis),
            ))
            .member(FieldBinding::new(
                "Attributes",
                FieldKind::map_of(FieldKind::string()),
            ))
            .build()
            .unwrap();
        let instant = Instant::from_secs_and_nanos(1576540098, 520_000_000);
        let value = Struct::new()
            .with("Limit", -5)
            .with("Size", Number::PosInt(1 << 40))
            .with("Ratio", 2)
            .with("Enabled", false)
            .with("Data", Blob::new("hello"))
            .with("Start", instant)
            .with("End", instant)
            .with("Created", instant)
            .with("Attributes", Value::map([("b", "2"), ("a", "1")]));
        assert_eq!(
            r#"{"Limit":-5,"Size":1099511627776,"Ratio":2.0,"Enabled":false,"Data":"aGVsbG8=","Start":1576540098.52,"End":"2019-12-16T23:48:18.52Z","Created":1576540098520,"Attributes":{"b":"2","a":"1"}}"#,
            encode(&schema, &value)
        );

        let iso = JsonEncoder::new(JsonCodecSettings {
            default_timestamp_format: TimestampFormat::DateTime,
        });
        let start_only = Struct::new().with("Start", Instant::from_secs(0));
        assert_eq!(
            br#"{"Start":"1970-01-01T00:00:00Z"}"#.to_vec(),
            iso.encode(&schema, &start_only).unwrap()
        );
    }

    #[test]
    fn unencodable_values() {
        let schema = StructSchema::builder("Request")
            .member(FieldBinding::new("Ratio", FieldKind::double()))
            .member(FieldBinding::new("Limit", FieldKind::integer()))
            .build()
            .unwrap();
        let encoder = JsonEncoder::default();

        let err = encoder
            .encode(&schema, &Struct::new().with("Ratio", f64::NAN))
            .unwrap_err();
        assert!(matches!(err.kind(), EncodingErrorKind::NonFiniteNumber { .. }));

        let err = encoder
            .encode(&schema, &Struct::new().with("Ratio", f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err.kind(), EncodingErrorKind::NonFiniteNumber { .. }));

        let err = encoder
            .encode(&schema, &Struct::new().with("Limit", "ten"))
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            EncodingErrorKind::TypeMismatch { expected: "integer", found: "string", .. }
        ));

        let err = encoder
            .encode(&schema, &Struct::new().with("Limit", 1i64 << 40))
            .unwrap_err();
        assert!(matches!(err.kind(), EncodingErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn nesting_limit() {
        let mut kind = FieldKind::string();
        let mut value = Value::from("leaf");
        for _ in 0..70 {
            kind = FieldKind::list_of(kind);
            value = Value::List(vec![value]);
        }
        let schema = StructSchema::builder("Deep")
            .member(FieldBinding::new("Nested", kind))
            .build()
            .unwrap();
        let err = JsonEncoder::default()
            .encode(&schema, &Struct::new().with("Nested", value))
            .unwrap_err();
        assert!(matches!(err.kind(), EncodingErrorKind::NestingTooDeep { .. }));
    }
}
