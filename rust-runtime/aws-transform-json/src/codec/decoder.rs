/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Schema-driven JSON decoder.

use crate::codec::cursor::DecoderCursor;
use crate::codec::error::DecodingError;
use crate::codec::JsonCodecSettings;
use crate::deserialize::{json_token_iter, EscapedStr, Offset, SyntaxError, Token};
use aws_transform_schema::{FieldKind, FieldPath, ScalarType, StructSchema, TimestampFormat};
use aws_transform_types::{base64, Blob, Instant, Number, ResponseValue, Struct, Value};
use indexmap::IndexMap;
use tracing::trace;

/// Reconstructs a [`ResponseValue`] from a JSON token stream by following a [`StructSchema`].
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    settings: JsonCodecSettings,
}

impl JsonDecoder {
    /// Creates a decoder with the given settings.
    pub fn new(settings: JsonCodecSettings) -> Self {
        Self { settings }
    }

    /// Decodes a complete document.
    ///
    /// A bare `null` document decodes to `Ok(None)`. Anything after the top-level value is an
    /// error.
    pub fn decode(
        &self,
        schema: &StructSchema,
        input: &[u8],
    ) -> Result<Option<ResponseValue>, DecodingError> {
        self.decode_tokens(schema, json_token_iter(input))
    }

    /// Like [`decode`](Self::decode), over any token source.
    pub fn decode_tokens<'a, I>(
        &self,
        schema: &StructSchema,
        tokens: I,
    ) -> Result<Option<ResponseValue>, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let mut cursor = DecoderCursor::new(tokens);
        let result = self.decode_struct(schema, &mut cursor)?;
        if let Some(token) = cursor.next_token()? {
            return Err(DecodingError::trailing_tokens(&token));
        }
        Ok(result)
    }

    /// Decodes one object, or `null`, starting at the cursor's current position.
    ///
    /// On success the cursor is back at the depth it had on entry.
    pub fn decode_struct<'a, I>(
        &self,
        schema: &StructSchema,
        cursor: &mut DecoderCursor<I>,
    ) -> Result<Option<ResponseValue>, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let root = FieldPath::root();
        match cursor.next_token()? {
            None => Err(DecodingError::truncated()),
            Some(Token::ValueNull { .. }) => Ok(None),
            Some(Token::StartObject { .. }) => self.read_struct(cursor, schema, &root).map(Some),
            Some(token) => Err(DecodingError::unexpected_token(&root, "structure", &token)),
        }
    }

    /// Reads the members of an object whose opening token has just been consumed.
    fn read_struct<'a, I>(
        &self,
        cursor: &mut DecoderCursor<I>,
        schema: &StructSchema,
        path: &FieldPath<'_>,
    ) -> Result<Struct, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let original_depth = cursor.depth() - 1;
        let current_parent = cursor.current_parent().map(str::to_owned);
        let target_depth = original_depth + 1;

        let mut result = Struct::new();
        loop {
            let token = cursor.next_token()?.ok_or_else(DecodingError::truncated)?;
            match token {
                Token::ObjectKey { .. } if cursor.depth() == target_depth => {
                    let wire_name = cursor.pending_element().unwrap_or_default();
                    match schema.member_by_wire_name(wire_name) {
                        Some(binding) => {
                            let field_path = path.field(binding.name());
                            let value = cursor.next_token()?.ok_or_else(DecodingError::truncated)?;
                            if let Some(value) =
                                self.read_value(cursor, binding.kind(), value, &field_path)?
                            {
                                result.set(binding.name(), value);
                            }
                        }
                        // its tokens sit deeper than `target_depth` and fall through below
                        None => trace!(
                            shape = schema.name(),
                            field = wire_name,
                            "skipping unbound field"
                        ),
                    }
                }
                Token::EndObject { .. } | Token::EndArray { .. } => {
                    let parent_matches = match cursor.last_parsed_parent() {
                        None => true,
                        Some(last) => Some(last) == current_parent.as_deref(),
                    };
                    if parent_matches && cursor.depth() <= original_depth {
                        break;
                    }
                }
                _ => {}
            }
        }
        Ok(result)
    }

    /// Reads the value that starts with `token`. `null` reads as absent.
    fn read_value<'a, I>(
        &self,
        cursor: &mut DecoderCursor<I>,
        kind: &FieldKind,
        token: Token<'a>,
        path: &FieldPath<'_>,
    ) -> Result<Option<Value>, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let value = match (kind, token) {
            (_, Token::ValueNull { .. }) => return Ok(None),
            (FieldKind::Scalar(ScalarType::String), Token::ValueString { offset, value }) => {
                Value::String(unescape(offset, value)?)
            }
            (FieldKind::Scalar(ScalarType::Boolean), Token::ValueBool { value, .. }) => {
                Value::Bool(value)
            }
            (FieldKind::Scalar(ScalarType::Integer), Token::ValueNumber { value, .. }) => {
                let value = value
                    .as_i32()
                    .ok_or_else(|| DecodingError::number_out_of_range(path, kind.name()))?;
                Value::Number(value.into())
            }
            (FieldKind::Scalar(ScalarType::Long), Token::ValueNumber { value, .. }) => {
                let value = value
                    .as_i64()
                    .ok_or_else(|| DecodingError::number_out_of_range(path, kind.name()))?;
                Value::Number(value.into())
            }
            (
                FieldKind::Scalar(ScalarType::Float | ScalarType::Double),
                Token::ValueNumber { value, .. },
            ) => Value::Number(Number::Float(value.to_f64_lossy())),
            (FieldKind::Blob, Token::ValueString { offset, value }) => {
                let bytes = base64::decode(unescape(offset, value)?)
                    .map_err(|err| DecodingError::invalid_base64(path, err))?;
                Value::Blob(Blob::new(bytes))
            }
            (FieldKind::Timestamp(format), token) => {
                let format = format.unwrap_or(self.settings.default_timestamp_format);
                Value::Timestamp(read_timestamp(token, format, path)?)
            }
            (FieldKind::List(member), Token::StartArray { .. }) => {
                Value::List(self.read_list(cursor, member, path)?)
            }
            (FieldKind::Map(value_kind), Token::StartObject { .. }) => {
                Value::Map(self.read_map(cursor, value_kind, path)?)
            }
            (FieldKind::Struct(schema), Token::StartObject { .. }) => {
                Value::Struct(self.read_struct(cursor, schema, path)?)
            }
            (kind, token) => {
                return Err(DecodingError::unexpected_token(path, kind.name(), &token))
            }
        };
        Ok(Some(value))
    }

    fn read_list<'a, I>(
        &self,
        cursor: &mut DecoderCursor<I>,
        member: &FieldKind,
        path: &FieldPath<'_>,
    ) -> Result<Vec<Value>, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let mut items = Vec::new();
        for index in 0.. {
            match cursor.next_token()?.ok_or_else(DecodingError::truncated)? {
                Token::EndArray { .. } => break,
                token => {
                    let element_path = path.index(index);
                    if let Some(item) = self.read_value(cursor, member, token, &element_path)? {
                        items.push(item);
                    }
                }
            }
        }
        Ok(items)
    }

    fn read_map<'a, I>(
        &self,
        cursor: &mut DecoderCursor<I>,
        value_kind: &FieldKind,
        path: &FieldPath<'_>,
    ) -> Result<IndexMap<String, Value>, DecodingError>
    where
        I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
    {
        let mut entries = IndexMap::new();
        loop {
            match cursor.next_token()?.ok_or_else(DecodingError::truncated)? {
                Token::EndObject { .. } => break,
                Token::ObjectKey { .. } => {
                    let key = cursor.pending_element().unwrap_or_default().to_owned();
                    let token = cursor.next_token()?.ok_or_else(DecodingError::truncated)?;
                    let value = self.read_value(cursor, value_kind, token, &path.key(&key))?;
                    if let Some(value) = value {
                        entries.insert(key, value);
                    }
                }
                token => return Err(DecodingError::unexpected_token(path, "map key", &token)),
            }
        }
        Ok(entries)
    }
}

fn unescape(offset: Offset, value: EscapedStr<'_>) -> Result<String, DecodingError> {
    Ok(value
        .to_unescaped()
        .map_err(|err| SyntaxError::invalid_escape(offset.0, err))?
        .into_owned())
}

/// Timestamps may arrive as numbers or strings whatever their declared format: numbers are
/// read as epoch seconds (or millis when tagged so), strings are parsed in `format`.
fn read_timestamp(
    token: Token<'_>,
    format: TimestampFormat,
    path: &FieldPath<'_>,
) -> Result<Instant, DecodingError> {
    match token {
        Token::ValueNumber { value, .. } if format == TimestampFormat::EpochMillis => value
            .as_i64()
            .map(Instant::from_millis)
            .ok_or_else(|| DecodingError::number_out_of_range(path, "timestamp")),
        // parsed from the wire text, which keeps digits an f64 would round away
        Token::ValueNumber { value, text, .. } => {
            match Instant::from_str(text, TimestampFormat::EpochSeconds) {
                Ok(instant) => Ok(instant),
                // exponent notation
                Err(_) => match value {
                    Number::Float(seconds) => Ok(Instant::from_f64(seconds)),
                    value => value
                        .as_i64()
                        .map(Instant::from_secs)
                        .ok_or_else(|| DecodingError::number_out_of_range(path, "timestamp")),
                },
            }
        }
        Token::ValueString { offset, value } => {
            Instant::from_str(&unescape(offset, value)?, format)
                .map_err(|err| DecodingError::invalid_timestamp(path, err))
        }
        token => Err(DecodingError::unexpected_token(path, "timestamp", &token)),
    }
}
