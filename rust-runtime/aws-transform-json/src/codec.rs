/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Schema-driven JSON encoding and decoding.

use aws_transform_schema::{EncodingError, StructSchema, TimestampFormat};
use aws_transform_types::{RequestValue, ResponseValue};

mod cursor;
mod decoder;
mod encoder;
mod error;

pub use cursor::DecoderCursor;
pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use error::{DecodingError, DecodingErrorKind};

/// Configuration shared by the JSON encoder and decoder.
#[derive(Debug, Clone)]
pub struct JsonCodecSettings {
    /// Format for timestamp bindings that don't name one.
    pub default_timestamp_format: TimestampFormat,
}

impl Default for JsonCodecSettings {
    fn default() -> Self {
        Self {
            default_timestamp_format: TimestampFormat::EpochSeconds,
        }
    }
}

/// JSON encoder and decoder configured with the same settings.
///
/// ```
/// use aws_transform_json::codec::{JsonCodec, JsonCodecSettings};
/// use aws_transform_schema::{FieldBinding, FieldKind, StructSchema};
/// use aws_transform_types::Struct;
///
/// let schema = StructSchema::builder("GetTrailStatusRequest")
///     .member(FieldBinding::new("Name", FieldKind::string()).required())
///     .build()
///     .unwrap();
/// let codec = JsonCodec::new(JsonCodecSettings::default());
///
/// let body = codec.encode(&schema, &Struct::new().with("Name", "trail")).unwrap();
/// assert_eq!(br#"{"Name":"trail"}"#.to_vec(), body);
///
/// let decoded = codec.decode(&schema, &body).unwrap();
/// assert_eq!(Some(Struct::new().with("Name", "trail")), decoded);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    settings: JsonCodecSettings,
}

impl JsonCodec {
    /// Creates a codec with the given settings.
    pub fn new(settings: JsonCodecSettings) -> Self {
        Self { settings }
    }

    /// Returns the codec settings.
    pub fn settings(&self) -> &JsonCodecSettings {
        &self.settings
    }

    /// Encodes a request value as a JSON object.
    pub fn encode(
        &self,
        schema: &StructSchema,
        value: &RequestValue,
    ) -> Result<Vec<u8>, EncodingError> {
        JsonEncoder::new(self.settings.clone()).encode(schema, value)
    }

    /// Decodes a JSON document. A bare `null` decodes to `Ok(None)`.
    pub fn decode(
        &self,
        schema: &StructSchema,
        input: &[u8],
    ) -> Result<Option<ResponseValue>, DecodingError> {
        JsonDecoder::new(self.settings.clone()).decode(schema, input)
    }
}
