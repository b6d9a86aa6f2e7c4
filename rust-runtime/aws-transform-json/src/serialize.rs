/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Low-level JSON writers that append to a `String`.
//!
//! The writers never emit `null`: an absent value is expressed by not writing the key at all.

use crate::escape::escape_string;
use aws_transform_types::instant::{ConversionError, Format};
use aws_transform_types::{Instant, Number};

/// Writes a single JSON value: the value of an object member, or one array element.
#[derive(Debug)]
pub struct JsonValueWriter<'a> {
    output: &'a mut String,
}

impl<'a> JsonValueWriter<'a> {
    /// Creates a writer that appends one value to `output`.
    pub fn new(output: &'a mut String) -> Self {
        JsonValueWriter { output }
    }

    /// Writes the boolean `value`.
    pub fn boolean(self, value: bool) {
        self.output.push_str(match value {
            true => "true",
            _ => "false",
        });
    }

    /// Writes a string `value`, escaping it as needed.
    pub fn string(self, value: &str) {
        append_string(self.output, value);
    }

    /// Writes a number `value`.
    ///
    /// Callers must reject non-finite floats first: JSON can't represent them.
    pub fn number(self, value: Number) {
        append_number(self.output, value);
    }

    /// Writes an `Instant` in `format`. Epoch formats are written as numbers, date-times as
    /// strings.
    pub fn instant(self, instant: &Instant, format: Format) -> Result<(), ConversionError> {
        let formatted = instant.fmt(format)?;
        match format {
            Format::EpochSeconds | Format::EpochMillis => self.output.push_str(&formatted),
            Format::DateTime => append_string(self.output, &formatted),
        }
        Ok(())
    }

    /// Starts an array.
    pub fn start_array(self) -> JsonArrayWriter<'a> {
        JsonArrayWriter::new(self.output)
    }

    /// Starts an object.
    pub fn start_object(self) -> JsonObjectWriter<'a> {
        JsonObjectWriter::new(self.output)
    }
}

/// Writes the members of a JSON object.
#[derive(Debug)]
pub struct JsonObjectWriter<'a> {
    json: &'a mut String,
    started: bool,
}

impl<'a> JsonObjectWriter<'a> {
    /// Opens an object in `output`.
    pub fn new(output: &'a mut String) -> Self {
        output.push('{');
        Self {
            json: output,
            started: false,
        }
    }

    /// Writes `key` and returns a writer for its value.
    pub fn key(&mut self, key: &str) -> JsonValueWriter<'_> {
        if self.started {
            self.json.push(',');
        }
        self.started = true;

        append_string(self.json, key);
        self.json.push(':');

        JsonValueWriter::new(self.json)
    }

    /// Finishes the object.
    pub fn finish(self) {
        self.json.push('}');
    }
}

/// Writes the elements of a JSON array.
#[derive(Debug)]
pub struct JsonArrayWriter<'a> {
    json: &'a mut String,
    started: bool,
}

impl<'a> JsonArrayWriter<'a> {
    /// Opens an array in `output`.
    pub fn new(output: &'a mut String) -> Self {
        output.push('[');
        Self {
            json: output,
            started: false,
        }
    }

    /// Returns a writer for the next element.
    pub fn value(&mut self) -> JsonValueWriter<'_> {
        if self.started {
            self.json.push(',');
        }
        self.started = true;
        JsonValueWriter::new(self.json)
    }

    /// Finishes the array.
    pub fn finish(self) {
        self.json.push(']');
    }
}

fn append_string(json: &mut String, value: &str) {
    json.push('"');
    json.push_str(&escape_string(value));
    json.push('"');
}

fn append_number(json: &mut String, value: Number) {
    match value {
        Number::PosInt(value) => {
            // itoa::Buffer is a fixed-size stack allocation, so this is cheap
            json.push_str(itoa::Buffer::new().format(value));
        }
        Number::NegInt(value) => {
            json.push_str(itoa::Buffer::new().format(value));
        }
        Number::Float(value) => {
            debug_assert!(value.is_finite(), "non-finite floats must be rejected earlier");
            // ryu::Buffer is a fixed-size stack allocation, so this is cheap
            json.push_str(ryu::Buffer::new().format_finite(value));
        }
    }
}
