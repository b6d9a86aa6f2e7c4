/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Writers that produce ordered AWS Query parameters.

use aws_transform_types::instant::{ConversionError, Format};
use aws_transform_types::{Instant, Number};
use std::borrow::Cow;
use urlencoding::encode;

/// Ordered `(name, value)` query parameters, unencoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// Value of the first parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameters in the order they were written.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if no parameter has been written.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Serializes the parameters as an `application/x-www-form-urlencoded` body.
    pub fn to_form_body(&self) -> String {
        let mut body = String::new();
        for (name, value) in &self.params {
            if !body.is_empty() {
                body.push('&');
            }
            body.push_str(&encode(name));
            body.push('=');
            body.push_str(&encode(value));
        }
        body
    }

    /// Returns the underlying pairs.
    pub fn into_inner(self) -> Vec<(String, String)> {
        self.params
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

/// Writes the parameters of one operation call, starting with `Action` and `Version`.
#[derive(Debug)]
pub struct QueryWriter<'a> {
    output: &'a mut QueryParams,
}

impl<'a> QueryWriter<'a> {
    /// Writes `Action` and `Version` into `output`.
    pub fn new(output: &'a mut QueryParams, action: &str, version: &str) -> Self {
        output.push("Action", action);
        output.push("Version", version);
        QueryWriter { output }
    }

    /// Returns a writer for the top-level parameter `prefix`.
    pub fn prefix(&mut self, prefix: &'a str) -> QueryValueWriter<'_> {
        QueryValueWriter::new(self.output, Cow::Borrowed(prefix))
    }

    /// Returns a writer whose [`prefix`](QueryValueWriter::prefix) calls name top-level
    /// parameters.
    pub fn members(&mut self) -> QueryValueWriter<'_> {
        QueryValueWriter::root(self.output)
    }

    /// Finishes the call's parameters.
    pub fn finish(self) {
        // Calling this drops self
    }
}

/// Writes the entries of a map as `Prefix.entry.N.key` / `Prefix.entry.N.value` pairs.
#[must_use]
#[derive(Debug)]
pub struct QueryMapWriter<'a> {
    output: &'a mut QueryParams,
    prefix: Cow<'a, str>,
    next_index: usize,
}

impl<'a> QueryMapWriter<'a> {
    fn new(output: &'a mut QueryParams, prefix: Cow<'a, str>) -> QueryMapWriter<'a> {
        QueryMapWriter {
            output,
            prefix,
            next_index: 1,
        }
    }

    /// Writes the key of the next entry and returns a writer for its value.
    pub fn entry(&mut self, key: &str) -> QueryValueWriter<'_> {
        let entry = format!("{}.entry.{}", self.prefix, self.next_index);
        self.output.push(format!("{}.key", entry), key);
        self.next_index += 1;
        QueryValueWriter::new(self.output, Cow::Owned(format!("{}.value", entry)))
    }

    /// Finishes the map.
    pub fn finish(self) {
        // Calling this drops self
    }
}

/// Writes the elements of a list as `Prefix.N`, one-based.
#[must_use]
#[derive(Debug)]
pub struct QueryListWriter<'a> {
    output: &'a mut QueryParams,
    prefix: Cow<'a, str>,
    next_index: usize,
}

impl<'a> QueryListWriter<'a> {
    fn new(output: &'a mut QueryParams, prefix: Cow<'a, str>) -> QueryListWriter<'a> {
        QueryListWriter {
            output,
            prefix,
            next_index: 1,
        }
    }

    /// Returns a writer for the next element.
    pub fn entry(&mut self) -> QueryValueWriter<'_> {
        let value_name = format!("{}.{}", self.prefix, self.next_index);
        self.next_index += 1;
        QueryValueWriter::new(self.output, Cow::Owned(value_name))
    }

    /// Finishes the list. An empty list writes nothing.
    pub fn finish(self) {
        // Calling this drops self
    }
}

/// Writes a single value, or the members nested under a prefix.
#[must_use]
#[derive(Debug)]
pub struct QueryValueWriter<'a> {
    output: &'a mut QueryParams,
    prefix: Cow<'a, str>,
}

impl<'a> QueryValueWriter<'a> {
    /// Creates a writer for the parameter named `prefix`.
    pub fn new(output: &'a mut QueryParams, prefix: Cow<'a, str>) -> QueryValueWriter<'a> {
        QueryValueWriter { output, prefix }
    }

    /// Creates a writer with an empty prefix. Its nested prefixes are top-level names.
    pub fn root(output: &'a mut QueryParams) -> QueryValueWriter<'a> {
        QueryValueWriter::new(output, Cow::Borrowed(""))
    }

    /// Starts a nested prefix, `Prefix.name`.
    pub fn prefix(&mut self, name: &str) -> QueryValueWriter<'_> {
        let prefix = if self.prefix.is_empty() {
            Cow::Owned(name.to_owned())
        } else {
            Cow::Owned(format!("{}.{}", self.prefix, name))
        };
        QueryValueWriter::new(self.output, prefix)
    }

    /// Writes the boolean `value`.
    pub fn boolean(self, value: bool) {
        self.write(match value {
            true => "true",
            _ => "false",
        });
    }

    /// Writes a string `value`.
    pub fn string(self, value: &str) {
        self.write(value);
    }

    /// Writes a number `value`. Non-finite floats are written as `NaN`, `Infinity` or
    /// `-Infinity`.
    pub fn number(self, value: Number) {
        match value {
            // itoa::Buffer is a fixed-size stack allocation, so this is cheap
            Number::PosInt(value) => self.write(itoa::Buffer::new().format(value)),
            Number::NegInt(value) => self.write(itoa::Buffer::new().format(value)),
            Number::Float(value) if value.is_nan() => self.write("NaN"),
            Number::Float(value) if value.is_infinite() => {
                self.write(if value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(value) => self.write(ryu::Buffer::new().format_finite(value)),
        }
    }

    /// Writes an `Instant` in `format`.
    pub fn instant(self, instant: &Instant, format: Format) -> Result<(), ConversionError> {
        self.write(&instant.fmt(format)?);
        Ok(())
    }

    /// Starts a map.
    pub fn start_map(self) -> QueryMapWriter<'a> {
        QueryMapWriter::new(self.output, self.prefix)
    }

    /// Starts a list. With a `member_name` elements are written as `Prefix.member_name.N`.
    pub fn start_list(self, member_name: Option<&str>) -> QueryListWriter<'a> {
        let prefix = match member_name {
            Some(member_name) => Cow::Owned(format!("{}.{}", self.prefix, member_name)),
            None => self.prefix,
        };
        QueryListWriter::new(self.output, prefix)
    }

    fn write(self, value: &str) {
        self.output.push(self.prefix.into_owned(), value);
    }
}
