/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{Blob, Instant, Number};
use indexmap::IndexMap;

/// One operation's input, keyed by logical field name, before it is encoded.
pub type RequestValue = Struct;

/// One operation's output, keyed by logical field name, as reconstructed by the decoder.
pub type ResponseValue = Struct;

/// A logical value in a request or response tree.
///
/// Absence is represented by a field simply not being set on its parent [`Struct`], so there is
/// no `Null` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean scalar.
    Bool(bool),
    /// String scalar.
    String(String),
    /// Numeric scalar of any width.
    Number(Number),
    /// Timestamp; its wire format comes from the binding, not the value.
    Timestamp(Instant),
    /// Binary scalar.
    Blob(Blob),
    /// Ordered sequence.
    List(Vec<Value>),
    /// String-keyed mapping. Keys are unique and iterate in insertion order.
    Map(IndexMap<String, Value>),
    /// Nested structure.
    Struct(Struct),
}

impl Value {
    /// Builds a [`Value::Map`] from key/value pairs. A repeated key keeps its first position
    /// and its last value.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Value::List`] from anything convertible into values.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Blob(_) => "blob",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Struct(_) => "structure",
        }
    }

    /// Returns the string if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the instant if this is a [`Value::Timestamp`].
    pub fn as_timestamp(&self) -> Option<&Instant> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the blob if this is a [`Value::Blob`].
    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the structure if this is a [`Value::Struct`].
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl From<Instant> for Value {
    fn from(value: Instant) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Blob> for Value {
    fn from(value: Blob) -> Self {
        Value::Blob(value)
    }
}

impl From<Struct> for Value {
    fn from(value: Struct) -> Self {
        Value::Struct(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// A structure value: logical field names mapped to the values that are present.
///
/// ```
/// use aws_transform_types::{Struct, Value};
///
/// let input = Struct::new()
///     .with("QueueNamePrefix", "orders-")
///     .with("MaxResults", 10);
/// assert_eq!(input.get("QueueNamePrefix"), Some(&Value::from("orders-")));
/// assert!(input.get("NextToken").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Struct {
    fields: IndexMap<String, Value>,
}

impl Struct {
    /// Creates a structure with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, consuming and returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` to `value`, returning the previous value if one was set.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Returns the value of `name` if it is set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Removes and returns the value of `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// Returns true if `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields that are set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the set fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Struct {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Struct {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
