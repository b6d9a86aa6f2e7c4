/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{FieldBinding, SchemaError};
use std::collections::HashMap;

/// Ordered field bindings of one structure (an operation input/output, or a nested object).
///
/// Binding order is significant: it is the order in which fields are written to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSchema {
    name: String,
    members: Vec<FieldBinding>,
    by_wire_name: HashMap<String, usize>,
}

impl StructSchema {
    /// Creates a builder for a structure called `name`.
    pub fn builder(name: impl Into<String>) -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// A structure with no members.
    pub fn empty(name: impl Into<String>) -> Self {
        StructSchema {
            name: name.into(),
            members: Vec::new(),
            by_wire_name: HashMap::new(),
        }
    }

    /// Name of the structure, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bindings in declaration order.
    pub fn members(&self) -> &[FieldBinding] {
        &self.members
    }

    /// Looks up the binding with the given wire name.
    pub fn member_by_wire_name(&self, wire_name: &str) -> Option<&FieldBinding> {
        self.by_wire_name
            .get(wire_name)
            .map(|index| &self.members[*index])
    }

    /// Looks up the binding with the given logical name.
    pub fn member(&self, name: &str) -> Option<&FieldBinding> {
        self.members.iter().find(|member| member.name() == name)
    }
}

/// Builder for [`StructSchema`].
#[derive(Debug)]
pub struct StructSchemaBuilder {
    name: String,
    members: Vec<FieldBinding>,
}

impl StructSchemaBuilder {
    /// Appends a binding. Bindings are written in the order they are added.
    pub fn member(mut self, binding: FieldBinding) -> Self {
        self.members.push(binding);
        self
    }

    /// Builds the schema, rejecting duplicate wire names or logical names.
    pub fn build(self) -> Result<StructSchema, SchemaError> {
        let mut by_wire_name = HashMap::with_capacity(self.members.len());
        for (index, member) in self.members.iter().enumerate() {
            if by_wire_name
                .insert(member.wire_name().to_owned(), index)
                .is_some()
            {
                return Err(SchemaError::duplicate_wire_name(
                    &self.name,
                    member.wire_name(),
                ));
            }
            if self.members[..index]
                .iter()
                .any(|other| other.name() == member.name())
            {
                return Err(SchemaError::duplicate_field_name(&self.name, member.name()));
            }
        }
        Ok(StructSchema {
            name: self.name,
            members: self.members,
            by_wire_name,
        })
    }
}
