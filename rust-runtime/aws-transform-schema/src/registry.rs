/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{OperationSchema, SchemaError};
use std::collections::HashMap;
use std::sync::Arc;

/// All operation schemas of one service, looked up by operation name.
///
/// The registry is immutable and `Send + Sync`; put it in a `LazyLock` so it is built exactly
/// once, on first use, no matter how many threads race for it.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    service: String,
    operations: HashMap<String, Arc<OperationSchema>>,
}

impl SchemaRegistry {
    /// Creates a builder for `service`.
    pub fn builder(service: impl Into<String>) -> SchemaRegistryBuilder {
        SchemaRegistryBuilder {
            service: service.into(),
            operations: Vec::new(),
        }
    }

    /// Name of the service.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Schema for `operation`, if registered.
    pub fn get(&self, operation: &str) -> Option<Arc<OperationSchema>> {
        self.operations.get(operation).cloned()
    }

    /// Iterates over every registered operation, in no particular order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationSchema> {
        self.operations.values().map(AsRef::as_ref)
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Debug)]
pub struct SchemaRegistryBuilder {
    service: String,
    operations: Vec<OperationSchema>,
}

impl SchemaRegistryBuilder {
    /// Adds an operation.
    pub fn operation(mut self, schema: OperationSchema) -> Self {
        self.operations.push(schema);
        self
    }

    /// Builds the registry. Registering two operations with the same name is an error.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut operations = HashMap::with_capacity(self.operations.len());
        for schema in self.operations {
            let name = schema.name().to_owned();
            if operations.contains_key(&name) {
                return Err(SchemaError::duplicate_operation(&name));
            }
            operations.insert(name, Arc::new(schema));
        }
        Ok(SchemaRegistry {
            service: self.service,
            operations,
        })
    }
}
