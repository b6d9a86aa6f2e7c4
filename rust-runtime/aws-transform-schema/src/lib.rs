/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Declarative schemas for service operations.
//!
//! An [`OperationSchema`] describes how one operation's input and output map between logical
//! field names and the wire: which protocol frames it, and, for each [`FieldBinding`], the wire
//! name, [`FieldKind`] and whether the field is required. The query and JSON codecs walk these
//! schemas instead of relying on code generated per operation.
//!
//! Schemas are immutable once built and are meant to be constructed once and shared, typically
//! from a [`SchemaRegistry`] held in a `static`:
//!
//! ```
//! use aws_transform_schema::{
//!     FieldBinding, FieldKind, OperationSchema, Protocol, SchemaRegistry, StructSchema,
//! };
//! use std::sync::LazyLock;
//!
//! static SQS: LazyLock<SchemaRegistry> = LazyLock::new(|| {
//!     SchemaRegistry::builder("AmazonSQS")
//!         .operation(
//!             OperationSchema::builder("ListQueues")
//!                 .protocol(Protocol::AwsQuery)
//!                 .api_version("2012-11-05")
//!                 .input(
//!                     StructSchema::builder("ListQueuesRequest")
//!                         .member(FieldBinding::new("QueueNamePrefix", FieldKind::string()))
//!                         .build()
//!                         .expect("valid"),
//!                 )
//!                 .build()
//!                 .expect("valid"),
//!         )
//!         .build()
//!         .expect("valid")
//! });
//!
//! assert!(SQS.get("ListQueues").is_some());
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod binding;
pub mod error;
mod operation;
mod path;
mod registry;
mod structure;

pub use crate::binding::{FieldBinding, FieldKind, ScalarType};
pub use crate::error::{EncodingError, EncodingErrorKind, SchemaError};
pub use crate::operation::{OperationSchema, OperationSchemaBuilder, Protocol};
pub use crate::path::FieldPath;
pub use crate::registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use crate::structure::{StructSchema, StructSchemaBuilder};

pub use aws_transform_types::instant::Format as TimestampFormat;

/// Maximum number of nested structures and collections the codecs will follow before failing.
pub const MAX_NESTING_DEPTH: usize = 64;
