/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::result::BoxError;
use aws_transform_schema::OperationSchema;
use aws_transform_types::{RequestValue, ResponseValue};
use std::sync::Arc;

/// A typed operation input that knows its wire schema.
///
/// Implementations convert between their own input/output types and the value trees the
/// codecs work on; [`Client::send`](crate::Client::send) drives the rest.
pub trait Operation {
    /// Typed result of the operation.
    type Output;

    /// Schema of the operation, usually taken from a
    /// [`SchemaRegistry`](aws_transform_schema::SchemaRegistry).
    fn schema(&self) -> Arc<OperationSchema>;

    /// The input as a request value.
    fn to_request_value(&self) -> RequestValue;

    /// Builds the output from a decoded response. `None` means the service answered `null`.
    fn parse_output(response: Option<ResponseValue>) -> Result<Self::Output, BoxError>;
}
