/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::result::BoxError;
use aws_transform_json::codec::DecodingError;
use aws_transform_schema::{EncodingError, Protocol};
use thiserror::Error;

/// A request could not be built, or a response could not be turned back into a value.
///
/// This is always a client-side failure. Errors reported by the service arrive as
/// [`SdkError::ServiceError`](crate::SdkError::ServiceError) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The request value didn't fit the operation's input schema.
    #[error("failed to encode request")]
    Encoding(#[from] EncodingError),
    /// The response payload didn't fit the operation's output schema.
    #[error("failed to decode response")]
    Decoding(#[from] DecodingError),
    /// The HTTP request could not be assembled, e.g. because the endpoint is not a valid URI.
    #[error("failed to assemble HTTP request")]
    InvalidRequest(#[from] http::Error),
    /// Responses of this protocol can't be decoded.
    #[error("decoding {0:?} responses is not supported")]
    UnsupportedProtocol(Protocol),
    /// A decoded response could not be converted into an operation's output type.
    #[error("response does not match the operation output")]
    InvalidOutput(#[source] BoxError),
}
