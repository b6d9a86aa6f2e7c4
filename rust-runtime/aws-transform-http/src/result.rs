/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Outcome of a client call.

use crate::error::TransformError;
use bytes::Bytes;
use std::error::Error;
use std::fmt;

/// Boxed error returned by a [`HttpConnector`](crate::HttpConnector).
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Failure of a client call.
///
/// `E` is the type service errors are parsed into.
#[derive(Debug)]
pub enum SdkError<E> {
    /// The request failed during construction. It was not dispatched over the network.
    ConstructionFailure(TransformError),

    /// The request failed during dispatch. An HTTP response was not received. The request MAY
    /// have been sent.
    DispatchFailure(BoxError),

    /// A successful response was received but it could not be decoded.
    ResponseError {
        /// The raw response.
        raw: http::Response<Bytes>,
        /// Why decoding failed.
        err: TransformError,
    },

    /// An error response was received from the service.
    ServiceError {
        /// The raw response.
        raw: http::Response<Bytes>,
        /// The parsed service error.
        err: E,
    },
}

impl<E> SdkError<E> {
    /// The raw response, if one was received.
    pub fn raw_response(&self) -> Option<&http::Response<Bytes>> {
        match self {
            SdkError::ResponseError { raw, .. } | SdkError::ServiceError { raw, .. } => Some(raw),
            SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) => None,
        }
    }
}

impl<E> fmt::Display for SdkError<E>
where
    E: Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkError::ConstructionFailure(err) => write!(f, "failed to construct request: {}", err),
            SdkError::DispatchFailure(err) => write!(f, "dispatch failure: {}", err),
            SdkError::ResponseError { err, .. } => write!(f, "response error: {}", err),
            SdkError::ServiceError { err, .. } => write!(f, "service error: {}", err),
        }
    }
}

impl<E> Error for SdkError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SdkError::ConstructionFailure(err) | SdkError::ResponseError { err, .. } => Some(err),
            SdkError::DispatchFailure(err) => Some(err.as_ref()),
            SdkError::ServiceError { err, .. } => Some(err),
        }
    }
}
