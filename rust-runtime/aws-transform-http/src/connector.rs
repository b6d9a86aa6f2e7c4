/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Seam to the HTTP transport.

use crate::body::SdkBody;
use crate::result::BoxError;
use bytes::Bytes;

/// Sends a request and returns the fully loaded response.
///
/// Connection management, retries and signing all live behind this trait. Implementations
/// must be shareable across threads: the same connector serves every call made through a
/// [`Client`](crate::Client), including calls running on the blocking pool.
///
/// Any `Fn(http::Request<SdkBody>) -> Result<http::Response<Bytes>, BoxError>` closure is a
/// connector:
///
/// ```
/// use aws_transform_http::{BoxError, HttpConnector, SdkBody};
/// use bytes::Bytes;
///
/// let connector = |_request: http::Request<SdkBody>| -> Result<http::Response<Bytes>, BoxError> {
///     Ok(http::Response::new(Bytes::from_static(b"{}")))
/// };
/// let response = connector.call(http::Request::new(SdkBody::empty())).unwrap();
/// assert_eq!(response.body().as_ref(), b"{}");
/// ```
pub trait HttpConnector: Send + Sync {
    /// Sends `request`. Errors mean no response was received.
    fn call(&self, request: http::Request<SdkBody>) -> Result<http::Response<Bytes>, BoxError>;
}

impl<F> HttpConnector for F
where
    F: Fn(http::Request<SdkBody>) -> Result<http::Response<Bytes>, BoxError> + Send + Sync,
{
    fn call(&self, request: http::Request<SdkBody>) -> Result<http::Response<Bytes>, BoxError> {
        self(request)
    }
}
