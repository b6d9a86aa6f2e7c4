/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Canned connector for tests.

use crate::body::SdkBody;
use crate::connector::HttpConnector;
use crate::result::BoxError;
use bytes::Bytes;
use http::header::HeaderName;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type ConnectVec = Vec<(http::Request<SdkBody>, http::Response<Bytes>)>;

/// A request that was sent, paired with the request the test expected.
#[derive(Debug)]
pub struct ValidateRequest {
    /// The request the test expected.
    pub expected: http::Request<SdkBody>,
    /// The request that was actually sent.
    pub actual: http::Request<SdkBody>,
}

impl ValidateRequest {
    /// Panics unless method, URI, body and every expected header (except `ignore_headers`)
    /// match.
    pub fn assert_matches(&self, ignore_headers: &[HeaderName]) {
        let (actual, expected) = (&self.actual, &self.expected);
        for (name, value) in expected.headers() {
            if ignore_headers.contains(name) {
                continue;
            }
            match actual.headers().get(name) {
                Some(actual_value) => {
                    assert_eq!(actual_value, value, "header mismatch for {:?}", name)
                }
                None => panic!("header {:?} missing", name),
            }
        }
        match (
            std::str::from_utf8(actual.body().bytes()),
            std::str::from_utf8(expected.body().bytes()),
        ) {
            (Ok(actual), Ok(expected)) => assert_eq!(actual, expected),
            _ => assert_eq!(actual.body().bytes(), expected.body().bytes()),
        };
        assert_eq!(actual.method(), expected.method());
        assert_eq!(actual.uri(), expected.uri());
    }
}

/// Connector that replays a preloaded series of responses.
///
/// Each call pops the next `(expected request, response)` pair and records the actual request
/// next to the expected one for later inspection. Once the data runs out, calls fail.
///
/// ```
/// use aws_transform_http::test_connection::TestConnection;
/// use aws_transform_http::{HttpConnector, SdkBody};
/// use bytes::Bytes;
///
/// let connection = TestConnection::new(vec![(
///     http::Request::new(SdkBody::from("request body")),
///     http::Response::new(Bytes::from_static(b"response body")),
/// )]);
/// let response = connection.call(http::Request::new(SdkBody::from("request body"))).unwrap();
/// assert_eq!(response.body().as_ref(), b"response body");
/// connection.requests()[0].assert_matches(&[]);
/// assert!(connection.call(http::Request::new(SdkBody::empty())).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TestConnection {
    data: Arc<Mutex<ConnectVec>>,
    requests: Arc<Mutex<Vec<ValidateRequest>>>,
}

impl TestConnection {
    /// Creates a connection that answers with `data`, in order.
    pub fn new(mut data: ConnectVec) -> Self {
        data.reverse();
        TestConnection {
            data: Arc::new(Mutex::new(data)),
            requests: Default::default(),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> impl Deref<Target = Vec<ValidateRequest>> + '_ {
        lock(&self.requests)
    }
}

impl HttpConnector for TestConnection {
    fn call(&self, actual: http::Request<SdkBody>) -> Result<http::Response<Bytes>, BoxError> {
        match lock(&self.data).pop() {
            Some((expected, response)) => {
                lock(&self.requests).push(ValidateRequest { expected, actual });
                Ok(response)
            }
            None => Err("no more data".into()),
        }
    }
}

// A panicking test must not wedge the other requests sharing the connection.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
