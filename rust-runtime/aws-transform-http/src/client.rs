/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::{Config, ProtocolSettings};
use crate::connector::HttpConnector;
use crate::error::TransformError;
use crate::generic_error::GenericError;
use crate::operation::Operation;
use crate::result::SdkError;
use crate::transform::{build_request, build_result};
use aws_transform_schema::OperationSchema;
use aws_transform_types::{RequestValue, ResponseValue};
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

type CallResult = Result<Option<ResponseValue>, SdkError<GenericError>>;

/// Calls operations described by an [`OperationSchema`] through an [`HttpConnector`].
///
/// The client is cheap to clone and every clone shares one connector. Calls never share
/// mutable state, so a client can serve any number of threads at once.
pub struct Client<C> {
    inner: Arc<Inner<C>>,
}

struct Inner<C> {
    config: Config,
    settings: ProtocolSettings,
    connector: C,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl<C> Client<C>
where
    C: HttpConnector + 'static,
{
    /// Creates a client that sends every request through `connector`.
    pub fn new(config: Config, connector: C) -> Self {
        let settings = config.protocol_settings();
        Client {
            inner: Arc::new(Inner {
                config,
                settings,
                connector,
            }),
        }
    }

    /// The client's configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The connector requests are sent through.
    pub fn connector(&self) -> &C {
        &self.inner.connector
    }

    /// Calls `schema` with `input`, blocking the current thread until the response is decoded.
    pub fn call(&self, schema: &OperationSchema, input: &RequestValue) -> CallResult {
        self.dispatch(schema, input).map(|(_, result)| result)
    }

    /// Calls `schema` with `input` on tokio's blocking thread pool.
    pub async fn call_async(
        &self,
        schema: Arc<OperationSchema>,
        input: RequestValue,
    ) -> CallResult {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.call(&schema, &input))
            .await
            .map_err(|err| SdkError::DispatchFailure(err.into()))?
    }

    /// Calls `schema` with `input` on tokio's blocking thread pool and hands the result to
    /// `handler` on that pool once the call completes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call_with_handler<F>(
        &self,
        schema: Arc<OperationSchema>,
        input: RequestValue,
        handler: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(CallResult) + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || handler(client.call(&schema, &input)))
    }

    /// Sends a typed operation.
    pub fn send<O>(&self, operation: &O) -> Result<O::Output, SdkError<GenericError>>
    where
        O: Operation,
    {
        let schema = operation.schema();
        let (raw, result) = self.dispatch(&schema, &operation.to_request_value())?;
        O::parse_output(result).map_err(|err| SdkError::ResponseError {
            raw,
            err: TransformError::InvalidOutput(err),
        })
    }

    fn dispatch(
        &self,
        schema: &OperationSchema,
        input: &RequestValue,
    ) -> Result<(http::Response<Bytes>, Option<ResponseValue>), SdkError<GenericError>> {
        let request = build_request(schema, input, &self.inner.settings)
            .map_err(SdkError::ConstructionFailure)?;
        let response = self
            .inner
            .connector
            .call(request)
            .map_err(SdkError::DispatchFailure)?;
        debug!(
            operation = schema.name(),
            status = %response.status(),
            "received response"
        );
        if !response.status().is_success() {
            let err = GenericError::from_response(&response);
            return Err(SdkError::ServiceError { raw: response, err });
        }
        match build_result(schema, response.body()) {
            Ok(result) => Ok((response, result)),
            Err(err) => Err(SdkError::ResponseError { raw: response, err }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Client;
    use crate::config::Config;
    use crate::result::{BoxError, SdkError};
    use crate::test_connection::TestConnection;
    use crate::SdkBody;
    use aws_transform_schema::{FieldBinding, FieldKind, OperationSchema, Protocol, StructSchema};
    use aws_transform_types::Struct;
    use bytes::Bytes;
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn describe_endpoints() -> Arc<OperationSchema> {
        Arc::new(
            OperationSchema::builder("DescribeEndpoints")
                .protocol(Protocol::AwsJson)
                .target_prefix("DynamoDB_20120810")
                .output(
                    StructSchema::builder("DescribeEndpointsResponse")
                        .member(FieldBinding::new(
                            "Endpoints",
                            FieldKind::list_of(FieldKind::string()),
                        ))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
    }

    fn ok(body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(200)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    #[traced_test]
    fn successful_call() {
        let expected = http::Request::builder()
            .uri("https://localhost/")
            .method("POST")
            .header("x-amz-target", "DynamoDB_20120810.DescribeEndpoints")
            .header("content-type", "application/x-amz-json-1.1")
            .body(SdkBody::from("{}"))
            .unwrap();
        let connection =
            TestConnection::new(vec![(expected, ok(r#"{"Endpoints": ["a", "b"]}"#))]);
        let client = Client::new(Config::default(), connection.clone());
        let result = client
            .call(&describe_endpoints(), &Struct::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            result.get("Endpoints").and_then(|v| v.as_list()).map(|l| l.len()),
            Some(2)
        );
        let requests = connection.requests();
        assert_eq!(requests.len(), 1);
        requests[0].assert_matches(&[]);
        assert_eq!(requests[0].actual.headers()["content-length"], "2");
        assert!(logs_contain("received response"));
    }

    #[test]
    fn service_error() {
        let response = http::Response::builder()
            .status(400)
            .header("x-amzn-requestid", "req-1")
            .body(Bytes::from_static(
                br#"{"__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException", "message": "gone"}"#,
            ))
            .unwrap();
        let connection =
            TestConnection::new(vec![(http::Request::new(SdkBody::empty()), response)]);
        let client = Client::new(Config::default(), connection);
        match client.call(&describe_endpoints(), &Struct::new()) {
            Err(SdkError::ServiceError { raw, err }) => {
                assert_eq!(raw.status(), 400);
                assert_eq!(err.code(), Some("ResourceNotFoundException"));
                assert_eq!(err.message(), Some("gone"));
                assert_eq!(err.request_id(), Some("req-1"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn dispatch_and_response_failures() {
        let client = Client::new(Config::default(), TestConnection::new(vec![]));
        assert!(matches!(
            client.call(&describe_endpoints(), &Struct::new()),
            Err(SdkError::DispatchFailure(_))
        ));

        let truncated = TestConnection::new(vec![(
            http::Request::new(SdkBody::empty()),
            ok("{\"Endpoints\": ["),
        )]);
        let client = Client::new(Config::default(), truncated);
        let err = client
            .call(&describe_endpoints(), &Struct::new())
            .unwrap_err();
        assert!(matches!(err, SdkError::ResponseError { .. }));
        assert_eq!(err.raw_response().map(|raw| raw.status().as_u16()), Some(200));
    }

    #[tokio::test]
    async fn async_and_handler_calls() {
        let client = Client::new(
            Config::default(),
            |_request: http::Request<SdkBody>| -> Result<http::Response<Bytes>, BoxError> {
                Ok(ok(r#"{"Endpoints": ["a"]}"#))
            },
        );
        let result = client
            .call_async(describe_endpoints(), Struct::new())
            .await
            .unwrap();
        assert!(result.is_some());

        let (tx, rx) = tokio::sync::oneshot::channel();
        client
            .call_with_handler(describe_endpoints(), Struct::new(), move |result| {
                let _ = tx.send(result.map(|value| value.is_some()).ok());
            })
            .await
            .unwrap();
        assert_eq!(rx.await.unwrap(), Some(true));
    }
}
