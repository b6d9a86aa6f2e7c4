/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Turns request values into HTTP requests and response payloads back into values.
//!
//! Both directions are pure functions of their arguments: no I/O happens here.

use crate::body::SdkBody;
use crate::config::ProtocolSettings;
use crate::error::TransformError;
use aws_transform_json::codec::{JsonCodec, JsonCodecSettings};
use aws_transform_query::QueryEncoder;
use aws_transform_schema::{EncodingError, OperationSchema, Protocol};
use aws_transform_types::{RequestValue, ResponseValue, Struct};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const TARGET_HEADER: &str = "x-amz-target";

/// Builds the HTTP request for a call to `schema` with `input`.
///
/// Query operations send `Action`, `Version` and the encoded parameters as a form body. JSON
/// operations send the encoded object, routed by an `X-Amz-Target: <prefix>.<operation>`
/// header.
pub fn build_request(
    schema: &OperationSchema,
    input: &RequestValue,
    settings: &ProtocolSettings,
) -> Result<http::Request<SdkBody>, TransformError> {
    let timestamp_format = schema.protocol().default_timestamp_format();
    let mut builder = http::Request::builder()
        .method(schema.http_method().clone())
        .uri(request_uri(settings, schema.resource_path()));
    let body = match schema.protocol() {
        Protocol::AwsQuery => {
            let params = QueryEncoder::new(timestamp_format).encode_operation(schema, input)?;
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
            params.to_form_body().into_bytes()
        }
        Protocol::AwsJson => {
            let target = schema.target().ok_or_else(|| {
                EncodingError::custom(format!(
                    "operation `{}` has no target prefix",
                    schema.name()
                ))
            })?;
            let codec = JsonCodec::new(JsonCodecSettings {
                default_timestamp_format: timestamp_format,
            });
            let body = codec.encode(schema.input(), input)?;
            builder = builder
                .header(TARGET_HEADER, target)
                .header(CONTENT_TYPE, settings.json_version.content_type());
            body
        }
    };
    if let Some(user_agent) = &settings.user_agent {
        builder = builder.header(USER_AGENT, user_agent.as_str());
    }
    debug!(
        operation = schema.name(),
        protocol = ?schema.protocol(),
        body_len = body.len(),
        "built request"
    );
    Ok(builder
        .header(CONTENT_LENGTH, body.len())
        .body(SdkBody::from(body))?)
}

/// Decodes the body of a successful response to `schema`.
///
/// An empty body decodes as an empty structure and a bare `null` as `None`. Query responses
/// are XML, which isn't supported.
pub fn build_result(
    schema: &OperationSchema,
    body: &[u8],
) -> Result<Option<ResponseValue>, TransformError> {
    match schema.protocol() {
        Protocol::AwsQuery => Err(TransformError::UnsupportedProtocol(Protocol::AwsQuery)),
        Protocol::AwsJson => {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Some(Struct::new()));
            }
            let codec = JsonCodec::new(JsonCodecSettings {
                default_timestamp_format: schema.protocol().default_timestamp_format(),
            });
            Ok(codec.decode(schema.output(), body)?)
        }
    }
}

fn request_uri(settings: &ProtocolSettings, resource_path: &str) -> String {
    let endpoint = settings.endpoint.to_string();
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        resource_path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod test {
    use super::{build_request, build_result};
    use crate::config::{Config, JsonVersion, ProtocolSettings};
    use crate::error::TransformError;
    use aws_transform_json::codec::DecodingErrorKind;
    use aws_transform_schema::{
        EncodingErrorKind, FieldBinding, FieldKind, OperationSchema, Protocol, StructSchema,
    };
    use aws_transform_types::Struct;
    use http::Uri;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn list_queues() -> OperationSchema {
        OperationSchema::builder("ListQueues")
            .protocol(Protocol::AwsQuery)
            .api_version("2012-11-05")
            .input(
                StructSchema::builder("ListQueuesRequest")
                    .member(FieldBinding::new("QueueNamePrefix", FieldKind::string()))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn get_trail_status() -> OperationSchema {
        OperationSchema::builder("GetTrailStatus")
            .protocol(Protocol::AwsJson)
            .target_prefix("CloudTrail_20131101")
            .input(
                StructSchema::builder("GetTrailStatusRequest")
                    .member(FieldBinding::new("Name", FieldKind::string()).required())
                    .build()
                    .unwrap(),
            )
            .output(
                StructSchema::builder("GetTrailStatusResponse")
                    .member(FieldBinding::new("IsLogging", FieldKind::boolean()))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn header<'a>(request: &'a http::Request<crate::body::SdkBody>, name: &str) -> &'a str {
        request.headers()[name].to_str().unwrap()
    }

    #[test]
    #[traced_test]
    fn query_request() {
        let request = build_request(
            &list_queues(),
            &Struct::new().with("QueueNamePrefix", "orders"),
            &ProtocolSettings::default(),
        )
        .unwrap();
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.uri(), &Uri::from_static("https://localhost/"));
        assert_eq!(
            header(&request, "content-type"),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(header(&request, "content-length"), "59");
        assert_eq!(
            std::str::from_utf8(request.body().bytes()).unwrap(),
            "Action=ListQueues&Version=2012-11-05&QueueNamePrefix=orders"
        );
        assert!(request.headers().get("x-amz-target").is_none());
        assert!(logs_contain("built request"));
    }

    #[test]
    fn json_request() {
        let settings = Config::builder()
            .endpoint(Uri::from_static("https://cloudtrail.us-east-1.amazonaws.com"))
            .json_version(JsonVersion::V1_1)
            .user_agent("aws-transform/0.1")
            .build()
            .protocol_settings();
        let request = build_request(
            &get_trail_status(),
            &Struct::new().with("Name", "management"),
            &settings,
        )
        .unwrap();
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(
            request.uri(),
            &Uri::from_static("https://cloudtrail.us-east-1.amazonaws.com/")
        );
        assert_eq!(
            header(&request, "x-amz-target"),
            "CloudTrail_20131101.GetTrailStatus"
        );
        assert_eq!(
            header(&request, "content-type"),
            "application/x-amz-json-1.1"
        );
        assert_eq!(header(&request, "content-length"), "21");
        assert_eq!(header(&request, "user-agent"), "aws-transform/0.1");
        assert_eq!(request.body().bytes(), br#"{"Name":"management"}"#);
    }

    #[test]
    fn encoding_failures_are_wrapped() {
        let err = build_request(
            &get_trail_status(),
            &Struct::new(),
            &ProtocolSettings::default(),
        )
        .unwrap_err();
        match err {
            TransformError::Encoding(err) => assert!(matches!(
                err.kind(),
                EncodingErrorKind::MissingRequiredField { .. }
            )),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn invalid_user_agent() {
        let settings = Config::builder()
            .user_agent("bad\nagent")
            .build()
            .protocol_settings();
        let err = build_request(&list_queues(), &Struct::new(), &settings).unwrap_err();
        assert!(matches!(err, TransformError::InvalidRequest(_)));
    }

    #[test]
    fn results() {
        let schema = get_trail_status();
        assert_eq!(
            Some(Struct::new().with("IsLogging", true)),
            build_result(&schema, br#"{"IsLogging": true, "Extra": {}}"#).unwrap()
        );
        assert_eq!(Some(Struct::new()), build_result(&schema, b"").unwrap());
        assert_eq!(Some(Struct::new()), build_result(&schema, b" \n").unwrap());
        assert_eq!(None, build_result(&schema, b"null").unwrap());

        match build_result(&schema, br#"{"IsLogging": tr"#).unwrap_err() {
            TransformError::Decoding(err) => assert!(
                err.is_truncated() || matches!(err.kind(), DecodingErrorKind::Syntax(_)),
                "{:?}",
                err
            ),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(
            build_result(&list_queues(), b"<ListQueuesResponse/>").unwrap_err(),
            TransformError::UnsupportedProtocol(Protocol::AwsQuery)
        ));
    }
}
