/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_transform_json::deserialize::token::{
    expect_start_object, expect_string_or_null, skip_value,
};
use aws_transform_json::deserialize::{json_token_iter, SyntaxError, Token};
use bytes::Bytes;
use http::HeaderMap;
use std::fmt;
use tracing::debug;

/// An error reported by a service, not mapped onto a modeled error type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericError {
    code: Option<String>,
    message: Option<String>,
    request_id: Option<String>,
}

impl GenericError {
    /// Reads the error out of a non-success response.
    ///
    /// The code comes from `__type`, the message from `message` or `Message` and the request
    /// ID from the `x-amzn-requestid` header. A body that isn't a JSON object (a query
    /// protocol XML error, for instance) yields only the request ID.
    pub fn from_response(response: &http::Response<Bytes>) -> Self {
        let mut error = parse_body(response.body()).unwrap_or_else(|err| {
            debug!(error = %err, "error response body is not a JSON object");
            GenericError::default()
        });
        error.request_id = request_id(response.headers()).map(str::to_owned);
        error
    }

    /// Error code, with any namespace prefix removed.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Human-readable message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// ID the service assigned to the request.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenericError")?;
        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GenericError {}

fn parse_body(body: &[u8]) -> Result<GenericError, SyntaxError> {
    let mut tokens = json_token_iter(body);
    let mut error = GenericError::default();
    expect_start_object(tokens.next())?;
    loop {
        match tokens.next().transpose()? {
            Some(Token::EndObject { .. }) | None => break,
            Some(Token::ObjectKey { key, .. }) => match key.to_unescaped()?.as_ref() {
                "__type" | "code" => {
                    error.code = expect_string_or_null(tokens.next())?
                        .map(|code| sanitize_error_code(&code).to_owned());
                }
                "message" | "Message" => {
                    error.message = expect_string_or_null(tokens.next())?;
                }
                _ => skip_value(&mut tokens)?,
            },
            Some(token) => return Err(token.unexpected("object key")),
        }
    }
    Ok(error)
}

/// `aws.protocoltests#ValidationException:http://internal` becomes `ValidationException`.
fn sanitize_error_code(error_code: &str) -> &str {
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-amzn-requestid")
        .or_else(|| headers.get("x-amz-request-id"))
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod test {
    use super::{parse_body, sanitize_error_code, GenericError};
    use bytes::Bytes;
    use tracing_test::traced_test;

    fn response(body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(400)
            .header("x-amzn-requestid", "3f3b8e4c")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn json_error() {
        let error = GenericError::from_response(&response(
            r#"{"__type": "com.amazonaws.dms#ResourceNotFoundFault", "message": "no such ARN", "Extra": [1, {"a": 2}]}"#,
        ));
        assert_eq!(error.code(), Some("ResourceNotFoundFault"));
        assert_eq!(error.message(), Some("no such ARN"));
        assert_eq!(error.request_id(), Some("3f3b8e4c"));
        assert_eq!(
            error.to_string(),
            "GenericError [ResourceNotFoundFault]: no such ARN"
        );
    }

    #[test]
    fn capitalized_message() {
        let error = parse_body(br#"{"Message": "throttled", "__type": "ThrottlingException"}"#)
            .unwrap();
        assert_eq!(error.code(), Some("ThrottlingException"));
        assert_eq!(error.message(), Some("throttled"));
    }

    #[test]
    #[traced_test]
    fn not_json() {
        let error = GenericError::from_response(&response(
            "<ErrorResponse><Error><Code>InvalidParameterValue</Code></Error></ErrorResponse>",
        ));
        assert_eq!(error.code(), None);
        assert_eq!(error.request_id(), Some("3f3b8e4c"));
        assert!(logs_contain("error response body is not a JSON object"));
        assert!(logs_contain("found '<' where a value was expected (byte 0)"));
        assert_eq!(
            GenericError::from_response(&response("")).request_id(),
            Some("3f3b8e4c")
        );
        assert!(logs_contain("JSON body ended unexpectedly"));
    }

    #[test]
    fn unreadable_error_fields() {
        let err = parse_body(br#"{"__type": 5}"#).unwrap_err();
        assert_eq!(Some(11), err.offset());
        assert_eq!(
            "found number where string or null was expected (byte 11)",
            err.to_string()
        );
        assert!(parse_body(br#"{"message": "\q"}"#).is_err());
    }

    #[test]
    fn error_codes() {
        assert_eq!(sanitize_error_code("FooError"), "FooError");
        assert_eq!(sanitize_error_code("FooError:http://internal/"), "FooError");
        assert_eq!(sanitize_error_code("aws.protocoltests#FooError"), "FooError");
        assert_eq!(
            sanitize_error_code("aws.protocoltests#FooError:http://internal/"),
            "FooError"
        );
    }
}
