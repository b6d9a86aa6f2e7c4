/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{FieldBinding, SchemaError, StructSchema, TimestampFormat};
use http::Method;
use std::sync::Arc;

/// Wire protocol an operation is framed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `Action`/`Version` plus form-encoded parameters (SQS, SNS, EC2, ELB, ...).
    AwsQuery,
    /// JSON body routed by the `X-Amz-Target` header (CloudTrail, DMS, Lightsail, ...).
    AwsJson,
}

impl Protocol {
    /// Timestamp format used when a binding doesn't carry its own tag.
    pub fn default_timestamp_format(&self) -> TimestampFormat {
        match self {
            Protocol::AwsQuery => TimestampFormat::DateTime,
            Protocol::AwsJson => TimestampFormat::EpochSeconds,
        }
    }
}

/// Immutable description of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSchema {
    name: String,
    http_method: Method,
    resource_path: String,
    protocol: Protocol,
    api_version: Option<String>,
    target_prefix: Option<String>,
    input: Arc<StructSchema>,
    output: Arc<StructSchema>,
}

impl OperationSchema {
    /// Creates a builder for the operation called `name`.
    pub fn builder(name: impl Into<String>) -> OperationSchemaBuilder {
        OperationSchemaBuilder {
            name: name.into(),
            http_method: Method::POST,
            resource_path: "/".to_owned(),
            protocol: None,
            api_version: None,
            target_prefix: None,
            input: None,
            output: None,
        }
    }

    /// Operation name, e.g. `ListQueues`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP method. Both supported protocols always use `POST`.
    pub fn http_method(&self) -> &Method {
        &self.http_method
    }

    /// Resource path appended to the endpoint.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Wire protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// API version sent as the `Version` query parameter.
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Value of the JSON routing header: `<target prefix>.<operation name>`.
    pub fn target(&self) -> Option<String> {
        self.target_prefix
            .as_ref()
            .map(|prefix| format!("{}.{}", prefix, self.name))
    }

    /// Schema of the request.
    pub fn input(&self) -> &StructSchema {
        &self.input
    }

    /// Schema of the response.
    pub fn output(&self) -> &StructSchema {
        &self.output
    }

    /// Request bindings in wire order.
    pub fn input_bindings(&self) -> &[FieldBinding] {
        self.input.members()
    }
}

/// Builder for [`OperationSchema`].
#[derive(Debug)]
pub struct OperationSchemaBuilder {
    name: String,
    http_method: Method,
    resource_path: String,
    protocol: Option<Protocol>,
    api_version: Option<String>,
    target_prefix: Option<String>,
    input: Option<Arc<StructSchema>>,
    output: Option<Arc<StructSchema>>,
}

impl OperationSchemaBuilder {
    /// Sets the wire protocol. Required.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Overrides the HTTP method (default `POST`).
    pub fn http_method(mut self, method: Method) -> Self {
        self.http_method = method;
        self
    }

    /// Overrides the resource path (default `/`).
    pub fn resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Sets the API version. Required for [`Protocol::AwsQuery`].
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the routing header prefix, e.g. `AmazonDMSv20160101`. Required for
    /// [`Protocol::AwsJson`].
    pub fn target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.target_prefix = Some(prefix.into());
        self
    }

    /// Sets the request schema. Defaults to an empty structure.
    pub fn input(mut self, input: impl Into<Arc<StructSchema>>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets the response schema. Defaults to an empty structure.
    pub fn output(mut self, output: impl Into<Arc<StructSchema>>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Builds the schema, checking that the protocol's framing information is present.
    pub fn build(self) -> Result<OperationSchema, SchemaError> {
        let protocol = self
            .protocol
            .ok_or_else(|| SchemaError::missing_protocol(&self.name))?;
        match protocol {
            Protocol::AwsQuery if self.api_version.is_none() => {
                return Err(SchemaError::missing_api_version(&self.name))
            }
            Protocol::AwsJson if self.target_prefix.is_none() => {
                return Err(SchemaError::missing_target_prefix(&self.name))
            }
            _ => {}
        }
        let input = self
            .input
            .unwrap_or_else(|| Arc::new(StructSchema::empty(format!("{}Request", self.name))));
        let output = self
            .output
            .unwrap_or_else(|| Arc::new(StructSchema::empty(format!("{}Result", self.name))));
        Ok(OperationSchema {
            name: self.name,
            http_method: self.http_method,
            resource_path: self.resource_path,
            protocol,
            api_version: self.api_version,
            target_prefix: self.target_prefix,
            input,
            output,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{OperationSchema, Protocol, TimestampFormat};
    use http::Method;

    #[test]
    fn json_operation() {
        let schema = OperationSchema::builder("RemoveTagsFromResource")
            .protocol(Protocol::AwsJson)
            .target_prefix("AmazonDMSv20160101")
            .build()
            .unwrap();
        assert_eq!(
            schema.target().as_deref(),
            Some("AmazonDMSv20160101.RemoveTagsFromResource")
        );
        assert_eq!(schema.http_method(), &Method::POST);
        assert_eq!(schema.resource_path(), "/");
        assert_eq!(schema.input().name(), "RemoveTagsFromResourceRequest");
        assert!(schema.input_bindings().is_empty());
        assert_eq!(
            schema.protocol().default_timestamp_format(),
            TimestampFormat::EpochSeconds
        );
    }

    #[test]
    fn framing_is_validated() {
        OperationSchema::builder("ListQueues")
            .protocol(Protocol::AwsQuery)
            .build()
            .expect_err("query operations need a version");
        OperationSchema::builder("GetTrailStatus")
            .protocol(Protocol::AwsJson)
            .build()
            .expect_err("json operations need a target prefix");
        OperationSchema::builder("Anything")
            .build()
            .expect_err("protocol is required");
    }
}
