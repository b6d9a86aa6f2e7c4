/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Client configuration.

use http::Uri;

/// Version of the AWS JSON protocol, which picks the request content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum JsonVersion {
    /// `application/x-amz-json-1.0`
    V1_0,
    /// `application/x-amz-json-1.1`
    #[default]
    V1_1,
}

impl JsonVersion {
    /// Content type of request bodies in this version.
    pub fn content_type(&self) -> &'static str {
        match self {
            JsonVersion::V1_0 => "application/x-amz-json-1.0",
            JsonVersion::V1_1 => "application/x-amz-json-1.1",
        }
    }
}

/// Configuration for a [`Client`](crate::Client).
///
/// ```
/// use aws_transform_http::config::{Config, JsonVersion};
/// use http::Uri;
///
/// let config = Config::builder()
///     .endpoint(Uri::from_static("https://dms.us-east-1.amazonaws.com/"))
///     .json_version(JsonVersion::V1_1)
///     .user_agent("my-app/1.0")
///     .build();
/// assert_eq!(config.endpoint(), &Uri::from_static("https://dms.us-east-1.amazonaws.com/"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    endpoint: Uri,
    json_version: JsonVersion,
    user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

impl Config {
    /// Creates a builder with every setting at its default.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Base URI that operation resource paths are appended to.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// AWS JSON protocol version.
    pub fn json_version(&self) -> JsonVersion {
        self.json_version
    }

    /// Value of the `user-agent` header, if one is sent.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Settings handed to [`build_request`](crate::build_request).
    pub fn protocol_settings(&self) -> ProtocolSettings {
        ProtocolSettings {
            endpoint: self.endpoint.clone(),
            json_version: self.json_version,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
    endpoint: Option<Uri>,
    json_version: Option<JsonVersion>,
    user_agent: Option<String>,
}

impl Builder {
    /// Sets the base URI. Defaults to `https://localhost/`.
    pub fn endpoint(mut self, endpoint: Uri) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the AWS JSON protocol version. Defaults to 1.1.
    pub fn json_version(mut self, json_version: JsonVersion) -> Self {
        self.json_version = Some(json_version);
        self
    }

    /// Sends `user_agent` as the `user-agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Config {
        Config {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| Uri::from_static("https://localhost/")),
            json_version: self.json_version.unwrap_or_default(),
            user_agent: self.user_agent,
        }
    }
}

/// Everything besides the operation schema and the input that shapes a request.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ProtocolSettings {
    /// Base URI that operation resource paths are appended to.
    pub endpoint: Uri,
    /// AWS JSON protocol version.
    pub json_version: JsonVersion,
    /// Value of the `user-agent` header, if one is sent.
    pub user_agent: Option<String>,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Config::default().protocol_settings()
    }
}
