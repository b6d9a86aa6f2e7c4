/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Request/response transforms and a client for AWS Query and JSON operations.
//!
//! [`build_request`] turns a request value into an `http::Request` framed the way the
//! operation's protocol expects, and [`build_result`] decodes a response body back into a
//! value. Both are pure: any transport can sit behind them.
//!
//! [`Client`] ties the two together with an [`HttpConnector`]. It can be called synchronously,
//! from async code, or with a completion handler:
//!
//! ```
//! use aws_transform_http::{BoxError, Client, Config, SdkBody};
//! use aws_transform_schema::{FieldBinding, FieldKind, OperationSchema, Protocol, StructSchema};
//! use aws_transform_types::Struct;
//! use bytes::Bytes;
//!
//! let schema = OperationSchema::builder("GetTrailStatus")
//!     .protocol(Protocol::AwsJson)
//!     .target_prefix("CloudTrail_20131101")
//!     .input(
//!         StructSchema::builder("GetTrailStatusRequest")
//!             .member(FieldBinding::new("Name", FieldKind::string()).required())
//!             .build()
//!             .unwrap(),
//!     )
//!     .output(
//!         StructSchema::builder("GetTrailStatusResponse")
//!             .member(FieldBinding::new("IsLogging", FieldKind::boolean()))
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let connector = |request: http::Request<SdkBody>| -> Result<http::Response<Bytes>, BoxError> {
//!     assert_eq!(request.body().bytes(), br#"{"Name":"trail"}"#);
//!     Ok(http::Response::new(Bytes::from_static(br#"{"IsLogging": true}"#)))
//! };
//! let client = Client::new(Config::default(), connector);
//! let output = client
//!     .call(&schema, &Struct::new().with("Name", "trail"))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(output.get("IsLogging").and_then(|v| v.as_bool()), Some(true));
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod body;
mod client;
pub mod config;
mod connector;
mod error;
mod generic_error;
mod operation;
mod result;
pub mod test_connection;
mod transform;

pub use crate::body::SdkBody;
pub use crate::client::Client;
pub use crate::config::Config;
pub use crate::connector::HttpConnector;
pub use crate::error::TransformError;
pub use crate::generic_error::GenericError;
pub use crate::operation::Operation;
pub use crate::result::{BoxError, SdkError};
pub use crate::transform::{build_request, build_result};
