/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! AWS Query protocol support for aws-transform.
//!
//! The [`writer`] module holds low-level writers that build [`QueryParams`] one parameter at
//! a time. [`QueryEncoder`] drives them from a
//! [`StructSchema`](aws_transform_schema::StructSchema), so a request value turns into ordered
//! `(name, value)` pairs ready to be sent as a form body.

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod encoder;
pub mod writer;

pub use crate::encoder::QueryEncoder;
pub use crate::writer::QueryParams;
