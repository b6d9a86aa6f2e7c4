/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! JSON support for aws-transform.
//!
//! [`deserialize`] is a streaming tokenizer and [`serialize`] a set of append-only writers.
//! [`codec`] builds on both to encode request values and decode response payloads by walking a
//! [`StructSchema`](aws_transform_schema::StructSchema).

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod codec;
pub mod deserialize;
mod escape;
pub mod serialize;

pub use crate::escape::EscapeError;
