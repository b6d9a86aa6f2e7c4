/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Protocol-agnostic types for the aws-transform codecs.
//!
//! Requests are handed to the encoders as a [`Struct`] of logical field names to [`Value`]s,
//! and the decoder hands responses back in the same shape. Neither tree can contain cycles:
//! they are plain owned data mirroring a strictly hierarchical wire format.

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod base64;
pub mod instant;
mod number;
mod value;

pub use crate::instant::Instant;
pub use crate::number::Number;
pub use crate::value::{RequestValue, ResponseValue, Struct, Value};

/// Binary data.
///
/// Blobs are carried as raw bytes and only base64 encoded at the wire boundary.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Blob {
    inner: Vec<u8>,
}

impl Blob {
    /// Creates a new blob from the given `input`.
    pub fn new<T: Into<Vec<u8>>>(input: T) -> Self {
        Blob {
            inner: input.into(),
        }
    }

    /// Consumes the `Blob` and returns a `Vec<u8>` with its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

#[cfg(test)]
mod test {
    use crate::instant::Format;
    use crate::{Blob, Instant};

    #[test]
    fn instant_fmt() {
        let instant = Instant::from_secs(1576540098);
        assert_eq!(
            instant.fmt(Format::DateTime).unwrap(),
            "2019-12-16T23:48:18Z"
        );
        assert_eq!(instant.fmt(Format::EpochSeconds).unwrap(), "1576540098");
        assert_eq!(instant.fmt(Format::EpochMillis).unwrap(), "1576540098000");

        let instant = Instant::from_fractional_secs(1576540098, 0.52);
        assert_eq!(
            instant.fmt(Format::DateTime).unwrap(),
            "2019-12-16T23:48:18.52Z"
        );
        assert_eq!(instant.fmt(Format::EpochSeconds).unwrap(), "1576540098.52");
        assert_eq!(instant.fmt(Format::EpochMillis).unwrap(), "1576540098520");
    }

    #[test]
    fn blob_bytes() {
        let blob = Blob::new("hello");
        assert_eq!(blob.as_ref(), b"hello");
        assert_eq!(blob.into_inner(), b"hello".to_vec());
    }
}
