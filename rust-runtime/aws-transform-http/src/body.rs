/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use bytes::Bytes;

/// Body of a request built by the dispatcher.
///
/// Request bodies are always fully encoded before dispatch, so the body is a single buffer.
/// Cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkBody {
    inner: Bytes,
}

impl SdkBody {
    /// An empty body.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The body's bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Length of the body in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the underlying buffer.
    pub fn into_bytes(self) -> Bytes {
        self.inner
    }
}

impl From<&str> for SdkBody {
    fn from(s: &str) -> Self {
        SdkBody::from(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for SdkBody {
    fn from(s: String) -> Self {
        SdkBody::from(s.into_bytes())
    }
}

impl From<Bytes> for SdkBody {
    fn from(bytes: Bytes) -> Self {
        SdkBody { inner: bytes }
    }
}

impl From<Vec<u8>> for SdkBody {
    fn from(data: Vec<u8>) -> SdkBody {
        Self::from(Bytes::from(data))
    }
}
