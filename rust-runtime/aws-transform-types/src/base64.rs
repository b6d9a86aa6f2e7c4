/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Standard-alphabet base64 used for blob members, backed by `base64-simd`.

use base64_simd::Base64;
use std::error::Error as StdError;
use std::fmt;

/// The input was not valid standard-alphabet base64.
#[derive(Debug)]
pub struct DecodeError(base64_simd::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid base64")
    }
}

impl StdError for DecodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.0)
    }
}

/// Decode `input` from base64 using the standard base64 alphabet.
pub fn decode(input: impl AsRef<str>) -> Result<Vec<u8>, DecodeError> {
    Base64::STANDARD
        .decode_to_boxed_bytes(input.as_ref().as_bytes())
        .map(|bytes| bytes.into_vec())
        .map_err(DecodeError)
}

/// Encode `input` into base64 using the standard base64 alphabet.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    Base64::STANDARD
        .encode_to_boxed_str(input.as_ref())
        .into_string()
}

#[cfg(test)]
mod test {
    use super::{decode, encode};

    #[test]
    fn known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
        assert_eq!(decode("Zm9vYg==").unwrap(), b"foob".to_vec());
    }

    #[test]
    fn invalid_input() {
        assert!(decode("not base64!").is_err());
    }

    proptest::proptest! {
        #[test]
        fn round_trip(bytes: Vec<u8>) {
            assert_eq!(decode(encode(&bytes)).unwrap(), bytes);
        }
    }
}
