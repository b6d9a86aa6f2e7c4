/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// A number type that implements Javascript / JSON semantics, modeled on serde_json:
/// <https://docs.serde.rs/src/serde_json/number.rs.html#20-22>
///
/// Integers are normalized on construction: non-negative values are always `PosInt`, so a
/// value built by a caller compares equal to the same value read back off the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Unsigned 64-bit integer value.
    PosInt(u64),
    /// Signed 64-bit integer value. Only negative values are stored here.
    NegInt(i64),
    /// 64-bit floating-point value.
    Float(f64),
}

impl Number {
    /// Converts to an `f64` lossily.
    /// Use this when it is acceptable to lose precision.
    pub fn to_f64_lossy(self) -> f64 {
        match self {
            Number::PosInt(v) => v as f64,
            Number::NegInt(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// Returns the value as an `i64` if it is an integer that fits.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::PosInt(v) => i64::try_from(v).ok(),
            Number::NegInt(v) => Some(v),
            Number::Float(_) => None,
        }
    }

    /// Returns the value as an `i32` if it is an integer that fits.
    pub fn as_i32(self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    /// False for `NaN` and the infinities.
    pub fn is_finite(self) -> bool {
        match self {
            Number::Float(v) => v.is_finite(),
            _ => true,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        if value < 0 {
            Number::NegInt(value)
        } else {
            Number::PosInt(value as u64)
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::PosInt(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

#[cfg(test)]
mod test {
    use super::Number;

    #[test]
    fn integers_are_normalized() {
        assert_eq!(Number::from(5i64), Number::PosInt(5));
        assert_eq!(Number::from(0i32), Number::PosInt(0));
        assert_eq!(Number::from(-5i64), Number::NegInt(-5));
    }

    #[test]
    fn narrowing() {
        assert_eq!(Number::PosInt(7).as_i32(), Some(7));
        assert_eq!(Number::PosInt(u64::MAX).as_i64(), None);
        assert_eq!(Number::NegInt(i64::MIN).as_i32(), None);
        assert_eq!(Number::Float(1.0).as_i64(), None);
    }

    #[test]
    fn finiteness() {
        assert!(Number::Float(1.5).is_finite());
        assert!(!Number::Float(f64::NAN).is_finite());
        assert!(!Number::Float(f64::NEG_INFINITY).is_finite());
        assert!(Number::NegInt(-1).is_finite());
    }
}
