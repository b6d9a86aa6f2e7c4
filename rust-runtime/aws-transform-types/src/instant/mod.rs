/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Instant value for representing timestamp members.
//!
//! Unlike [`std::time::Instant`], this instant is not opaque. The time inside of it can be
//! read and modified. It also holds logic for parsing and formatting timestamps in each of
//! the wire formats a field binding can be tagged with.

use num_integer::Integer;
use std::error::Error as StdError;
use std::fmt;

mod format;

pub use self::format::InstantParseError;

const MILLIS_PER_SECOND: i64 = 1000;
const NANOS_PER_MILLI: u32 = 1_000_000;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Instant in time.
///
/// Instant in time represented as seconds and sub-second nanos since
/// the Unix epoch (January 1, 1970 at midnight UTC/GMT).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Instant {
    seconds: i64,
    subsecond_nanos: u32,
}

impl Instant {
    /// Creates an `Instant` from a number of seconds since the Unix epoch.
    pub fn from_secs(epoch_seconds: i64) -> Self {
        Instant {
            seconds: epoch_seconds,
            subsecond_nanos: 0,
        }
    }

    /// Converts number of milliseconds since the Unix epoch into an `Instant`.
    pub fn from_millis(epoch_millis: i64) -> Instant {
        let (seconds, millis) = epoch_millis.div_mod_floor(&MILLIS_PER_SECOND);
        Instant::from_secs_and_nanos(seconds, millis as u32 * NANOS_PER_MILLI)
    }

    /// Creates an `Instant` from a number of seconds and a fractional second since the Unix epoch.
    ///
    /// # Example
    /// ```
    /// # use aws_transform_types::Instant;
    /// assert_eq!(
    ///     Instant::from_secs_and_nanos(1, 500_000_000u32),
    ///     Instant::from_fractional_secs(1, 0.5),
    /// );
    /// ```
    pub fn from_fractional_secs(epoch_seconds: i64, fraction: f64) -> Self {
        let subsecond_nanos = (fraction * NANOS_PER_SECOND as f64) as u32;
        Instant::from_secs_and_nanos(epoch_seconds, subsecond_nanos)
    }

    /// Creates an `Instant` from a number of seconds and sub-second nanos since the Unix epoch.
    ///
    /// # Panics
    /// Panics if `subsecond_nanos` is not less than one second.
    pub fn from_secs_and_nanos(seconds: i64, subsecond_nanos: u32) -> Self {
        if subsecond_nanos >= NANOS_PER_SECOND {
            panic!("{} is >= 1_000_000_000", subsecond_nanos)
        }
        Instant {
            seconds,
            subsecond_nanos,
        }
    }

    /// Creates an `Instant` from an `f64` representing the number of seconds since the Unix epoch.
    ///
    /// _Note: This conversion will lose precision due to the nature of floating point numbers._
    pub fn from_f64(epoch_seconds: f64) -> Self {
        let seconds = epoch_seconds.floor() as i64;
        let rem = epoch_seconds - epoch_seconds.floor();
        let nanos = ((rem * NANOS_PER_SECOND as f64).round() as u32).min(NANOS_PER_SECOND - 1);
        Instant::from_secs_and_nanos(seconds, nanos)
    }

    /// Parses an `Instant` from a string using the given `format`.
    pub fn from_str(s: &str, format: Format) -> Result<Self, InstantParseError> {
        match format {
            Format::DateTime => format::date_time::parse(s),
            Format::EpochSeconds => format::epoch_seconds::parse(s),
            Format::EpochMillis => format::epoch_millis::parse(s),
        }
    }

    /// Returns the `Instant` value as an `f64` representing the seconds since the Unix epoch.
    ///
    /// _Note: This conversion will lose precision due to the nature of floating point numbers._
    pub fn as_secs_f64(&self) -> f64 {
        self.seconds as f64 + self.subsecond_nanos as f64 / NANOS_PER_SECOND as f64
    }

    /// Returns the number of whole seconds since the Unix epoch. Sub-second nanos are
    /// always added on top of this, even for instants before the epoch.
    pub fn secs(&self) -> i64 {
        self.seconds
    }

    /// Returns the sub-second nanos component.
    pub fn subsec_nanos(&self) -> u32 {
        self.subsecond_nanos
    }

    /// Returns true if sub-second nanos is greater than zero.
    pub fn has_subsec_nanos(&self) -> bool {
        self.subsecond_nanos != 0
    }

    /// Converts the `Instant` to the number of milliseconds since the Unix epoch.
    ///
    /// This is fallible since `Instant` holds more precision than an `i64` of milliseconds
    /// can represent.
    pub fn to_millis(self) -> Result<i64, ConversionError> {
        let subsec_millis = (self.subsecond_nanos / NANOS_PER_MILLI) as i64;
        self.seconds
            .checked_mul(MILLIS_PER_SECOND)
            .and_then(|millis| millis.checked_add(subsec_millis))
            .ok_or(ConversionError(
                "instant value is too large to fit into an i64 in milliseconds",
            ))
    }

    /// Formats the `Instant` to a string using the given `format`.
    ///
    /// Returns an error if the instant can't fit into the requested format.
    pub fn fmt(&self, format: Format) -> Result<String, ConversionError> {
        match format {
            Format::DateTime => format::date_time::format(self),
            Format::EpochSeconds => Ok(format::epoch_seconds::format(self)),
            Format::EpochMillis => self.to_millis().map(|millis| millis.to_string()),
        }
    }
}

/// Failure to convert an `Instant` to or from another representation.
#[derive(Debug)]
#[non_exhaustive]
pub struct ConversionError(&'static str);

impl StdError for ConversionError {}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wire formats for timestamps.
///
/// Services disagree on the representation even within a single protocol, so every timestamp
/// binding carries one of these tags instead of inferring it from the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// ISO-8601 / RFC-3339 date-time, e.g. `2019-12-16T23:48:18.52Z`.
    DateTime,
    /// Number of seconds since the Unix epoch, with an optional fraction, e.g. `1576540098.52`.
    EpochSeconds,
    /// Whole milliseconds since the Unix epoch, e.g. `1576540098520`.
    EpochMillis,
}

#[cfg(test)]
mod test {
    use super::{Format, Instant};

    #[test]
    fn from_millis() {
        assert_eq!(
            Instant::from_secs_and_nanos(1, 500_000_000),
            Instant::from_millis(1500)
        );
        assert_eq!(
            Instant::from_secs_and_nanos(-2, 500_000_000),
            Instant::from_millis(-1500)
        );
    }

    #[test]
    fn from_f64() {
        assert_eq!(Instant::from_secs_and_nanos(5, 200_000_000), Instant::from_f64(5.2));
        assert_eq!(Instant::from_secs_and_nanos(-2, 500_000_000), Instant::from_f64(-1.5));
        assert_eq!(Instant::from_secs(1576540098), Instant::from_f64(1576540098.0));
    }

    #[test]
    fn to_millis() {
        assert_eq!(Instant::from_millis(1500).to_millis().unwrap(), 1500);
        assert_eq!(Instant::from_millis(-1500).to_millis().unwrap(), -1500);
        assert!(Instant::from_secs(i64::MAX).to_millis().is_err());
    }

    #[test]
    fn negative_epoch_seconds_round_trip() {
        let instant = Instant::from_millis(-1500);
        assert_eq!(instant.fmt(Format::EpochSeconds).unwrap(), "-1.5");
        assert_eq!(
            Instant::from_str("-1.5", Format::EpochSeconds).unwrap(),
            instant
        );
    }

    #[test]
    #[should_panic]
    fn too_many_nanos() {
        Instant::from_secs_and_nanos(0, 1_000_000_000);
    }
}
