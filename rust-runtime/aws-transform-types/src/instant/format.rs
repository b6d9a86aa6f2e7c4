/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::error::Error as StdError;
use std::fmt;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
enum InstantParseErrorKind {
    /// The timestamp is in an incorrect format.
    Invalid(&'static str),
    /// A numeric component failed to parse.
    IntParseError,
}

/// Failure to parse an `Instant` from a string.
#[derive(Debug, Eq, PartialEq)]
pub struct InstantParseError {
    kind: InstantParseErrorKind,
}

impl InstantParseError {
    fn invalid(message: &'static str) -> Self {
        InstantParseErrorKind::Invalid(message).into()
    }
}

impl StdError for InstantParseError {}

impl fmt::Display for InstantParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InstantParseErrorKind::*;
        match &self.kind {
            Invalid(msg) => write!(f, "invalid timestamp: {}", msg),
            IntParseError => write!(f, "failed to parse int"),
        }
    }
}

impl From<InstantParseErrorKind> for InstantParseError {
    fn from(kind: InstantParseErrorKind) -> Self {
        Self { kind }
    }
}

/// Reads up to nine ASCII digits of a decimal fraction and scales them to nanoseconds.
fn parse_fraction(digits: &str) -> Result<u32, InstantParseError> {
    if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InstantParseError::invalid("malformed fractional seconds"));
    }
    let value: u32 = digits
        .parse()
        .map_err(|_| InstantParseError::from(InstantParseErrorKind::IntParseError))?;
    Ok(value * 10u32.pow(9 - digits.len() as u32))
}

pub(crate) mod epoch_seconds {
    use super::{parse_fraction, InstantParseError, InstantParseErrorKind, NANOS_PER_SECOND};
    use crate::Instant;

    /// Formats as whole seconds with the fraction trimmed of trailing zeros, e.g. `5.2`.
    pub(crate) fn format(instant: &Instant) -> String {
        let nanos = instant.subsec_nanos();
        if nanos == 0 {
            return instant.secs().to_string();
        }
        let (sign, whole, fraction) = if instant.secs() < 0 {
            // -2s + 0.5s is written as -1.5
            ("-", -(instant.secs() + 1), NANOS_PER_SECOND - nanos)
        } else {
            ("", instant.secs(), nanos)
        };
        let fraction = format!("{:0>9}", fraction);
        format!("{}{}.{}", sign, whole, fraction.trim_end_matches('0'))
    }

    pub(crate) fn parse(s: &str) -> Result<Instant, InstantParseError> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InstantParseError::invalid("expected epoch seconds"));
        }
        let seconds: i64 = whole
            .parse()
            .map_err(|_| InstantParseError::from(InstantParseErrorKind::IntParseError))?;
        let nanos = fraction.map(parse_fraction).transpose()?.unwrap_or(0);
        Ok(match (negative, nanos) {
            (false, _) => Instant::from_secs_and_nanos(seconds, nanos),
            (true, 0) => Instant::from_secs(-seconds),
            (true, nanos) => Instant::from_secs_and_nanos(-seconds - 1, NANOS_PER_SECOND - nanos),
        })
    }
}

pub(crate) mod epoch_millis {
    use super::{InstantParseError, InstantParseErrorKind};
    use crate::Instant;

    pub(crate) fn parse(s: &str) -> Result<Instant, InstantParseError> {
        let millis: i64 = s
            .parse()
            .map_err(|_| InstantParseError::from(InstantParseErrorKind::IntParseError))?;
        Ok(Instant::from_millis(millis))
    }
}

pub(crate) mod date_time {
    use super::InstantParseError;
    use crate::instant::ConversionError;
    use crate::Instant;
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    /// Ok: "2019-12-16T23:48:18Z"
    /// Ok: "2019-12-16T23:48:18.52Z"
    pub(crate) fn format(instant: &Instant) -> Result<String, ConversionError> {
        let date_time = OffsetDateTime::from_unix_timestamp(instant.secs())
            .map_err(|_| ConversionError("instant is out of range for a date-time"))?;
        let year = date_time.year();
        if !(0..=9999).contains(&year) {
            return Err(ConversionError(
                "date-time years must be representable with four digits",
            ));
        }
        let mut out = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year,
            u8::from(date_time.month()),
            date_time.day(),
            date_time.hour(),
            date_time.minute(),
            date_time.second(),
        );
        if instant.has_subsec_nanos() {
            let fraction = format!("{:0>9}", instant.subsec_nanos());
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push('Z');
        Ok(out)
    }

    pub(crate) fn parse(s: &str) -> Result<Instant, InstantParseError> {
        let date_time = OffsetDateTime::parse(s.trim(), &Rfc3339)
            .map_err(|_| InstantParseError::invalid("expected an RFC-3339 date-time"))?;
        Ok(Instant::from_secs_and_nanos(
            date_time.unix_timestamp(),
            date_time.nanosecond(),
        ))
    }
}
