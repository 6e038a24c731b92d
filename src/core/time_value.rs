//! Legacy decimal time values and their structured replacement.
//!
//! The legacy encoding stores a duration as `minutes.seconds`, but the
//! fractional digit string is read as a literal seconds count rather than a
//! decimal fraction: `19.05` is 19:05, `19.1` is 19:10 and `16.57` is 16:57.
//! A one-digit fraction is therefore implicitly scaled by ten while a
//! two-digit one is taken as written. That asymmetry is the whole point of
//! the encoding and is reproduced exactly here.

use super::errors::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes and seconds as two explicit fields.
///
/// `seconds` is never normalized into minutes; a legacy `3.75` becomes
/// `{ minutes: 3, seconds: 75 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuredTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl StructuredTime {
    pub fn new(minutes: u64, seconds: u64) -> Self {
        Self { minutes, seconds }
    }
}

/// Renders the host-language object literal, `{ minutes: M, seconds: S }`.
impl fmt::Display for StructuredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ minutes: {}, seconds: {} }}",
            self.minutes, self.seconds
        )
    }
}

/// A legacy numeric literal as found in the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyTime(f64);

impl LegacyTime {
    /// Parse a literal such as `19.05`, `.5` or `20`.
    pub fn parse(literal: &str) -> Result<Self, ConversionError> {
        let trimmed = literal.trim();
        // f64's parser also accepts "inf", "NaN" and exponents; the legacy
        // data only ever holds digits and a point.
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(ConversionError::malformed(literal));
        }
        trimmed
            .parse::<f64>()
            .map(Self)
            .map_err(|_| ConversionError::malformed(literal))
    }

    pub fn to_structured(self) -> Result<StructuredTime, ConversionError> {
        convert(self.0)
    }
}

/// Canonical decimal text for `value`: shortest round-trip digits, never an
/// exponent, and no trailing `.0` on integral values.
fn render_decimal(value: f64) -> Result<String, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFinite(value));
    }
    if value.is_sign_negative() && value != 0.0 {
        return Err(ConversionError::Negative(value));
    }
    // `-0.0` displays as "-0"
    Ok(format!("{}", value.abs()))
}

fn parse_digits(digits: &str, rendered: &str) -> Result<u64, ConversionError> {
    digits.parse::<u64>().map_err(|_| ConversionError::OutOfRange {
        rendered: rendered.to_string(),
    })
}

/// Convert a legacy decimal time into minutes and seconds.
///
/// ```
/// use mptime::core::time_value::{convert, StructuredTime};
///
/// assert_eq!(convert(19.1).unwrap(), StructuredTime::new(19, 10));
/// assert_eq!(convert(19.05).unwrap(), StructuredTime::new(19, 5));
/// assert_eq!(convert(20.0).unwrap(), StructuredTime::new(20, 0));
/// ```
pub fn convert(value: f64) -> Result<StructuredTime, ConversionError> {
    let rendered = render_decimal(value)?;

    match rendered.split_once('.') {
        Some((whole, fraction)) => {
            let digits = parse_digits(fraction, &rendered)?;
            // A lone tenths digit stands for tens of seconds
            let seconds = if fraction.len() == 1 { digits * 10 } else { digits };
            Ok(StructuredTime {
                minutes: parse_digits(whole, &rendered)?,
                seconds,
            })
        }
        None => Ok(StructuredTime {
            minutes: parse_digits(&rendered, &rendered)?,
            seconds: 0,
        }),
    }
}

/// Parse a legacy literal and convert it in one step.
pub fn convert_literal(literal: &str) -> Result<StructuredTime, ConversionError> {
    LegacyTime::parse(literal)?.to_structured()
}
