//! Telegram decoding for the sensor wire protocol.
//!
//! One telegram is one ASCII line (CR/LF already stripped by the transport)
//! holding exactly five comma-separated fields in fixed order:
//!
//! ```text
//! potentiometer,tempA,humidityA,tempB,humidityB
//! ```
//!
//! The sender marks a field it could not sample with a sentinel token:
//! `-1` for the integer potentiometer field, `nan` for the float
//! temperature/humidity fields. [`decode`] maps sentinels to
//! [`Sample::Unavailable`] so no numeric value ever doubles as "missing".
//!
//! Decoding is a pure function of the input text: no state, no side
//! effects, no range validation (out-of-calibration values are a gauge
//! concern, not a protocol concern).
//!
//! # Example
//!
//! ```rust
//! use meterpanel::telegram::{decode, Sample};
//!
//! let reading = decode("512,20.5,45.0,21.0,50.0").unwrap();
//! assert_eq!(reading.potentiometer, Sample::Value(512));
//! assert_eq!(reading.temp_a, Sample::Value(20.5));
//!
//! let reading = decode("-1,nan,60.0,nan,nan").unwrap();
//! assert_eq!(reading.potentiometer, Sample::Unavailable);
//! assert_eq!(reading.humidity_a, Sample::Value(60.0));
//! ```

use core::fmt;

/// Number of comma-separated fields in a well-formed telegram.
pub const FIELD_COUNT: usize = 5;

/// Sentinel token for an unavailable integer field.
pub const UNAVAILABLE_INT: &str = "-1";

/// Sentinel token for an unavailable float field.
pub const UNAVAILABLE_FLOAT: &str = "nan";

/// One sensor field: either a typed value or explicitly unavailable.
///
/// `Unavailable` is a distinct state, not a numeric value. Zero, negative
/// readings and even IEEE NaN (from a non-sentinel token such as `"NaN"`,
/// which the float parser accepts as a *value*) are all `Value`s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sample<T> {
    /// The sensor produced a valid value this cycle.
    Value(T),
    /// The sensor produced no valid value this cycle.
    Unavailable,
}

impl<T: Copy> Sample<T> {
    /// Returns `true` if this sample carries a value.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Sample::Value(_))
    }

    /// Returns the carried value, or `None` if unavailable.
    #[inline]
    pub fn value(&self) -> Option<T> {
        match self {
            Sample::Value(v) => Some(*v),
            Sample::Unavailable => None,
        }
    }
}

/// The decoded, typed snapshot of one telegram.
///
/// Exactly five fields in wire order. Partial availability across fields
/// is normal; each field stands alone.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Raw potentiometer channel (nominally 0–1023).
    pub potentiometer: Sample<i32>,
    /// First temperature sensor, degrees Celsius.
    pub temp_a: Sample<f32>,
    /// First humidity sensor, percent relative.
    pub humidity_a: Sample<f32>,
    /// Second temperature sensor, degrees Celsius.
    pub temp_b: Sample<f32>,
    /// Second humidity sensor, percent relative.
    pub humidity_b: Sample<f32>,
}

/// Why a telegram failed to decode.
///
/// Both variants are recoverable per cycle: the acquisition loop drops the
/// malformed reading and keeps running on the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The line did not split into exactly [`FIELD_COUNT`] fields.
    FieldCount {
        /// How many comma-separated fields were found.
        found: usize,
    },
    /// A field was neither its sentinel token nor a parseable number.
    FieldFormat {
        /// Zero-based position of the offending field.
        index: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::FieldCount { found } => {
                write!(f, "expected {} telegram fields, found {}", FIELD_COUNT, found)
            }
            DecodeError::FieldFormat { index } => {
                write!(f, "telegram field {} is not a valid number or sentinel", index)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes one raw telegram line into a typed [`Reading`].
///
/// The line must already have its trailing CR/LF stripped. Fails with
/// [`DecodeError::FieldCount`] unless splitting on `,` yields exactly five
/// fields, and with [`DecodeError::FieldFormat`] for any field that is
/// neither its sentinel token nor a well-formed number. No range checks
/// are applied.
///
/// # Example
///
/// ```rust
/// use meterpanel::telegram::{decode, DecodeError};
///
/// assert!(decode("512,20.5,45.0,21.0,50.0").is_ok());
/// assert_eq!(decode("1,2,3").unwrap_err(), DecodeError::FieldCount { found: 3 });
/// ```
pub fn decode(line: &str) -> Result<Reading, DecodeError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::FieldCount {
            found: fields.len(),
        });
    }

    Ok(Reading {
        potentiometer: int_field(fields[0], 0)?,
        temp_a: float_field(fields[1], 1)?,
        humidity_a: float_field(fields[2], 2)?,
        temp_b: float_field(fields[3], 3)?,
        humidity_b: float_field(fields[4], 4)?,
    })
}

fn int_field(token: &str, index: usize) -> Result<Sample<i32>, DecodeError> {
    if token == UNAVAILABLE_INT {
        return Ok(Sample::Unavailable);
    }
    token
        .parse::<i32>()
        .map(Sample::Value)
        .map_err(|_| DecodeError::FieldFormat { index })
}

fn float_field(token: &str, index: usize) -> Result<Sample<f32>, DecodeError> {
    if token == UNAVAILABLE_FLOAT {
        return Ok(Sample::Unavailable);
    }
    token
        .parse::<f32>()
        .map(Sample::Value)
        .map_err(|_| DecodeError::FieldFormat { index })
}
