//! Numeric narrowing and rounding.
//!
//! Integer cells hold an `i64`; most consumers want something narrower. The
//! `to_*` functions are checked narrowings that raise [`ErrorKind::OutOfRange`]
//! with the offending value. [`round_to_int`] is the one saturating path,
//! used wherever a decimal has to become an integer.
//!
//! [`ErrorKind::OutOfRange`]: crate::ErrorKind::OutOfRange

use crate::cell::Cell;
use crate::errors::{not_numeric, out_of_range, RuntimeError};
use crate::kind::Kind;

#[inline]
pub fn to_int32(value: i64) -> Result<i32, RuntimeError> {
    i32::try_from(value).map_err(|_| out_of_range(value))
}

#[inline]
pub fn to_uint32(value: i64) -> Result<u32, RuntimeError> {
    u32::try_from(value).map_err(|_| out_of_range(value))
}

#[inline]
pub fn to_byte(value: i64) -> Result<u8, RuntimeError> {
    u8::try_from(value).map_err(|_| out_of_range(value))
}

/// Clamp into the `i32` range, then round half up (`floor(d + 0.5)`).
///
/// Ties go toward positive infinity: `2.5 -> 3`, `-2.5 -> -2`. NaN maps to 0.
#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped into i32 range before the cast"
)]
pub fn round_to_int(d: f64) -> i32 {
    if d.is_nan() {
        return 0;
    }
    let clamped = d.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    let rounded = (clamped + 0.5).floor();
    rounded.min(f64::from(i32::MAX)) as i32
}

#[allow(clippy::cast_precision_loss, reason = "decimal conversion is lossy by definition")]
#[inline]
pub fn int_to_decimal(value: i64) -> f64 {
    value as f64
}

#[inline]
pub fn decimal_to_int(d: f64) -> i32 {
    round_to_int(d)
}

/// Round half up into an `i64`, failing when the result does not fit.
#[allow(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast; the error value saturates"
)]
pub fn to_int64_from_decimal(d: f64) -> Result<i64, RuntimeError> {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let rounded = (d + 0.5).floor();
    if rounded.is_nan() || rounded < -LIMIT || rounded >= LIMIT {
        return Err(out_of_range(rounded as i64));
    }
    Ok(rounded as i64)
}

/// Integer value of a numeric cell (decimals round via [`round_to_int`]).
pub fn int_of(cell: &Cell) -> Result<i64, RuntimeError> {
    match cell.kind() {
        Kind::Integer => Ok(cell.as_integer()),
        Kind::Decimal => Ok(i64::from(round_to_int(cell.as_decimal()))),
        other => Err(not_numeric(other)),
    }
}

/// Decimal value of a numeric cell.
pub fn decimal_of(cell: &Cell) -> Result<f64, RuntimeError> {
    match cell.kind() {
        Kind::Integer => Ok(int_to_decimal(cell.as_integer())),
        Kind::Decimal => Ok(cell.as_decimal()),
        other => Err(not_numeric(other)),
    }
}
