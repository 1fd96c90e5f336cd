//! Integer-to-attribute encodings for range proofs over dates. The core
//! never decides how raw attribute bytes become scalars (that is the
//! external credential layer's `computeXi`, consumed by
//! [`crate::credential`]); these two functions are the one place the core
//! *does* own a canonical encoding, because range proofs need an ordered
//! integer and a calendar date is not naturally one.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::ParameterError;

/// `(date.year - minYear) * 366 + date.dayOfYear`.
/// `dayOfYear` is one-based (1..=366), matching `chrono`'s
/// [`Datelike::ordinal`]. Fails if `date` predates `min_year`.
pub fn encode_year_and_day(date: NaiveDate, min_year: i32) -> Result<u32, ParameterError> {
    let year_offset = date.year().checked_sub(min_year).ok_or(ParameterError::MinExceedsMax {
        min: min_year as i64,
        max: date.year() as i64,
    })?;
    if year_offset < 0 {
        return Err(ParameterError::MinExceedsMax { min: min_year as i64, max: date.year() as i64 });
    }
    Ok(year_offset as u32 * 366 + date.ordinal())
}

/// `(date.dayOfYear - minDay) * 24 + date.hour`.
/// `min_day` is one-based, in the same units as [`Datelike::ordinal`].
pub fn encode_day_and_hour(date: NaiveDateTime, min_day: u32) -> Result<u32, ParameterError> {
    let day_offset =
        date.ordinal().checked_sub(min_day).ok_or(ParameterError::MinExceedsMax { min: min_day as i64, max: date.ordinal() as i64 })?;
    Ok(day_offset * 24 + date.hour())
}

/// The serialized form of either encoding: big-endian 4 bytes.
pub fn to_be_bytes(encoded: u32) -> [u8; 4] { encoded.to_be_bytes() }
