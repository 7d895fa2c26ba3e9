// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Naive calendar dates.
//!
//! Dates are handled as year/month/day integers via [`NaiveDate`] and never pass
//! through a timestamp, so no timezone can shift the day.

use alloc::format;
use alloc::string::{String, ToString};

use chrono::{Datelike, NaiveDate};

use crate::{CodecError, ValueCodec};

/// Text layouts tried after the numeric ones, for pasted or spelled-out dates.
const TEXT_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%d %B %Y"];

/// Parses and formats dates for a date field with optional bounds.
///
/// Display text is `DD/MM/YYYY`. Parsing tries, in order:
/// 1. `DD/MM/YYYY` (also `DD.MM.YYYY`),
/// 2. ISO `YYYY-MM-DD` (also `YYYY/MM/DD`),
/// 3. spelled-out forms such as `Mar 5, 2024` or `5 March 2024`.
///
/// Numeric components must name a real day: `31/02/2024` is an
/// [`InvalidDate`](CodecError::InvalidDate), not the 2nd of March.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateCodec {
    /// Earliest accepted date, inclusive.
    pub min: Option<NaiveDate>,
    /// Latest accepted date, inclusive.
    pub max: Option<NaiveDate>,
}

impl DateCodec {
    /// Creates a codec with the given inclusive bounds.
    #[must_use]
    pub const fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    /// Whether `date` lies within the bounds.
    #[must_use]
    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }

    /// Parses text without checking the bounds.
    pub fn parse_unbounded(&self, text: &str) -> Result<NaiveDate, CodecError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CodecError::Empty);
        }
        for (sep, year_first) in [('/', false), ('.', false), ('-', true), ('/', true)] {
            if let Some(parts) = numeric_triple(text, sep, year_first) {
                return parts;
            }
        }
        TEXT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .ok_or_else(|| CodecError::Unrecognized(text.to_string()))
    }

    /// Long display form such as `Mar 5, 2024`, used for trigger labels.
    #[must_use]
    pub fn format_long(&self, date: NaiveDate) -> String {
        date.format("%b %-d, %Y").to_string()
    }
}

impl ValueCodec for DateCodec {
    type Value = NaiveDate;

    fn parse(&self, text: &str) -> Result<NaiveDate, CodecError> {
        let date = self.parse_unbounded(text)?;
        if self.in_range(date) {
            Ok(date)
        } else {
            log::debug!("date {date} rejected by bounds {:?}..={:?}", self.min, self.max);
            Err(CodecError::OutOfRange(encode_iso(date)))
        }
    }

    fn format(&self, value: &NaiveDate) -> String {
        format!("{:02}/{:02}/{:04}", value.day(), value.month(), value.year())
    }
}

/// Decodes an external `YYYY-MM-DD` value.
///
/// Bounds are not checked: the consumer owns the value.
pub fn decode_iso(value: &str) -> Result<NaiveDate, CodecError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CodecError::Empty);
    }
    numeric_triple(value, '-', true)
        .unwrap_or_else(|| Err(CodecError::Unrecognized(value.to_string())))
}

/// Encodes a date as an external `YYYY-MM-DD` value.
#[must_use]
pub fn encode_iso(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Splits `text` into three all-digit components around `sep`.
///
/// Returns `None` when the shape does not match, so the caller can try the next
/// layout, and `Some(Err(_))` when the shape matches but the day does not exist.
fn numeric_triple(
    text: &str,
    sep: char,
    year_first: bool,
) -> Option<Result<NaiveDate, CodecError>> {
    let mut parts = text.split(sep);
    let (a, b, c) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (year, month, day) = if year_first { (a, b, c) } else { (c, b, a) };
    if year.len() != 4 || !(1..=2).contains(&month.len()) || !(1..=2).contains(&day.len()) {
        return None;
    }
    let year: i32 = digits(year)?;
    let month: u32 = digits(month)?;
    let day: u32 = digits(day)?;
    Some(
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CodecError::InvalidDate { year, month, day }),
    )
}

fn digits<T: core::str::FromStr>(s: &str) -> Option<T> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
