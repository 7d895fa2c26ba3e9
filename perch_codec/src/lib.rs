// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Codec: converting between what a form field shows and the value it holds.
//!
//! Every picker keeps an external value owned by the consumer and a display form
//! the user sees or types. This crate provides:
//! - [`ValueCodec`]: the shared `parse`/`format` contract, failing with [`CodecError`].
//! - Options: [`OptionCodec`] for single selection, [`Selection`] and
//!   [`MultiValueCodec`] for multi-selection (a populated selection never empties).
//! - Dates: [`DateCodec`] (display `DD/MM/YYYY`, bounds), [`decode_iso`]/[`encode_iso`]
//!   for the external `YYYY-MM-DD` value, and [`MonthView`] for calendar grids.
//! - Times: [`TimeOfDay`] with per-field wrapping [`step`](TimeOfDay::step),
//!   [`TimeCodec`] for 24-hour and 12-hour faces, [`decode_hhmm`]/[`encode_hhmm`].
//! - [`TextField`]: free-text entry that commits on blur and reverts on rejection.
//!
//! ```rust
//! use perch_codec::{Commit, DateCodec, DateField, decode_iso, encode_iso};
//!
//! let value = decode_iso("2024-02-10").unwrap();
//! let mut field = DateField::new(DateCodec::default(), Some(value));
//! assert_eq!(field.text(), "10/02/2024");
//!
//! // 31 February does not exist: the entry is rejected and the text reverts.
//! field.input("31/02/2024");
//! assert!(matches!(field.commit(), Commit::Reverted(_)));
//! assert_eq!(field.text(), "10/02/2024");
//!
//! field.input("05/03/2024");
//! let Commit::Changed(date) = field.commit() else { unreachable!() };
//! assert_eq!(encode_iso(date), "2024-03-05");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod calendar;
mod codec;
mod date;
mod error;
mod field;
mod option;
mod time;

pub use calendar::MonthView;
pub use codec::ValueCodec;
pub use date::{DateCodec, decode_iso, encode_iso};
pub use error::CodecError;
pub use field::{Commit, DateField, TextField};
pub use option::{MultiValueCodec, OptionCodec, Selection};
pub use time::{
    Clock12, HourFormat, Period, Step, TimeCodec, TimeField, TimeOfDay, decode_hhmm, encode_hhmm,
    entry_value,
};

/// The chrono date type used for date values.
pub use chrono::NaiveDate;
