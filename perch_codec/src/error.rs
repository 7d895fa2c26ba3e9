// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Why a piece of text could not become a value.
///
/// The `Display` form is short enough to show as a field's validation message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Nothing was entered.
    #[error("a value is required")]
    Empty,
    /// The text matches none of the accepted forms.
    #[error("unrecognized value `{0}`")]
    Unrecognized(String),
    /// The components parsed but name no calendar day, such as 31/02/2024.
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        /// Year component as entered.
        year: i32,
        /// Month component as entered.
        month: u32,
        /// Day component as entered.
        day: u32,
    },
    /// The value is valid but falls outside the allowed bounds.
    #[error("{0} is outside the allowed range")]
    OutOfRange(String),
    /// The hour or minute is outside the clock.
    #[error("{hour:02}:{minute:02} is not a time of day")]
    InvalidTime {
        /// Hour component as entered.
        hour: u32,
        /// Minute component as entered.
        minute: u32,
    },
    /// The value is not one of the offered options.
    #[error("`{0}` is not an available option")]
    UnknownOption(String),
}
