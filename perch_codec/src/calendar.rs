// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Month grid arithmetic for calendar panels.

use alloc::string::{String, ToString};

use chrono::{Datelike, NaiveDate};

/// One month of a calendar panel, weeks starting on Sunday.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthView {
    year: i32,
    month: u32,
}

impl MonthView {
    /// Creates a view of `month` (`1..=12`) in `year`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month, `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Empty cells before day 1 in a Sunday-first week row.
    #[must_use]
    pub fn leading_blanks(self) -> u32 {
        self.day(1)
            .map_or(0, |first| first.weekday().num_days_from_sunday())
    }

    /// Day `day` of the month, if it exists.
    #[must_use]
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Every day of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        (1..=self.days_in_month()).filter_map(move |d| self.day(d))
    }

    /// The month before, crossing into the previous year from January.
    #[must_use]
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    /// The month after, crossing into the next year from December.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    /// Heading such as `March 2024`.
    #[must_use]
    pub fn title(self) -> String {
        self.day(1)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}
