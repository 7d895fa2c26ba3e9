// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Times of day on a 24-hour or 12-hour clock.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::{CodecError, ValueCodec};

/// Which clock face a time field shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HourFormat {
    /// `00`–`23`.
    #[default]
    H24,
    /// `1`–`12` with AM/PM.
    H12,
}

/// Half of a 12-hour day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    /// Before noon.
    Am,
    /// Noon and after.
    Pm,
}

impl Period {
    /// The other half of the day.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }

    /// `AM` or `PM`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// One adjustable part of a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// The hour, on the active clock face.
    Hour,
    /// The minute.
    Minute,
    /// AM/PM; only shown on a 12-hour face.
    Period,
}

impl TimeField {
    /// Fields shown for `format`, in tab order.
    #[must_use]
    pub const fn for_format(format: HourFormat) -> &'static [Self] {
        match format {
            HourFormat::H24 => &[Self::Hour, Self::Minute],
            HourFormat::H12 => &[Self::Hour, Self::Minute, Self::Period],
        }
    }
}

/// Increment or decrement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// One up, wrapping from the top of the range to the bottom.
    Up,
    /// One down, wrapping from the bottom of the range to the top.
    Down,
}

/// A 24-hour time with minute precision; the external value of a time field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// A time on a 12-hour face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clock12 {
    /// `1..=12`.
    pub hour: u8,
    /// `0..=59`.
    pub minute: u8,
    /// AM or PM.
    pub period: Period,
}

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Quick picks offered beside the spinners: 09:00, 12:00, 18:00 and 21:00.
    pub const PRESETS: [Self; 4] = [
        Self { hour: 9, minute: 0 },
        Self { hour: 12, minute: 0 },
        Self { hour: 18, minute: 0 },
        Self { hour: 21, minute: 0 },
    ];

    /// Creates a time, or `None` when either part is off the clock.
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Hour, `0..=23`.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Minute, `0..=59`.
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// The same time on a 12-hour face. `00` is 12 AM and `12` is 12 PM.
    #[must_use]
    pub const fn to_clock12(self) -> Clock12 {
        let period = if self.hour >= 12 { Period::Pm } else { Period::Am };
        let hour = match self.hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        Clock12 {
            hour,
            minute: self.minute,
            period,
        }
    }

    /// The 24-hour time for a 12-hour reading. Returns `None` off the face.
    #[must_use]
    pub const fn from_clock12(clock: Clock12) -> Option<Self> {
        if clock.hour == 0 || clock.hour > 12 {
            return None;
        }
        let hour = match (clock.hour, clock.period) {
            (12, Period::Am) => 0,
            (12, Period::Pm) => 12,
            (h, Period::Am) => h,
            (h, Period::Pm) => h + 12,
        };
        Self::new(hour, clock.minute)
    }

    /// Steps one field, wrapping within that field only.
    ///
    /// Hours wrap 23↔0 on a 24-hour face and 12↔1 on a 12-hour face with the period
    /// kept; minutes wrap 59↔0 without touching the hour; the period toggles without
    /// touching the hour reading.
    #[must_use]
    pub fn step(self, field: TimeField, step: Step, format: HourFormat) -> Self {
        match (field, format) {
            (TimeField::Minute, _) => Self {
                minute: wrap(self.minute, 0, 59, step),
                ..self
            },
            (TimeField::Hour, HourFormat::H24) => Self {
                hour: wrap(self.hour, 0, 23, step),
                ..self
            },
            (TimeField::Hour, HourFormat::H12) => {
                let clock = self.to_clock12();
                self.with_clock12(Clock12 {
                    hour: wrap(clock.hour, 1, 12, step),
                    ..clock
                })
            }
            (TimeField::Period, _) => {
                let clock = self.to_clock12();
                self.with_clock12(Clock12 {
                    period: clock.period.toggled(),
                    ..clock
                })
            }
        }
    }

    /// Sets one numeric field from direct entry, clamping to the field's range.
    ///
    /// The hour is read on the active face, so `0` becomes `1` on a 12-hour face.
    /// Setting [`TimeField::Period`] picks AM for `0` and PM otherwise.
    #[must_use]
    pub fn with_field(self, field: TimeField, value: i64, format: HourFormat) -> Self {
        match (field, format) {
            (TimeField::Minute, _) => Self {
                minute: clamp_u8(value, 0, 59),
                ..self
            },
            (TimeField::Hour, HourFormat::H24) => Self {
                hour: clamp_u8(value, 0, 23),
                ..self
            },
            (TimeField::Hour, HourFormat::H12) => self.with_clock12(Clock12 {
                hour: clamp_u8(value, 1, 12),
                ..self.to_clock12()
            }),
            (TimeField::Period, _) => self.with_clock12(Clock12 {
                period: if value == 0 { Period::Am } else { Period::Pm },
                ..self.to_clock12()
            }),
        }
    }

    /// Reads a field's numeric value on the active face.
    #[must_use]
    pub const fn field(self, field: TimeField, format: HourFormat) -> u8 {
        match (field, format) {
            (TimeField::Hour, HourFormat::H24) => self.hour,
            (TimeField::Hour, HourFormat::H12) => self.to_clock12().hour,
            (TimeField::Minute, _) => self.minute,
            (TimeField::Period, _) => match self.to_clock12().period {
                Period::Am => 0,
                Period::Pm => 1,
            },
        }
    }

    fn with_clock12(self, clock: Clock12) -> Self {
        Self::from_clock12(clock).unwrap_or(self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Reads the leading integer of a field entry, as typed into a spinner.
///
/// Anything without leading digits reads as `0`.
#[must_use]
pub fn entry_value(text: &str) -> i64 {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    // Longer runs saturate; the caller clamps anyway.
    text[..end].parse().unwrap_or(if end == 0 { 0 } else { i64::MAX })
}

/// Parses and formats times of day on a chosen face.
///
/// Parsing accepts both `HH:MM` and `h:MM AM/PM` regardless of the face; formatting
/// follows it (`09:30` or `09:30 AM`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeCodec {
    /// The face used for display.
    pub format: HourFormat,
}

impl TimeCodec {
    /// Creates a codec for `format`.
    #[must_use]
    pub const fn new(format: HourFormat) -> Self {
        Self { format }
    }
}

impl ValueCodec for TimeCodec {
    type Value = TimeOfDay;

    fn parse(&self, text: &str) -> Result<TimeOfDay, CodecError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CodecError::Empty);
        }
        let unrecognized = || CodecError::Unrecognized(String::from(text));

        let upper = text.to_ascii_uppercase();
        let (clock, period) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(Period::Am))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(Period::Pm))
        } else {
            (upper.as_str(), None)
        };

        let (h, m) = clock.split_once(':').ok_or_else(unrecognized)?;
        if !(1..=2).contains(&h.len()) || m.len() != 2 {
            return Err(unrecognized());
        }
        let digits = |s: &str| {
            s.bytes()
                .all(|b| b.is_ascii_digit())
                .then(|| s.parse::<u8>().ok())
                .flatten()
        };
        let (hour, minute) = (digits(h).ok_or_else(unrecognized)?, digits(m).ok_or_else(unrecognized)?);

        let time = match period {
            Some(period) => TimeOfDay::from_clock12(Clock12 {
                hour,
                minute,
                period,
            }),
            None => TimeOfDay::new(hour, minute),
        };
        time.ok_or(CodecError::InvalidTime {
            hour: hour.into(),
            minute: minute.into(),
        })
    }

    fn format(&self, value: &TimeOfDay) -> String {
        match self.format {
            HourFormat::H24 => format!("{value}"),
            HourFormat::H12 => {
                let clock = value.to_clock12();
                format!(
                    "{:02}:{:02} {}",
                    clock.hour,
                    clock.minute,
                    clock.period.as_str()
                )
            }
        }
    }
}

/// Decodes an external `HH:MM` value.
pub fn decode_hhmm(value: &str) -> Result<TimeOfDay, CodecError> {
    TimeCodec::new(HourFormat::H24).parse(value).and_then(|time| {
        if value.trim().len() == 5 {
            Ok(time)
        } else {
            Err(CodecError::Unrecognized(String::from(value)))
        }
    })
}

/// Encodes a time as an external `HH:MM` value.
#[must_use]
pub fn encode_hhmm(time: TimeOfDay) -> String {
    format!("{time}")
}

const fn wrap(value: u8, min: u8, max: u8, step: Step) -> u8 {
    match step {
        Step::Up if value >= max => min,
        Step::Up => value + 1,
        Step::Down if value <= min => max,
        Step::Down => value - 1,
    }
}

fn clamp_u8(value: i64, min: u8, max: u8) -> u8 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u8::try_from(clamped).unwrap_or(min)
}
