// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display text written by a codec is accepted again.

use perch_codec::{
    DateCodec, HourFormat, NaiveDate, Step, TimeCodec, TimeField, TimeOfDay, ValueCodec,
    decode_hhmm, decode_iso, encode_hhmm, encode_iso,
};
use proptest::prelude::*;

fn dates() -> impl Strategy<Value = NaiveDate> {
    (1000_i32..=9999, 1_u32..=12, 1_u32..=31)
        .prop_filter_map("not a calendar day", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

fn times() -> impl Strategy<Value = TimeOfDay> {
    (0_u8..24, 0_u8..60).prop_filter_map("off the clock", |(h, m)| TimeOfDay::new(h, m))
}

fn fields() -> impl Strategy<Value = TimeField> {
    prop_oneof![
        Just(TimeField::Hour),
        Just(TimeField::Minute),
        Just(TimeField::Period)
    ]
}

fn formats() -> impl Strategy<Value = HourFormat> {
    prop_oneof![Just(HourFormat::H24), Just(HourFormat::H12)]
}

proptest! {
    #[test]
    fn dates_survive_display_and_iso(date in dates()) {
        let codec = DateCodec::default();
        prop_assert_eq!(codec.parse(&codec.format(&date)), Ok(date));
        prop_assert_eq!(decode_iso(&encode_iso(date)), Ok(date));
        prop_assert_eq!(codec.parse(&codec.format_long(date)), Ok(date));
    }

    #[test]
    fn times_survive_both_faces(time in times(), format in formats()) {
        let codec = TimeCodec::new(format);
        prop_assert_eq!(codec.parse(&codec.format(&time)), Ok(time));
        prop_assert_eq!(decode_hhmm(&encode_hhmm(time)), Ok(time));
    }

    #[test]
    fn a_step_touches_one_field(time in times(), field in fields(), format in formats(), up in any::<bool>()) {
        let step = if up { Step::Up } else { Step::Down };
        let back = if up { Step::Down } else { Step::Up };
        let moved = time.step(field, step, format);
        prop_assert_eq!(moved.step(field, back, format), time);
        match field {
            TimeField::Minute => prop_assert_eq!(moved.hour(), time.hour()),
            TimeField::Hour | TimeField::Period => prop_assert_eq!(moved.minute(), time.minute()),
        }
    }
}
