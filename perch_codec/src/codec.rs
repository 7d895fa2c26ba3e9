// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::CodecError;

/// Converts between a field's display text and its value.
///
/// `parse` accepts whatever the user may type; `format` produces the canonical
/// display text, which `parse` accepts again.
pub trait ValueCodec {
    /// The parsed value.
    type Value;

    /// Parses user text into a value.
    fn parse(&self, text: &str) -> Result<Self::Value, CodecError>;

    /// Formats a value as display text.
    fn format(&self, value: &Self::Value) -> String;
}

impl<C: ValueCodec + ?Sized> ValueCodec for &C {
    type Value = C::Value;

    fn parse(&self, text: &str) -> Result<Self::Value, CodecError> {
        (**self).parse(text)
    }

    fn format(&self, value: &Self::Value) -> String {
        (**self).format(value)
    }
}
