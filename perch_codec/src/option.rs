// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Codecs for option-valued fields.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{CodecError, ValueCodec};

/// Identity codec over a fixed set of option values.
///
/// Parsing succeeds only for a value that is offered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionCodec {
    values: Vec<String>,
}

impl OptionCodec {
    /// Creates a codec accepting exactly `values`.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `value` is one of the offered values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// The offered values, in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl ValueCodec for OptionCodec {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String, CodecError> {
        if text.is_empty() {
            return Err(CodecError::Empty);
        }
        if self.contains(text) {
            Ok(text.to_string())
        } else {
            Err(CodecError::UnknownOption(text.to_string()))
        }
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}

/// An ordered set of selected option values.
///
/// Members keep the order they were added in. Removing the only member is refused,
/// so a multi-select that has a value never drops to none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    values: Vec<String>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from external values, dropping duplicates.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for value in values {
            selection.insert(value.into());
        }
        selection
    }

    /// Whether `value` is selected.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Selected values in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Consumes the selection, returning the external value.
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    /// Adds `value`. Returns `false` if it was already selected.
    pub fn insert(&mut self, value: String) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Removes `value`. Returns `false` if it was not selected or is the last member.
    pub fn remove(&mut self, value: &str) -> bool {
        let Some(at) = self.values.iter().position(|v| v == value) else {
            return false;
        };
        if self.values.len() == 1 {
            log::debug!("refusing to remove `{value}`, the last selected value");
            return false;
        }
        self.values.remove(at);
        true
    }

    /// Removes `value` if selected, otherwise adds it. Returns `true` on change.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.remove(value)
        } else {
            self.insert(value.to_string())
        }
    }
}

/// Comma-separated text form of a multi-selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MultiValueCodec;

impl ValueCodec for MultiValueCodec {
    type Value = Selection;

    fn parse(&self, text: &str) -> Result<Selection, CodecError> {
        let selection = Selection::from_values(
            text.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty()),
        );
        if selection.is_empty() {
            Err(CodecError::Empty)
        } else {
            Ok(selection)
        }
    }

    fn format(&self, value: &Selection) -> String {
        value.values().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn option_codec_accepts_only_offered_values() {
        let codec = OptionCodec::new(["apple", "pear"]);
        assert_eq!(codec.parse("pear"), Ok("pear".to_string()));
        assert_eq!(
            codec.parse("plum"),
            Err(CodecError::UnknownOption("plum".to_string()))
        );
        assert_eq!(codec.parse(""), Err(CodecError::Empty));
    }

    #[test]
    fn last_member_cannot_be_removed() {
        let mut selection = Selection::from_values(["a", "b"]);
        assert!(selection.toggle("a"));
        assert_eq!(selection.values(), &["b".to_string()]);
        assert!(!selection.toggle("b"));
        assert!(!selection.remove("b"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn first_member_may_be_added_to_empty() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(!selection.insert("a".to_string()));
        assert!(!selection.remove("missing"));
    }

    #[test]
    fn comma_separated_text() {
        let codec = MultiValueCodec;
        let selection = codec.parse(" a, b ,,a").unwrap();
        assert_eq!(selection.clone().into_values(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(codec.format(&selection), "a, b");
        assert_eq!(codec.parse(" , "), Err(CodecError::Empty));
    }
}
