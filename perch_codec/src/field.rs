// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-text entry that commits on blur.

use alloc::string::String;
use core::fmt;

use crate::{CodecError, DateCodec, ValueCodec};

/// Result of committing a [`TextField`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commit<V> {
    /// The text still shows the committed value; nothing to report.
    Unchanged,
    /// The text parsed to a new value; request the change.
    Changed(V),
    /// The text was rejected and the display reverted; do not request a change.
    Reverted(CodecError),
}

/// Display text for one value, edited freely and committed on blur.
///
/// A rejected entry reverts to the last committed value, so the field never shows
/// text for a value the consumer does not hold.
pub struct TextField<C: ValueCodec> {
    codec: C,
    text: String,
    committed: Option<C::Value>,
}

/// Free-text entry for a [`DateCodec`].
pub type DateField = TextField<DateCodec>;

impl<C: ValueCodec> TextField<C>
where
    C::Value: Clone + PartialEq,
{
    /// Creates a field showing `value`.
    pub fn new(codec: C, value: Option<C::Value>) -> Self {
        let mut field = Self {
            codec,
            text: String::new(),
            committed: None,
        };
        field.sync(value);
        field
    }

    /// The codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Replaces the codec, keeping the committed value.
    pub fn set_codec(&mut self, codec: C) {
        self.codec = codec;
        self.revert();
    }

    /// The text currently shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last committed value.
    pub fn committed(&self) -> Option<&C::Value> {
        self.committed.as_ref()
    }

    /// Whether the text differs from the committed value's display form.
    pub fn is_dirty(&self) -> bool {
        self.text != self.display()
    }

    /// Replaces the committed value with one supplied by the consumer.
    pub fn sync(&mut self, value: Option<C::Value>) {
        self.committed = value;
        self.revert();
    }

    /// Records typed text without parsing it.
    pub fn input(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Restores the committed value's display text.
    pub fn revert(&mut self) {
        self.text = self.display();
    }

    /// Parses the text on blur.
    ///
    /// A successful parse of a different value becomes the committed value and is
    /// returned for the change request. Anything else reverts the text.
    pub fn commit(&mut self) -> Commit<C::Value> {
        if !self.is_dirty() {
            return Commit::Unchanged;
        }
        match self.codec.parse(&self.text) {
            Ok(value) if self.committed.as_ref() == Some(&value) => {
                self.revert();
                Commit::Unchanged
            }
            Ok(value) => {
                self.committed = Some(value.clone());
                self.revert();
                Commit::Changed(value)
            }
            Err(err) => {
                log::debug!("reverting field entry: {err}");
                self.revert();
                Commit::Reverted(err)
            }
        }
    }

    fn display(&self) -> String {
        self.committed
            .as_ref()
            .map(|v| self.codec.format(v))
            .unwrap_or_default()
    }
}

impl<C> fmt::Debug for TextField<C>
where
    C: ValueCodec + fmt::Debug,
    C::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("codec", &self.codec)
            .field("text", &self.text)
            .field("committed", &self.committed)
            .finish()
    }
}
