// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel size estimates used before a panel has been measured.

use kurbo::Size;

/// How a widget estimates the size of its panel before rendering it.
///
/// The estimate only drives the flip decision and the horizontal clamp; the final
/// width is always widened to the anchor width by [`compute_placement`](crate::compute_placement).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PanelEstimate {
    /// A panel of constant size, such as a calendar or a time grid.
    Fixed(Size),
    /// A list panel that grows with its row count up to `max_height`.
    Rows {
        /// Height of one row.
        row_height: f64,
        /// Fixed extra height (padding, an embedded search field).
        chrome: f64,
        /// Upper bound on the panel height.
        max_height: f64,
        /// Minimum panel width; `0.0` means "as wide as the anchor".
        width: f64,
    },
}

impl PanelEstimate {
    /// Calendar panel of a date picker.
    pub const CALENDAR: Self = Self::Fixed(Size::new(280.0, 320.0));

    /// Spinner and preset panel of a time picker.
    pub const TIME_GRID: Self = Self::Fixed(Size::new(320.0, 400.0));

    /// Option list of a plain or multi-select.
    pub const OPTION_LIST: Self = Self::Rows {
        row_height: 40.0,
        chrome: 16.0,
        max_height: 300.0,
        width: 0.0,
    };

    /// Option list topped by a search field.
    pub const SEARCHABLE_LIST: Self = Self::Rows {
        row_height: 36.0,
        chrome: 48.0,
        max_height: 280.0,
        width: 0.0,
    };

    /// Returns the estimated panel size for `rows` visible candidates.
    #[must_use]
    pub fn size(&self, rows: usize) -> Size {
        match *self {
            Self::Fixed(size) => size,
            Self::Rows {
                row_height,
                chrome,
                max_height,
                width,
            } => {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Row counts of a dropdown are far below 2^52"
                )]
                let content = rows as f64 * row_height + chrome;
                Size::new(width, content.min(max_height))
            }
        }
    }
}
