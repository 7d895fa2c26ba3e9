// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure placement computation.

use kurbo::{Rect, Size, Vec2};

/// Viewport size and scroll offset, read fresh for every positioning pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Visible width of the viewport.
    pub width: f64,
    /// Visible height of the viewport.
    pub height: f64,
    /// Horizontal scroll offset of the page.
    pub scroll_x: f64,
    /// Vertical scroll offset of the page.
    pub scroll_y: f64,
}

impl ViewportMetrics {
    /// Creates metrics for an unscrolled viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Returns these metrics with the given scroll offset.
    #[must_use]
    pub const fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    /// The scroll offset as a vector, for converting between viewport and page space.
    #[must_use]
    pub const fn scroll(&self) -> Vec2 {
        Vec2::new(self.scroll_x, self.scroll_y)
    }
}

/// Tunables shared by every overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Minimum distance kept between the panel and the viewport edges.
    pub margin: f64,
    /// Distance between the anchor and the panel.
    pub gap: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            gap: 4.0,
        }
    }
}

/// Where a panel goes, in page coordinates.
///
/// Placements are recomputed wholesale on every pass, never patched field by field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelPlacement {
    /// Top edge of the panel.
    pub top: f64,
    /// Left edge of the panel.
    pub left: f64,
    /// Width of the panel (at least the anchor width).
    pub width: f64,
    /// Whether the panel opens below its anchor.
    pub open_below: bool,
}

impl PanelPlacement {
    /// Returns the panel box in page coordinates for a panel of the given height.
    #[must_use]
    pub fn rect(&self, height: f64) -> Rect {
        Rect::from_origin_size((self.left, self.top), (self.width, height.max(0.0)))
    }

    /// Returns the panel box in viewport coordinates, undoing the scroll offset.
    #[must_use]
    pub fn to_viewport(&self, height: f64, viewport: &ViewportMetrics) -> Rect {
        self.rect(height) - viewport.scroll()
    }
}

/// Computes the placement of a panel anchored to `anchor`.
///
/// `anchor` is in viewport coordinates; the result is in page coordinates.
/// The panel opens below when `panel.height` fits there, otherwise on the side with
/// strictly more room (an exact tie opens above). Its left edge is clamped to
/// `[margin, viewport.width + scroll_x - width - margin]`; when the panel is wider than
/// the viewport allows, the lower bound wins and the panel overflows to the right.
#[must_use]
pub fn compute_placement(
    anchor: Rect,
    viewport: &ViewportMetrics,
    panel: Size,
    config: &PlacementConfig,
) -> PanelPlacement {
    let PlacementConfig { margin, gap } = *config;

    let space_below = viewport.height - anchor.y1 - margin;
    let space_above = anchor.y0 - margin;
    let open_below = space_below >= panel.height || space_below > space_above;

    let top = if open_below {
        anchor.y1 + viewport.scroll_y + gap
    } else {
        (anchor.y0 + viewport.scroll_y - panel.height - gap).max(margin)
    };

    let width = panel.width.max(anchor.width());
    // `f64::clamp` panics on an inverted interval; min-then-max lets the margin win.
    let right_limit = viewport.width + viewport.scroll_x - width - margin;
    let left = (anchor.x0 + viewport.scroll_x).min(right_limit).max(margin);

    PanelPlacement {
        top,
        left,
        width,
        open_below,
    }
}
