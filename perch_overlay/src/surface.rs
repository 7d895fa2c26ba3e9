// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only layout queries answered by the host.

use hashbrown::HashMap;
use kurbo::Rect;
use perch_placement::ViewportMetrics;

/// Identifies an anchor (trigger control) within a [`Surface`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// Fresh layout information for positioning passes.
///
/// Overlays call these on every open, scroll and resize; implementations should
/// answer from current layout rather than a value cached at open time.
pub trait Surface {
    /// Current viewport size and scroll offset.
    fn viewport(&self) -> ViewportMetrics;

    /// Current bounds of `anchor` in viewport coordinates, or `None` if it is no
    /// longer mounted.
    fn anchor_bounds(&self, anchor: AnchorId) -> Option<Rect>;
}

impl<T: Surface + ?Sized> Surface for &T {
    fn viewport(&self) -> ViewportMetrics {
        (**self).viewport()
    }

    fn anchor_bounds(&self, anchor: AnchorId) -> Option<Rect> {
        (**self).anchor_bounds(anchor)
    }
}

/// A [`Surface`] built from layout results the host pushes in each frame.
#[derive(Clone, Debug)]
pub struct SurfaceSnapshot {
    viewport: ViewportMetrics,
    anchors: HashMap<AnchorId, Rect>,
}

impl SurfaceSnapshot {
    /// Creates a snapshot with no anchors.
    #[must_use]
    pub fn new(viewport: ViewportMetrics) -> Self {
        Self {
            viewport,
            anchors: HashMap::new(),
        }
    }

    /// Replaces the viewport metrics.
    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    /// Scrolls the page to the given offset.
    pub fn scroll_to(&mut self, scroll_x: f64, scroll_y: f64) {
        self.viewport.scroll_x = scroll_x;
        self.viewport.scroll_y = scroll_y;
    }

    /// Records the current bounds of an anchor.
    pub fn set_anchor(&mut self, anchor: AnchorId, bounds: Rect) {
        self.anchors.insert(anchor, bounds);
    }

    /// Forgets an anchor, as when its control unmounts.
    pub fn remove_anchor(&mut self, anchor: AnchorId) -> Option<Rect> {
        self.anchors.remove(&anchor)
    }
}

impl Surface for SurfaceSnapshot {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn anchor_bounds(&self, anchor: AnchorId) -> Option<Rect> {
        self.anchors.get(&anchor).copied()
    }
}
