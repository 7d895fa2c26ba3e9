// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay state machine.

use kurbo::{Point, Rect, Size};
use perch_placement::{PanelPlacement, PlacementConfig, PlacementResolver, compute_placement};

use crate::{AnchorId, ListenerGuard, ListenerHost, ListenerKinds, Surface};

/// Whether an overlay's panel is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    /// No panel, no listeners.
    #[default]
    Closed,
    /// Panel shown and positioned; listeners registered.
    Open,
}

/// Page-level events forwarded by the host while an overlay listens.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// A pointer was pressed at a position in viewport coordinates.
    PointerDown(Point),
    /// The Escape key was pressed.
    EscapeKey,
    /// Something scrolled, the page or a nested container.
    Scroll,
    /// The window was resized.
    Resize,
}

/// Why an open overlay closed on its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// A pointer was pressed outside both the anchor and the panel.
    OutsidePointer,
    /// Escape was pressed.
    Escape,
    /// The anchor disappeared from the surface.
    AnchorLost,
}

/// Result of an open request or a forwarded event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OverlayResponse {
    /// The overlay opened with this placement.
    Opened(PanelPlacement),
    /// The overlay stayed open and now uses this placement.
    Repositioned(PanelPlacement),
    /// The overlay closed on its own.
    Dismissed(DismissReason),
    /// The overlay closed on request.
    Closed,
    /// Nothing changed.
    Ignored,
}

impl OverlayResponse {
    /// Whether the host needs to redraw the panel.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Lifecycle controller for one anchored floating panel.
///
/// ## Usage
///
/// - Construct with [`Overlay::new`], naming the anchor the panel hangs off and an
///   estimated panel size.
/// - Call [`Overlay::open`] from the trigger's click/keyboard handler.
/// - Forward page events with [`Overlay::handle_event`] while the host reports that
///   someone listens for them.
/// - Call [`Overlay::close`] after a committed selection.
///
/// Dropping an open overlay releases its listeners before the drop returns.
#[derive(Debug)]
pub struct Overlay<H: ListenerHost + Clone> {
    host: H,
    anchor: AnchorId,
    panel: Size,
    measured_height: Option<f64>,
    resolver: PlacementResolver,
    placement: Option<PanelPlacement>,
    listeners: Option<ListenerGuard<H>>,
}

impl<H: ListenerHost + Clone> Overlay<H> {
    /// Creates a closed overlay with the default [`PlacementConfig`].
    pub fn new(host: H, anchor: AnchorId, panel: Size) -> Self {
        Self::with_config(host, anchor, panel, PlacementConfig::default())
    }

    /// Creates a closed overlay with an explicit configuration.
    pub fn with_config(host: H, anchor: AnchorId, panel: Size, config: PlacementConfig) -> Self {
        Self {
            host,
            anchor,
            panel,
            measured_height: None,
            resolver: PlacementResolver::new(config),
            placement: None,
            listeners: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        if self.listeners.is_some() {
            OverlayState::Open
        } else {
            OverlayState::Closed
        }
    }

    /// Shorthand for `state() == OverlayState::Open`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.listeners.is_some()
    }

    /// The anchor this overlay hangs off.
    #[must_use]
    pub const fn anchor(&self) -> AnchorId {
        self.anchor
    }

    /// Current placement while open.
    #[must_use]
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement.filter(|_| self.is_open())
    }

    /// Placement configuration.
    #[must_use]
    pub const fn config(&self) -> &PlacementConfig {
        self.resolver.config()
    }

    /// Estimated panel size used for the next positioning pass.
    #[must_use]
    pub const fn panel_size(&self) -> Size {
        self.panel
    }

    /// Updates the estimated panel size, e.g. after a filter changed the row count.
    ///
    /// Takes effect on the next positioning pass; call [`reposition`](Self::reposition)
    /// to apply it immediately.
    pub fn set_panel_size(&mut self, panel: Size) {
        self.panel = panel;
    }

    /// Reports the rendered panel height, used to decide whether a press landed
    /// inside the panel. Cleared on close.
    pub fn set_panel_height(&mut self, height: Option<f64>) {
        self.measured_height = height;
    }

    /// Opens the overlay, positioning it and registering its listeners.
    ///
    /// Ignored when already open, or when the anchor is not on the surface.
    pub fn open(&mut self, surface: &impl Surface) -> OverlayResponse {
        if self.is_open() {
            log::trace!("overlay {:?} already open", self.anchor);
            return OverlayResponse::Ignored;
        }
        let Some(bounds) = surface.anchor_bounds(self.anchor) else {
            log::debug!("overlay {:?} has no anchor, not opening", self.anchor);
            return OverlayResponse::Ignored;
        };
        let viewport = surface.viewport();
        let placement = self
            .resolver
            .resolve(Some(bounds), &viewport, self.panel)
            .unwrap_or_else(|| compute_placement(bounds, &viewport, self.panel, self.config()));

        self.placement = Some(placement);
        self.listeners = Some(ListenerGuard::acquire(
            self.host.clone(),
            ListenerKinds::all(),
        ));
        log::debug!("overlay {:?} opened at {placement:?}", self.anchor);
        OverlayResponse::Opened(placement)
    }

    /// Closes the overlay, releasing its listeners. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        if self.listeners.take().is_none() {
            log::trace!("overlay {:?} already closed", self.anchor);
            return false;
        }
        self.placement = None;
        self.measured_height = None;
        self.resolver.reset();
        log::debug!("overlay {:?} closed", self.anchor);
        true
    }

    /// Opens when closed and closes when open.
    pub fn toggle(&mut self, surface: &impl Surface) -> OverlayResponse {
        if self.close() {
            OverlayResponse::Closed
        } else {
            self.open(surface)
        }
    }

    /// Recomputes the placement from fresh anchor bounds and viewport metrics.
    ///
    /// Closes the overlay if its anchor is gone. Ignored while closed.
    pub fn reposition(&mut self, surface: &impl Surface) -> OverlayResponse {
        if !self.is_open() {
            return OverlayResponse::Ignored;
        }
        let Some(bounds) = surface.anchor_bounds(self.anchor) else {
            return self.dismiss(DismissReason::AnchorLost);
        };
        match self
            .resolver
            .resolve(Some(bounds), &surface.viewport(), self.panel)
        {
            Some(placement) => {
                log::trace!("overlay {:?} repositioned to {placement:?}", self.anchor);
                self.placement = Some(placement);
                OverlayResponse::Repositioned(placement)
            }
            None => OverlayResponse::Ignored,
        }
    }

    /// Handles a forwarded page event.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> OverlayResponse {
        if !self.is_open() {
            return OverlayResponse::Ignored;
        }
        match event {
            OverlayEvent::PointerDown(position) => {
                if self.hit(position, surface) {
                    OverlayResponse::Ignored
                } else {
                    self.dismiss(DismissReason::OutsidePointer)
                }
            }
            OverlayEvent::EscapeKey => self.dismiss(DismissReason::Escape),
            OverlayEvent::Scroll | OverlayEvent::Resize => self.reposition(surface),
        }
    }

    /// Whether `position` (viewport coordinates) lies on the anchor or the open panel.
    #[must_use]
    pub fn hit(&self, position: Point, surface: &impl Surface) -> bool {
        let on_anchor = surface
            .anchor_bounds(self.anchor)
            .is_some_and(|bounds| contains(bounds, position));
        on_anchor || self.panel_rect(surface).is_some_and(|r| contains(r, position))
    }

    /// The panel box in viewport coordinates while open.
    #[must_use]
    pub fn panel_rect(&self, surface: &impl Surface) -> Option<Rect> {
        let height = self.measured_height.unwrap_or(self.panel.height);
        self.placement()
            .map(|p| p.to_viewport(height, &surface.viewport()))
    }

    fn dismiss(&mut self, reason: DismissReason) -> OverlayResponse {
        log::debug!("overlay {:?} dismissed: {reason:?}", self.anchor);
        self.close();
        OverlayResponse::Dismissed(reason)
    }
}

// Edges count as inside so a press on the border of the trigger does not dismiss.
fn contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListenerKind, ListenerRegistry, SurfaceSnapshot};
    use perch_placement::ViewportMetrics;

    const A: AnchorId = AnchorId(1);
    const B: AnchorId = AnchorId(2);
    const CALENDAR: Size = Size::new(280.0, 320.0);

    fn surface() -> SurfaceSnapshot {
        let mut s = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
        s.set_anchor(A, Rect::from_origin_size((100.0, 100.0), (200.0, 40.0)));
        s.set_anchor(B, Rect::from_origin_size((100.0, 700.0), (200.0, 40.0)));
        s
    }

    #[test]
    fn open_registers_four_listeners() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);

        assert_eq!(overlay.state(), OverlayState::Closed);
        assert!(overlay.placement().is_none());

        let response = overlay.open(&surface);
        assert!(matches!(response, OverlayResponse::Opened(p) if p.open_below));
        assert_eq!(overlay.state(), OverlayState::Open);
        for kind in ListenerKind::ALL {
            assert_eq!(registry.count(kind), 1, "{kind:?}");
        }
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);

        overlay.open(&surface);
        assert_eq!(overlay.open(&surface), OverlayResponse::Ignored);
        assert_eq!(registry.active_count(), 4);

        assert!(overlay.close());
        assert!(!overlay.close());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn repeated_cycles_do_not_leak() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        for _ in 0..50 {
            overlay.open(&surface);
            overlay.handle_event(OverlayEvent::EscapeKey, &surface);
            overlay.open(&surface);
            overlay.handle_event(OverlayEvent::PointerDown(Point::new(999.0, 799.0)), &surface);
            overlay.open(&surface);
            overlay.close();
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn drop_while_open_releases_listeners() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        {
            let mut overlay = Overlay::new(&registry, A, CALENDAR);
            overlay.open(&surface);
            assert_eq!(registry.active_count(), 4);
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn reopening_does_not_reuse_an_old_placement() {
        let registry = ListenerRegistry::new();
        let mut surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        let OverlayResponse::Opened(first) = overlay.open(&surface) else {
            panic!("expected open");
        };
        assert_eq!(first.top, 144.0);
        overlay.close();

        surface.scroll_to(0.0, 5000.0);
        surface.set_anchor(A, Rect::ZERO);
        let OverlayResponse::Opened(second) = overlay.open(&surface) else {
            panic!("expected open");
        };
        // Placed from the current metrics: 0 + 5000 scroll + 4 gap.
        assert_eq!(second.top, 5004.0);
        assert_eq!(second.left, 8.0);
        assert_ne!(second, first);
    }

    #[test]
    fn presses_on_anchor_or_panel_keep_it_open() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        overlay.open(&surface);

        // On the trigger.
        let r = overlay.handle_event(OverlayEvent::PointerDown(Point::new(150.0, 120.0)), &surface);
        assert_eq!(r, OverlayResponse::Ignored);
        // Inside the panel (top = 144, left = 100, 280 x 320).
        let r = overlay.handle_event(OverlayEvent::PointerDown(Point::new(350.0, 400.0)), &surface);
        assert_eq!(r, OverlayResponse::Ignored);
        assert!(overlay.is_open());

        // Below the panel.
        let r = overlay.handle_event(OverlayEvent::PointerDown(Point::new(350.0, 470.0)), &surface);
        assert_eq!(r, OverlayResponse::Dismissed(DismissReason::OutsidePointer));
    }

    #[test]
    fn measured_height_narrows_the_panel_hit_area() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        overlay.open(&surface);
        overlay.set_panel_height(Some(100.0));

        let r = overlay.handle_event(OverlayEvent::PointerDown(Point::new(150.0, 300.0)), &surface);
        assert_eq!(r, OverlayResponse::Dismissed(DismissReason::OutsidePointer));
    }

    #[test]
    fn scroll_recomputes_with_fresh_metrics() {
        let registry = ListenerRegistry::new();
        let mut surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        let OverlayResponse::Opened(before) = overlay.open(&surface) else {
            panic!("expected open");
        };

        surface.scroll_to(0.0, 50.0);
        surface.set_anchor(A, Rect::from_origin_size((100.0, 50.0), (200.0, 40.0)));
        let OverlayResponse::Repositioned(after) =
            overlay.handle_event(OverlayEvent::Scroll, &surface)
        else {
            panic!("expected reposition");
        };
        // The anchor moved up in the viewport by exactly the scroll delta, so the page
        // position of the panel is unchanged.
        assert_eq!(before.top, after.top);
        assert_eq!(overlay.placement(), Some(after));
    }

    #[test]
    fn resize_can_flip_the_panel() {
        let registry = ListenerRegistry::new();
        let mut surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        overlay.open(&surface);

        surface.set_anchor(A, Rect::from_origin_size((100.0, 380.0), (200.0, 40.0)));
        surface.set_viewport(ViewportMetrics::new(1000.0, 500.0));
        let r = overlay.handle_event(OverlayEvent::Resize, &surface);
        assert!(matches!(r, OverlayResponse::Repositioned(p) if !p.open_below));
    }

    #[test]
    fn lost_anchor_closes() {
        let registry = ListenerRegistry::new();
        let mut surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        overlay.open(&surface);

        surface.remove_anchor(A);
        let r = overlay.handle_event(OverlayEvent::Scroll, &surface);
        assert_eq!(r, OverlayResponse::Dismissed(DismissReason::AnchorLost));
        assert_eq!(registry.active_count(), 0);
        assert_eq!(overlay.open(&surface), OverlayResponse::Ignored);
    }

    #[test]
    fn collapsed_anchor_keeps_last_placement() {
        let registry = ListenerRegistry::new();
        let mut surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        let OverlayResponse::Opened(opened) = overlay.open(&surface) else {
            panic!("expected open");
        };

        surface.set_anchor(A, Rect::ZERO);
        let r = overlay.handle_event(OverlayEvent::Resize, &surface);
        assert_eq!(r, OverlayResponse::Repositioned(opened));
    }

    #[test]
    fn independent_overlays() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut a = Overlay::new(&registry, A, CALENDAR);
        let mut b = Overlay::new(&registry, B, CALENDAR);

        a.open(&surface);
        b.open(&surface);
        assert!(a.is_open() && b.is_open());
        assert_eq!(registry.active_count(), 8);

        let (pa, pb) = (a.placement().unwrap(), b.placement().unwrap());
        assert!(pa.open_below);
        assert!(!pb.open_below);
        assert_eq!(pb.top, 376.0);

        b.handle_event(OverlayEvent::EscapeKey, &surface);
        assert!(a.is_open());
        assert!(!b.is_open());
        assert_eq!(registry.active_count(), 4);
        assert_eq!(a.placement(), Some(pa));
    }

    #[test]
    fn events_while_closed_are_ignored() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        for event in [
            OverlayEvent::EscapeKey,
            OverlayEvent::Scroll,
            OverlayEvent::Resize,
            OverlayEvent::PointerDown(Point::ZERO),
        ] {
            assert_eq!(overlay.handle_event(event, &surface), OverlayResponse::Ignored);
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut overlay = Overlay::new(&registry, A, CALENDAR);
        assert!(overlay.toggle(&surface).changed());
        assert!(overlay.is_open());
        assert_eq!(overlay.toggle(&surface), OverlayResponse::Closed);
        assert!(!overlay.is_open());
    }
}
