// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Overlay: the open/close lifecycle of one anchored floating panel.
//!
//! ## Overview
//!
//! An [`Overlay`] is a two-state machine, [`OverlayState::Closed`] and
//! [`OverlayState::Open`], owning everything that only exists while its panel is shown:
//!
//! - the current [`PanelPlacement`](perch_placement::PanelPlacement), recomputed on every
//!   scroll and resize before the host redraws;
//! - a [`ListenerGuard`] holding four registrations with the host: outside pointer-down,
//!   Escape, scroll (capture phase, so nested scroll regions are seen) and window resize.
//!
//! Opening acquires the guard and leaving [`OverlayState::Open`] drops it, whatever the
//! reason: outside pointer-down, Escape, an explicit [`Overlay::close`], a vanished anchor,
//! or dropping the overlay itself when its widget unmounts. Every registration is paired
//! with its removal on the same transition, so repeated open/close cycles never leak.
//!
//! `open` while open and `close` while closed are no-ops.
//!
//! ## Host integration
//!
//! The host provides two things:
//!
//! - a [`ListenerHost`] that records and removes listener registrations. The in-memory
//!   [`ListenerRegistry`] is enough for immediate-mode hosts and tests: it answers
//!   [`ListenerRegistry::is_listening`] so the host knows which events to forward.
//! - a [`Surface`] reporting fresh [`ViewportMetrics`](perch_placement::ViewportMetrics)
//!   and anchor bounds on demand. [`SurfaceSnapshot`] is a ready-made implementation.
//!
//! Events are forwarded with [`Overlay::handle_event`], which answers with an
//! [`OverlayResponse`] describing what changed.
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use perch_overlay::{
//!     AnchorId, DismissReason, ListenerRegistry, Overlay, OverlayEvent, OverlayResponse,
//!     OverlayState, SurfaceSnapshot,
//! };
//! use perch_placement::ViewportMetrics;
//!
//! let registry = ListenerRegistry::new();
//! let anchor = AnchorId(1);
//! let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
//! surface.set_anchor(anchor, Rect::from_origin_size((100.0, 100.0), (200.0, 40.0)));
//!
//! let mut overlay = Overlay::new(&registry, anchor, Size::new(280.0, 320.0));
//! assert!(matches!(overlay.open(&surface), OverlayResponse::Opened(_)));
//! assert_eq!(registry.active_count(), 4);
//!
//! // A press far away from both the trigger and the panel dismisses the overlay.
//! let response = overlay.handle_event(OverlayEvent::PointerDown(Point::new(900.0, 700.0)), &surface);
//! assert_eq!(response, OverlayResponse::Dismissed(DismissReason::OutsidePointer));
//! assert_eq!(overlay.state(), OverlayState::Closed);
//! assert_eq!(registry.active_count(), 0);
//! ```
//!
//! Several overlays may be open at the same time; each owns its own placement and
//! its own guard. Nothing here is shared except the host's read-only viewport.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod guard;
mod listener;
mod overlay;
mod registry;
mod surface;

pub use guard::ListenerGuard;
pub use listener::{ListenerHost, ListenerId, ListenerKind, ListenerKinds, ListenerOptions};
pub use overlay::{DismissReason, Overlay, OverlayEvent, OverlayResponse, OverlayState};
pub use registry::{ListenerRegistry, Registration};
pub use surface::{AnchorId, Surface, SurfaceSnapshot};
