// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Placement: anchored panel geometry for floating overlays.
//!
//! A floating panel (an option list, a calendar, a time grid) lives outside normal
//! layout flow and is positioned relative to the control that opened it, its *anchor*.
//! This crate computes where that panel goes:
//!
//! - **Flip**: open below the anchor when the estimated panel height fits there,
//!   otherwise open on whichever side has more room.
//! - **Clamp**: keep the panel's left edge inside the viewport, respecting a margin.
//! - **Widen**: never make the panel narrower than its anchor.
//!
//! The core entry point is [`compute_placement`], a pure function over an anchor
//! [`kurbo::Rect`] (viewport coordinates), fresh [`ViewportMetrics`], an estimated
//! panel [`kurbo::Size`], and a [`PlacementConfig`]. It is cheap enough to call on
//! every scroll and resize tick.
//!
//! [`PlacementResolver`] wraps it with the one piece of state a host needs: the last
//! placement that was computed from a usable anchor. When the anchor is missing or
//! collapsed to zero size, the resolver hands back that last placement instead of
//! producing a panel glued to the origin.
//!
//! [`PanelEstimate`] describes how a widget sizes its panel before it is rendered
//! (a fixed calendar box, or an option list that grows with its row count).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use perch_placement::{PlacementConfig, ViewportMetrics, compute_placement};
//!
//! // A trigger near the bottom of an 800px tall viewport.
//! let anchor = Rect::from_origin_size((100.0, 700.0), (200.0, 40.0));
//! let viewport = ViewportMetrics::new(1000.0, 800.0);
//! let placement = compute_placement(
//!     anchor,
//!     &viewport,
//!     Size::new(280.0, 320.0),
//!     &PlacementConfig::default(),
//! );
//!
//! // Only 52px remain below, so the panel flips above the trigger.
//! assert!(!placement.open_below);
//! assert_eq!(placement.top, 376.0);
//! assert_eq!(placement.width, 280.0);
//! ```
//!
//! Page coordinates (the output) include the viewport scroll offset; anchor bounds
//! (the input) do not. This matches how a panel rendered into a top-level surface is
//! positioned relative to the document rather than the visible window.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

mod estimate;
mod placement;
mod resolver;

pub use estimate::PanelEstimate;
pub use placement::{PanelPlacement, PlacementConfig, ViewportMetrics, compute_placement};
pub use resolver::PlacementResolver;
