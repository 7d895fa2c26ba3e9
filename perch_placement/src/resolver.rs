// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement with fallback to the last usable result.

use kurbo::{Rect, Size};

use crate::{PanelPlacement, PlacementConfig, ViewportMetrics, compute_placement};

/// Computes placements for one overlay instance, remembering the last good one.
///
/// A missing anchor or an anchor collapsed to zero size (detached, `display: none`,
/// mid-animation) does not produce a fresh placement. The resolver returns the last
/// placement computed from a usable anchor, or `None` if there has never been one.
#[derive(Clone, Debug, Default)]
pub struct PlacementResolver {
    config: PlacementConfig,
    last: Option<PanelPlacement>,
}

impl PlacementResolver {
    /// Creates a resolver with the given configuration.
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self { config, last: None }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Replaces the configuration. The remembered placement is kept.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
    }

    /// Returns the last placement computed from a usable anchor.
    #[must_use]
    pub const fn last(&self) -> Option<PanelPlacement> {
        self.last
    }

    /// Forgets the remembered placement.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Resolves a placement, falling back to the last good one for degenerate anchors.
    pub fn resolve(
        &mut self,
        anchor: Option<Rect>,
        viewport: &ViewportMetrics,
        panel: Size,
    ) -> Option<PanelPlacement> {
        match anchor {
            Some(rect) if is_usable(rect) => {
                let placement = compute_placement(rect, viewport, panel, &self.config);
                self.last = Some(placement);
                Some(placement)
            }
            _ => {
                log::debug!("unusable anchor {anchor:?}, keeping last placement");
                self.last
            }
        }
    }
}

fn is_usable(rect: Rect) -> bool {
    rect.is_finite() && rect.width() > 0.0 && rect.height() > 0.0
}
