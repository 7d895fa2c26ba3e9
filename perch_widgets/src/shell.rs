// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pieces every widget shares: presentation props, options, responses and the
//! overlay-plus-navigator core.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::Size;
use perch_nav::{Candidate, Key, ListNavigator, NavOutcome};
use perch_overlay::{
    AnchorId, DismissReason, ListenerHost, Overlay, OverlayEvent, OverlayResponse, Surface,
};
use perch_placement::PanelPlacement;

/// Presentation props passed through to the host's renderer.
///
/// Only `disabled` affects behavior: a disabled widget ignores every open request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldProps {
    /// Text above the trigger.
    pub label: Option<String>,
    /// Trigger text while there is no value.
    pub placeholder: String,
    /// Validation message shown under the trigger.
    pub error: Option<String>,
    /// Whether the widget refuses interaction.
    pub disabled: bool,
}

impl FieldProps {
    /// Props with the given placeholder and nothing else set.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }
}

/// One choice of a select-like widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// The external value committed when chosen.
    pub value: String,
    /// The text shown and searched.
    pub label: String,
    /// Shown but not committable.
    pub disabled: bool,
}

impl SelectOption {
    /// An enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the option as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl Candidate for SelectOption {
    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// What a widget did with an input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WidgetResponse {
    /// The overlay changed state or moved.
    Overlay(OverlayResponse),
    /// Keyboard focus moved to this visible candidate.
    Focused(usize),
    /// A value change was requested through the change handler.
    Committed,
    /// Panel content changed (filter, month, field) without a value change.
    Updated,
    /// Nothing happened.
    Ignored,
}

impl WidgetResponse {
    /// Whether the host should redraw.
    #[must_use]
    pub const fn changed(&self) -> bool {
        match self {
            Self::Overlay(response) => response.changed(),
            Self::Ignored => false,
            Self::Focused(_) | Self::Committed | Self::Updated => true,
        }
    }
}

impl From<OverlayResponse> for WidgetResponse {
    fn from(response: OverlayResponse) -> Self {
        match response {
            OverlayResponse::Ignored => Self::Ignored,
            other => Self::Overlay(other),
        }
    }
}

/// The consumer's value-changed callback.
pub(crate) struct OnChange<V>(Option<Box<dyn FnMut(V)>>);

impl<V> OnChange<V> {
    pub(crate) fn new(handler: impl FnMut(V) + 'static) -> Self {
        Self(Some(Box::new(handler)))
    }

    pub(crate) fn emit(&mut self, value: V) {
        if let Some(handler) = self.0.as_mut() {
            handler(value);
        }
    }
}

impl<V> Default for OnChange<V> {
    fn default() -> Self {
        Self(None)
    }
}

impl<V> fmt::Debug for OnChange<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OnChange")
            .field(&self.0.as_ref().map(|_| ".."))
            .finish()
    }
}

/// A key press resolved against the visible candidates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum KeyAction {
    /// Fully handled by the shell.
    Respond(WidgetResponse),
    /// The widget must commit the visible candidate at this index.
    Commit(usize),
}

/// Overlay, navigator and props: the part of every widget that is not its value.
#[derive(Debug)]
pub(crate) struct Shell<H: ListenerHost + Clone> {
    pub(crate) overlay: Overlay<H>,
    pub(crate) nav: ListNavigator,
    pub(crate) props: FieldProps,
}

impl<H: ListenerHost + Clone> Shell<H> {
    pub(crate) fn new(host: H, anchor: AnchorId, panel: Size, props: FieldProps) -> Self {
        Self {
            overlay: Overlay::new(host, anchor, panel),
            nav: ListNavigator::new(),
            props,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub(crate) fn placement(&self) -> Option<PanelPlacement> {
        self.overlay.placement()
    }

    /// Opens unless disabled. Focus starts unset.
    pub(crate) fn open(&mut self, surface: &impl Surface) -> WidgetResponse {
        if self.props.disabled {
            log::debug!("{:?} is disabled, not opening", self.overlay.anchor());
            return WidgetResponse::Ignored;
        }
        if !self.overlay.is_open() {
            self.nav.reset();
        }
        self.overlay.open(surface).into()
    }

    pub(crate) fn close(&mut self) -> WidgetResponse {
        self.nav.reset();
        if self.overlay.close() {
            WidgetResponse::Overlay(OverlayResponse::Closed)
        } else {
            WidgetResponse::Ignored
        }
    }

    pub(crate) fn toggle(&mut self, surface: &impl Surface) -> WidgetResponse {
        if self.is_open() {
            self.close()
        } else {
            self.open(surface)
        }
    }

    /// Escape from the keyboard, reported like the page-level Escape listener.
    pub(crate) fn cancel(&mut self) -> WidgetResponse {
        self.nav.reset();
        if self.overlay.close() {
            WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::Escape))
        } else {
            WidgetResponse::Ignored
        }
    }

    /// Runs a key through the navigator, opening and cancelling as asked.
    pub(crate) fn key_down<C: Candidate>(
        &mut self,
        key: Key,
        candidates: &[C],
        surface: &impl Surface,
    ) -> KeyAction {
        if self.props.disabled {
            return KeyAction::Respond(WidgetResponse::Ignored);
        }
        let response = match self.nav.handle_key(key, self.is_open(), candidates) {
            NavOutcome::RequestOpen => self.open(surface),
            NavOutcome::Moved(index) => WidgetResponse::Focused(index),
            NavOutcome::Commit(index) => return KeyAction::Commit(index),
            NavOutcome::Cancel => self.cancel(),
            NavOutcome::Ignored => WidgetResponse::Ignored,
        };
        KeyAction::Respond(response)
    }

    pub(crate) fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> WidgetResponse {
        let response = self.overlay.handle_event(event, surface);
        if !self.overlay.is_open() {
            self.nav.reset();
        }
        response.into()
    }
}
