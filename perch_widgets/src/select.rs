// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single selection from a fixed option list.

use alloc::string::String;
use alloc::vec::Vec;

use perch_codec::{CodecError, OptionCodec, ValueCodec};
use perch_nav::{Key, NavOutcome};
use perch_overlay::{AnchorId, ListenerHost, OverlayEvent, Surface};
use perch_placement::{PanelEstimate, PanelPlacement};

use crate::shell::{KeyAction, OnChange, Shell};
use crate::{FieldProps, SelectOption, WidgetResponse};

/// A dropdown committing one option value.
///
/// Clicking an option or pressing Enter on the focused one requests the change and
/// closes the panel. Disabled options are listed but never committed.
#[derive(Debug)]
pub struct Select<H: ListenerHost + Clone> {
    shell: Shell<H>,
    options: Vec<SelectOption>,
    codec: OptionCodec,
    value: String,
    on_change: OnChange<String>,
}

impl<H: ListenerHost + Clone> Select<H> {
    /// Creates a closed select with no value.
    pub fn new(host: H, anchor: AnchorId, options: Vec<SelectOption>) -> Self {
        let panel = PanelEstimate::OPTION_LIST.size(options.len());
        Self {
            shell: Shell::new(
                host,
                anchor,
                panel,
                FieldProps::with_placeholder("Select an option..."),
            ),
            codec: enabled_values(&options),
            options,
            value: String::new(),
            on_change: OnChange::default(),
        }
    }

    /// Sets the presentation props.
    #[must_use]
    pub fn with_props(mut self, props: FieldProps) -> Self {
        self.shell.props = props;
        self
    }

    /// Sets the value-changed callback.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(String) + 'static) -> Self {
        self.on_change = OnChange::new(handler);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Presentation props.
    pub fn props(&self) -> &FieldProps {
        &self.shell.props
    }

    /// Mutable presentation props.
    pub fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.shell.props
    }

    /// The consumer's current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Stores the value the consumer holds, typically after a change request.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The options, in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces the options. The panel estimate follows the new row count.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.codec = enabled_values(&options);
        self.shell.nav.clamp(options.len());
        self.shell
            .overlay
            .set_panel_size(PanelEstimate::OPTION_LIST.size(options.len()));
        self.options = options;
    }

    /// The option matching the current value.
    pub fn selected(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == self.value)
    }

    /// Text for the trigger: the selected label, or the placeholder.
    pub fn trigger_text(&self) -> &str {
        self.selected()
            .map_or(self.shell.props.placeholder.as_str(), |o| o.label.as_str())
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    /// The panel placement while open.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.shell.placement()
    }

    /// The keyboard-focused option.
    pub fn focused(&self) -> Option<usize> {
        self.shell.nav.focused()
    }

    /// Opens the panel.
    pub fn open(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.shell.open(surface)
    }

    /// Closes the panel without committing.
    pub fn close(&mut self) -> WidgetResponse {
        self.shell.close()
    }

    /// A click on the trigger.
    pub fn click_trigger(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.shell.toggle(surface)
    }

    /// A key press while the trigger or panel has focus.
    pub fn key_down(&mut self, key: Key, surface: &impl Surface) -> WidgetResponse {
        match self.shell.key_down(key, &self.options, surface) {
            KeyAction::Respond(response) => response,
            KeyAction::Commit(index) => self.commit(index),
        }
    }

    /// The pointer entered option `index`.
    pub fn hover(&mut self, index: usize) -> WidgetResponse {
        if !self.is_open() || index >= self.options.len() {
            return WidgetResponse::Ignored;
        }
        self.shell.nav.set_focused(Some(index));
        WidgetResponse::Focused(index)
    }

    /// A click on option `index`.
    pub fn click_option(&mut self, index: usize) -> WidgetResponse {
        if !self.is_open() {
            return WidgetResponse::Ignored;
        }
        match self.shell.nav.click(index, &self.options) {
            NavOutcome::Commit(index) => self.commit(index),
            _ => {
                log::debug!("ignoring click on disabled option {index}");
                WidgetResponse::Ignored
            }
        }
    }

    /// Requests `value` programmatically, e.g. from a host-side shortcut.
    ///
    /// Fails for values that are not enabled options; ignored while the widget is
    /// disabled.
    pub fn choose(&mut self, value: &str) -> Result<WidgetResponse, CodecError> {
        if self.shell.props.disabled {
            return Ok(WidgetResponse::Ignored);
        }
        let value = self.codec.parse(value)?;
        self.on_change.emit(value);
        Ok(WidgetResponse::Committed)
    }

    /// Forwards a page event while open.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> WidgetResponse {
        self.shell.handle_event(event, surface)
    }

    fn commit(&mut self, index: usize) -> WidgetResponse {
        let Some(option) = self.options.get(index) else {
            return WidgetResponse::Ignored;
        };
        log::debug!("select committing `{}`", option.value);
        self.on_change.emit(option.value.clone());
        self.shell.close();
        WidgetResponse::Committed
    }
}

pub(crate) fn enabled_values(options: &[SelectOption]) -> OptionCodec {
    OptionCodec::new(
        options
            .iter()
            .filter(|o| !o.disabled)
            .map(|o| o.value.clone()),
    )
}
