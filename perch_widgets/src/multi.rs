// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiple selection that never drops to empty.

use alloc::string::String;
use alloc::vec::Vec;

use perch_codec::{CodecError, MultiValueCodec, Selection, ValueCodec};
use perch_nav::{Key, NavOutcome};
use perch_overlay::{AnchorId, ListenerHost, OverlayEvent, Surface};
use perch_placement::{PanelEstimate, PanelPlacement};

use crate::shell::{KeyAction, OnChange, Shell};
use crate::{FieldProps, SelectOption, WidgetResponse};

/// A dropdown of checkable options, shown on the trigger as removable chips.
///
/// Toggling keeps the panel open. Once something is selected, a toggle or chip
/// removal that would leave nothing selected is refused.
#[derive(Debug)]
pub struct MultiSelect<H: ListenerHost + Clone> {
    shell: Shell<H>,
    options: Vec<SelectOption>,
    value: Selection,
    on_change: OnChange<Vec<String>>,
}

impl<H: ListenerHost + Clone> MultiSelect<H> {
    /// Creates a closed multi-select with nothing selected.
    pub fn new(host: H, anchor: AnchorId, options: Vec<SelectOption>) -> Self {
        let panel = PanelEstimate::OPTION_LIST.size(options.len());
        Self {
            shell: Shell::new(
                host,
                anchor,
                panel,
                FieldProps::with_placeholder("Select options..."),
            ),
            options,
            value: Selection::new(),
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
    pub fn on_change(mut self, handler: impl FnMut(Vec<String>) + 'static) -> Self {
        self.on_change = OnChange::new(handler);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = Selection::from_values(values);
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

    /// The consumer's current values, in selection order.
    pub fn value(&self) -> &[String] {
        self.value.values()
    }

    /// Stores the values the consumer holds.
    pub fn set_value<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = Selection::from_values(values);
    }

    /// The value as comma-separated text, e.g. for a hidden form input.
    pub fn value_text(&self) -> String {
        MultiValueCodec.format(&self.value)
    }

    /// Requests the values listed in comma-separated `text`.
    ///
    /// Every value must be an enabled option. Ignored while the widget is disabled.
    pub fn paste(&mut self, text: &str) -> Result<WidgetResponse, CodecError> {
        if self.shell.props.disabled {
            return Ok(WidgetResponse::Ignored);
        }
        let selection = MultiValueCodec.parse(text)?;
        if let Some(unknown) = selection
            .values()
            .iter()
            .find(|v| !self.options.iter().any(|o| !o.disabled && &o.value == *v))
        {
            return Err(CodecError::UnknownOption(unknown.clone()));
        }
        self.on_change.emit(selection.into_values());
        Ok(WidgetResponse::Committed)
    }

    /// The options, in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces the options. The panel estimate follows the new row count.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.shell.nav.clamp(options.len());
        self.shell
            .overlay
            .set_panel_size(PanelEstimate::OPTION_LIST.size(options.len()));
        self.options = options;
    }

    /// Whether option `index` is checked.
    pub fn is_checked(&self, index: usize) -> bool {
        self.options
            .get(index)
            .is_some_and(|o| self.value.contains(&o.value))
    }

    /// Selected options in selection order, for the trigger's chips.
    ///
    /// Values without a matching option are skipped.
    pub fn chips(&self) -> impl Iterator<Item = &SelectOption> {
        let options = &self.options;
        self.value
            .values()
            .iter()
            .filter_map(move |v| options.iter().find(|o| &o.value == v))
    }

    /// Whether the trigger shows the placeholder instead of chips.
    pub fn shows_placeholder(&self) -> bool {
        self.value.is_empty()
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

    /// Closes the panel.
    pub fn close(&mut self) -> WidgetResponse {
        self.shell.close()
    }

    /// A click on the trigger.
    pub fn click_trigger(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.shell.toggle(surface)
    }

    /// A key press. Enter toggles the focused option and keeps the panel open.
    pub fn key_down(&mut self, key: Key, surface: &impl Surface) -> WidgetResponse {
        match self.shell.key_down(key, &self.options, surface) {
            KeyAction::Respond(response) => response,
            KeyAction::Commit(index) => self.toggle(index),
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
            NavOutcome::Commit(index) => self.toggle(index),
            _ => WidgetResponse::Ignored,
        }
    }

    /// The remove button of the chip for `value`.
    pub fn remove_chip(&mut self, value: &str) -> WidgetResponse {
        if self.shell.props.disabled {
            return WidgetResponse::Ignored;
        }
        let mut next = self.value.clone();
        if next.remove(value) {
            self.on_change.emit(next.into_values());
            WidgetResponse::Committed
        } else {
            WidgetResponse::Ignored
        }
    }

    /// Forwards a page event while open.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> WidgetResponse {
        self.shell.handle_event(event, surface)
    }

    fn toggle(&mut self, index: usize) -> WidgetResponse {
        let Some(option) = self.options.get(index) else {
            return WidgetResponse::Ignored;
        };
        let mut next = self.value.clone();
        if next.toggle(&option.value) {
            log::debug!("multi-select toggled `{}`", option.value);
            self.on_change.emit(next.into_values());
            WidgetResponse::Committed
        } else {
            WidgetResponse::Ignored
        }
    }
}
