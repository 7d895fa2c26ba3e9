// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single selection narrowed by a search term.

use alloc::string::String;
use alloc::vec::Vec;

use perch_codec::{CodecError, OptionCodec, ValueCodec};
use perch_nav::{Filter, Key, NavOutcome, matches_term};
use perch_overlay::{AnchorId, ListenerHost, OverlayEvent, Surface};
use perch_placement::{PanelEstimate, PanelPlacement};

use crate::select::enabled_values;
use crate::shell::{KeyAction, OnChange, Shell};
use crate::{FieldProps, SelectOption, WidgetResponse};

/// A select whose panel starts with a search box.
///
/// Indices taken by [`hover`](Self::hover), [`click_option`](Self::click_option) and
/// reported by [`focused`](Self::focused) refer to the *visible* options, those whose
/// label contains the search term. Every change of the term clears the focus, and
/// closing the panel by any path clears the term.
#[derive(Debug)]
pub struct SearchableSelect<H: ListenerHost + Clone> {
    shell: Shell<H>,
    options: Vec<SelectOption>,
    codec: OptionCodec,
    filter: Filter,
    search_placeholder: String,
    value: String,
    on_change: OnChange<String>,
}

impl<H: ListenerHost + Clone> SearchableSelect<H> {
    /// Creates a closed searchable select with no value.
    pub fn new(host: H, anchor: AnchorId, options: Vec<SelectOption>) -> Self {
        let panel = PanelEstimate::SEARCHABLE_LIST.size(options.len());
        Self {
            shell: Shell::new(
                host,
                anchor,
                panel,
                FieldProps::with_placeholder("Select an option..."),
            ),
            codec: enabled_values(&options),
            options,
            filter: Filter::new(),
            search_placeholder: String::from("Search..."),
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

    /// Sets the search box placeholder.
    #[must_use]
    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
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

    /// Search box placeholder.
    pub fn search_placeholder(&self) -> &str {
        &self.search_placeholder
    }

    /// The consumer's current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Stores the value the consumer holds.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// All options, in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces the options and clears the focus.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.codec = enabled_values(&options);
        self.options = options;
        self.shell.nav.reset();
        self.resize_panel();
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

    /// The current search term.
    pub fn search_term(&self) -> &str {
        self.filter.term()
    }

    /// Options whose label matches the search term, in display order.
    pub fn visible_options(&self) -> impl Iterator<Item = &SelectOption> {
        let term = self.filter.term();
        self.options
            .iter()
            .filter(move |o| matches_term(&o.label, term))
    }

    /// Whether the search left nothing to show.
    pub fn no_matches(&self) -> bool {
        self.visible_options().next().is_none()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    /// The panel placement while open.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.shell.placement()
    }

    /// The keyboard-focused visible option.
    pub fn focused(&self) -> Option<usize> {
        self.shell.nav.focused()
    }

    /// Opens the panel.
    pub fn open(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.resize_panel();
        self.shell.open(surface)
    }

    /// Closes the panel, clearing the search term.
    pub fn close(&mut self) -> WidgetResponse {
        self.clear_search();
        self.shell.close()
    }

    /// A click on the trigger.
    pub fn click_trigger(&mut self, surface: &impl Surface) -> WidgetResponse {
        if self.is_open() {
            self.close()
        } else {
            self.open(surface)
        }
    }

    /// Text typed into the search box.
    ///
    /// Every keystroke resets the focus; a changed term also re-estimates the panel
    /// for the new row count. Ignored while closed, since the box only exists in the
    /// open panel.
    pub fn set_search(&mut self, term: &str, surface: &impl Surface) -> WidgetResponse {
        if !self.is_open() || self.shell.props.disabled {
            return WidgetResponse::Ignored;
        }
        let had_focus = self.shell.nav.focused().is_some();
        self.shell.nav.reset();
        if !self.filter.set_term(term) {
            return if had_focus {
                WidgetResponse::Updated
            } else {
                WidgetResponse::Ignored
            };
        }
        self.resize_panel();
        self.shell.overlay.reposition(surface);
        WidgetResponse::Updated
    }

    /// A key press while the trigger or search box has focus.
    pub fn key_down(&mut self, key: Key, surface: &impl Surface) -> WidgetResponse {
        let action = {
            let visible = visible(&self.options, &self.filter);
            self.shell.key_down(key, &visible, surface)
        };
        match action {
            KeyAction::Respond(response) => {
                if !self.is_open() {
                    self.clear_search();
                }
                response
            }
            KeyAction::Commit(index) => self.commit(index),
        }
    }

    /// The pointer entered visible option `index`.
    pub fn hover(&mut self, index: usize) -> WidgetResponse {
        if !self.is_open() || index >= self.visible_options().count() {
            return WidgetResponse::Ignored;
        }
        self.shell.nav.set_focused(Some(index));
        WidgetResponse::Focused(index)
    }

    /// A click on visible option `index`. Disabled options are ignored.
    pub fn click_option(&mut self, index: usize) -> WidgetResponse {
        if !self.is_open() {
            return WidgetResponse::Ignored;
        }
        let outcome = {
            let visible = visible(&self.options, &self.filter);
            self.shell.nav.click(index, &visible)
        };
        match outcome {
            NavOutcome::Commit(index) => self.commit(index),
            _ => {
                log::debug!("ignoring click on disabled option {index}");
                WidgetResponse::Ignored
            }
        }
    }

    /// Requests `value` programmatically. Fails for values that are not enabled options;
    /// ignored while the widget is disabled.
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
        let response = self.shell.handle_event(event, surface);
        if !self.is_open() {
            self.clear_search();
        }
        response
    }

    fn commit(&mut self, visible_index: usize) -> WidgetResponse {
        let Some(value) = self
            .visible_options()
            .nth(visible_index)
            .map(|o| o.value.clone())
        else {
            return WidgetResponse::Ignored;
        };
        log::debug!("searchable select committing `{value}`");
        self.on_change.emit(value);
        self.close();
        WidgetResponse::Committed
    }

    fn clear_search(&mut self) {
        if self.filter.clear() {
            self.resize_panel();
        }
    }

    fn resize_panel(&mut self) {
        let rows = self.visible_options().count();
        self.shell
            .overlay
            .set_panel_size(PanelEstimate::SEARCHABLE_LIST.size(rows));
    }
}

fn visible<'a>(options: &'a [SelectOption], filter: &Filter) -> Vec<&'a SelectOption> {
    options
        .iter()
        .filter(|o| matches_term(&o.label, filter.term()))
        .collect()
}
