// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-of-day entry with per-field spinners.

use alloc::format;
use alloc::string::String;

use perch_codec::{
    HourFormat, Step, TimeCodec, TimeField, TimeOfDay, ValueCodec, decode_hhmm, encode_hhmm,
    entry_value,
};
use perch_nav::{Direction, Key};
use perch_overlay::{AnchorId, ListenerHost, OverlayEvent, Surface};
use perch_placement::{PanelEstimate, PanelPlacement};

use crate::shell::{KeyAction, OnChange, Shell};
use crate::{FieldProps, WidgetResponse};

/// A time field whose panel holds hour, minute and (on a 12-hour face) AM/PM
/// spinners, plus quick presets.
///
/// The external value is always 24-hour `HH:MM`. Every spinner step, typed field
/// entry or preset requests a change immediately; a step wraps within its own field
/// only, so incrementing the minute of `23:59` requests `23:00`.
///
/// Keys while open: Left/Right move between fields, Up/Down step the active field
/// (the hour when none is active yet), Enter closes the panel like the Done button.
#[derive(Debug)]
pub struct TimePicker<H: ListenerHost + Clone> {
    shell: Shell<H>,
    codec: TimeCodec,
    value: Option<TimeOfDay>,
    on_change: OnChange<String>,
}

impl<H: ListenerHost + Clone> TimePicker<H> {
    /// Creates a closed 24-hour time picker with no value.
    pub fn new(host: H, anchor: AnchorId) -> Self {
        Self {
            shell: Shell::new(
                host,
                anchor,
                PanelEstimate::TIME_GRID.size(0),
                FieldProps::with_placeholder("Select time..."),
            ),
            codec: TimeCodec::default(),
            value: None,
            on_change: OnChange::default(),
        }
    }

    /// Sets the presentation props.
    #[must_use]
    pub fn with_props(mut self, props: FieldProps) -> Self {
        self.shell.props = props;
        self
    }

    /// Sets the clock face.
    #[must_use]
    pub fn with_format(mut self, format: HourFormat) -> Self {
        self.set_format(format);
        self
    }

    /// Sets the value-changed callback, receiving `HH:MM`.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(String) + 'static) -> Self {
        self.on_change = OnChange::new(handler);
        self
    }

    /// Sets the initial value from `HH:MM`.
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
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

    /// The clock face.
    pub fn format(&self) -> HourFormat {
        self.codec.format
    }

    /// Switches the clock face. The active field is cleared.
    pub fn set_format(&mut self, format: HourFormat) {
        self.codec = TimeCodec::new(format);
        self.shell.nav.reset();
    }

    /// The consumer's current time.
    pub fn value(&self) -> Option<TimeOfDay> {
        self.value
    }

    /// Stores the value the consumer holds. Empty or malformed text clears it.
    pub fn set_value(&mut self, value: &str) {
        self.value = match decode_hhmm(value) {
            Ok(time) => Some(time),
            Err(err) => {
                if !value.is_empty() {
                    log::debug!("time picker ignoring external value `{value}`: {err}");
                }
                None
            }
        };
    }

    /// The time the spinners show: the value, or midnight.
    pub fn time(&self) -> TimeOfDay {
        self.value.unwrap_or(TimeOfDay::MIDNIGHT)
    }

    /// Text for the trigger, such as `09:30` or `09:30 AM`, or the placeholder.
    pub fn trigger_text(&self) -> String {
        match self.value {
            Some(time) => self.codec.format(&time),
            None => self.shell.props.placeholder.clone(),
        }
    }

    /// Spinner fields for the current face, in order.
    pub fn fields(&self) -> &'static [TimeField] {
        TimeField::for_format(self.codec.format)
    }

    /// The field with keyboard focus.
    pub fn active_field(&self) -> Option<TimeField> {
        self.shell
            .nav
            .focused()
            .and_then(|i| self.fields().get(i).copied())
    }

    /// Text shown in a spinner: two digits, or `AM`/`PM`.
    pub fn field_text(&self, field: TimeField) -> String {
        let time = self.time();
        match field {
            TimeField::Period => String::from(time.to_clock12().period.as_str()),
            _ => format!("{:02}", time.field(field, self.codec.format)),
        }
    }

    /// Quick picks offered below the spinners.
    pub fn presets(&self) -> &'static [TimeOfDay] {
        &TimeOfDay::PRESETS
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    /// The panel placement while open.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.shell.placement()
    }

    /// Opens the panel.
    pub fn open(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.shell.open(surface)
    }

    /// Closes the panel.
    pub fn close(&mut self) -> WidgetResponse {
        self.shell.close()
    }

    /// The Done button.
    pub fn done(&mut self) -> WidgetResponse {
        self.shell.close()
    }

    /// A click on the trigger.
    pub fn click_trigger(&mut self, surface: &impl Surface) -> WidgetResponse {
        self.shell.toggle(surface)
    }

    /// A spinner input gained focus.
    pub fn focus_field(&mut self, field: TimeField) -> WidgetResponse {
        match self.fields().iter().position(|f| *f == field) {
            Some(index) if self.is_open() => {
                self.shell.nav.set_focused(Some(index));
                WidgetResponse::Focused(index)
            }
            _ => WidgetResponse::Ignored,
        }
    }

    /// The up button of a spinner. On the period spinner it toggles AM/PM.
    pub fn increment(&mut self, field: TimeField) -> WidgetResponse {
        self.step(field, Step::Up)
    }

    /// The down button of a spinner.
    pub fn decrement(&mut self, field: TimeField) -> WidgetResponse {
        self.step(field, Step::Down)
    }

    /// Text typed into the hour or minute spinner, clamped to the field's range.
    pub fn enter_field(&mut self, field: TimeField, text: &str) -> WidgetResponse {
        if !self.is_open() || field == TimeField::Period {
            return WidgetResponse::Ignored;
        }
        let next = self
            .time()
            .with_field(field, entry_value(text), self.codec.format);
        self.request(next)
    }

    /// A click on preset `index`: requests it and closes the panel.
    pub fn pick_preset(&mut self, index: usize) -> WidgetResponse {
        let Some(preset) = self.presets().get(index).copied() else {
            return WidgetResponse::Ignored;
        };
        if !self.is_open() {
            return WidgetResponse::Ignored;
        }
        self.request(preset);
        self.shell.close();
        WidgetResponse::Committed
    }

    /// A key press while the trigger or panel has focus.
    pub fn key_down(&mut self, key: Key, surface: &impl Surface) -> WidgetResponse {
        if self.shell.props.disabled {
            return WidgetResponse::Ignored;
        }
        if self.is_open() {
            match key {
                Key::Enter => return self.done(),
                Key::ArrowLeft => return self.move_field(Direction::Backward),
                Key::ArrowRight => return self.move_field(Direction::Forward),
                Key::ArrowUp | Key::ArrowDown => {
                    let field = self.active_field().unwrap_or(TimeField::Hour);
                    self.focus_field(field);
                    let step = if key == Key::ArrowUp { Step::Up } else { Step::Down };
                    return self.step(field, step);
                }
                Key::Home | Key::End | Key::Escape => {}
            }
        }
        let fields = [false; 3];
        let fields = &fields[..self.fields().len()];
        match self.shell.key_down(key, fields, surface) {
            KeyAction::Respond(response) => response,
            // Enter while open is handled above.
            KeyAction::Commit(_) => WidgetResponse::Ignored,
        }
    }

    /// Forwards a page event while open.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> WidgetResponse {
        self.shell.handle_event(event, surface)
    }

    fn move_field(&mut self, direction: Direction) -> WidgetResponse {
        match self.shell.nav.step(direction, self.fields().len()) {
            Some(index) => WidgetResponse::Focused(index),
            None => WidgetResponse::Ignored,
        }
    }

    fn step(&mut self, field: TimeField, step: Step) -> WidgetResponse {
        if !self.is_open() || !self.fields().contains(&field) {
            return WidgetResponse::Ignored;
        }
        let next = self.time().step(field, step, self.codec.format);
        self.request(next)
    }

    fn request(&mut self, time: TimeOfDay) -> WidgetResponse {
        log::debug!("time picker requesting {time}");
        self.on_change.emit(encode_hhmm(time));
        WidgetResponse::Committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Rect;
    use perch_overlay::{ListenerRegistry, OverlayResponse, SurfaceSnapshot};
    use perch_placement::ViewportMetrics;

    const ANCHOR: AnchorId = AnchorId(21);

    fn surface() -> SurfaceSnapshot {
        let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
        surface.set_anchor(ANCHOR, Rect::from_origin_size((100.0, 100.0), (200.0, 40.0)));
        surface
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(String) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn minute_increment_does_not_carry() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let (seen, handler) = recorder();
        let mut picker = TimePicker::new(&registry, ANCHOR)
            .with_value("23:59")
            .on_change(handler);
        picker.open(&surface);
        assert_eq!(picker.increment(TimeField::Minute), WidgetResponse::Committed);
        assert_eq!(*seen.borrow(), ["23:00"]);
    }

    #[test]
    fn twelve_hour_face() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let (seen, handler) = recorder();
        let mut picker = TimePicker::new(&registry, ANCHOR)
            .with_format(HourFormat::H12)
            .with_value("00:15")
            .on_change(handler);
        assert_eq!(picker.trigger_text(), "12:15 AM");
        assert_eq!(picker.field_text(TimeField::Hour), "12");
        assert_eq!(picker.field_text(TimeField::Period), "AM");
        picker.open(&surface);
        picker.increment(TimeField::Period);
        picker.increment(TimeField::Hour);
        assert_eq!(*seen.borrow(), ["12:15", "01:15"]);
    }

    #[test]
    fn keyboard_moves_between_fields_and_steps() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let (seen, handler) = recorder();
        let mut picker = TimePicker::new(&registry, ANCHOR)
            .with_value("10:00")
            .on_change(handler);
        assert!(matches!(
            picker.key_down(Key::ArrowDown, &surface),
            WidgetResponse::Overlay(OverlayResponse::Opened(_))
        ));
        assert_eq!(picker.key_down(Key::ArrowUp, &surface), WidgetResponse::Committed);
        assert_eq!(picker.active_field(), Some(TimeField::Hour));
        assert_eq!(picker.key_down(Key::ArrowRight, &surface), WidgetResponse::Focused(1));
        picker.key_down(Key::ArrowDown, &surface);
        // Two fields on a 24-hour face: right from minutes wraps to hours.
        assert_eq!(picker.key_down(Key::ArrowRight, &surface), WidgetResponse::Focused(0));
        assert_eq!(*seen.borrow(), ["11:00", "10:59"]);
        assert_eq!(
            picker.key_down(Key::Enter, &surface),
            WidgetResponse::Overlay(OverlayResponse::Closed)
        );
        assert!(!picker.is_open());
    }

    #[test]
    fn typed_entry_is_clamped() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let (seen, handler) = recorder();
        let mut picker = TimePicker::new(&registry, ANCHOR)
            .with_value("08:30")
            .on_change(handler);
        picker.open(&surface);
        picker.enter_field(TimeField::Hour, "42");
        picker.enter_field(TimeField::Minute, "x");
        assert_eq!(*seen.borrow(), ["23:30", "08:00"]);
    }

    #[test]
    fn preset_commits_and_closes() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let (seen, handler) = recorder();
        let mut picker = TimePicker::new(&registry, ANCHOR).on_change(handler);
        assert_eq!(picker.trigger_text(), "Select time...");
        picker.click_trigger(&surface);
        assert_eq!(picker.pick_preset(2), WidgetResponse::Committed);
        assert!(!picker.is_open());
        assert_eq!(registry.active_count(), 0);
        assert_eq!(*seen.borrow(), ["18:00"]);
    }

    #[test]
    fn spinners_need_an_open_panel() {
        let registry = ListenerRegistry::new();
        let mut picker = TimePicker::new(&registry, ANCHOR);
        assert_eq!(picker.increment(TimeField::Minute), WidgetResponse::Ignored);
        assert_eq!(picker.increment(TimeField::Period), WidgetResponse::Ignored);
    }
}
