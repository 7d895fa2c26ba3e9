// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar date entry.

use alloc::string::String;
use alloc::vec::Vec;

use perch_codec::{
    Commit, DateCodec, DateField, MonthView, NaiveDate, ValueCodec, decode_iso, encode_iso,
};
use perch_nav::{Candidate, Key, NavOutcome};
use perch_overlay::{
    AnchorId, DismissReason, ListenerHost, OverlayEvent, OverlayResponse, Surface,
};
use perch_placement::{PanelEstimate, PanelPlacement};

use crate::shell::{KeyAction, OnChange, Shell};
use crate::{FieldProps, WidgetResponse};

/// One day button of the calendar grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    /// The day.
    pub date: NaiveDate,
    /// Outside the allowed bounds; shown but not committable.
    pub disabled: bool,
    /// The current value.
    pub selected: bool,
    /// The host's notion of today.
    pub today: bool,
}

impl Candidate for DayCell {
    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// A date field with a calendar panel.
///
/// The external value is an ISO `YYYY-MM-DD` string. The user may pick a day in the
/// calendar or type into the field; typed text commits on blur and reverts when it
/// does not parse or falls outside the bounds. Candidate indices are day-of-month
/// minus one.
#[derive(Debug)]
pub struct DatePicker<H: ListenerHost + Clone> {
    shell: Shell<H>,
    field: DateField,
    month: MonthView,
    today: Option<NaiveDate>,
    on_change: OnChange<String>,
}

impl<H: ListenerHost + Clone> DatePicker<H> {
    /// Creates a closed date picker with no value and no bounds.
    pub fn new(host: H, anchor: AnchorId) -> Self {
        Self {
            shell: Shell::new(
                host,
                anchor,
                PanelEstimate::CALENDAR.size(0),
                FieldProps::with_placeholder("Select date..."),
            ),
            field: DateField::new(DateCodec::default(), None),
            month: MonthView::containing(NaiveDate::default()),
            today: None,
            on_change: OnChange::default(),
        }
    }

    /// Sets the presentation props.
    #[must_use]
    pub fn with_props(mut self, props: FieldProps) -> Self {
        self.shell.props = props;
        self
    }

    /// Sets the value-changed callback, receiving `YYYY-MM-DD`.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(String) + 'static) -> Self {
        self.on_change = OnChange::new(handler);
        self
    }

    /// Sets the initial value from `YYYY-MM-DD`.
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Sets the inclusive bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.set_bounds(min, max);
        self
    }

    /// Sets the day highlighted as today, and shown when there is no value.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self.month = MonthView::containing(self.value().unwrap_or(today));
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

    /// The consumer's current date.
    pub fn value(&self) -> Option<NaiveDate> {
        self.field.committed().copied()
    }

    /// The consumer's current value as `YYYY-MM-DD`, empty when unset.
    pub fn value_iso(&self) -> String {
        self.value().map(encode_iso).unwrap_or_default()
    }

    /// Stores the value the consumer holds. Empty or malformed text clears it.
    pub fn set_value(&mut self, value: &str) {
        let date = match decode_iso(value) {
            Ok(date) => Some(date),
            Err(err) => {
                if !value.is_empty() {
                    log::debug!("date picker ignoring external value `{value}`: {err}");
                }
                None
            }
        };
        self.field.sync(date);
        if let Some(date) = date {
            self.month = MonthView::containing(date);
        }
    }

    /// Replaces the inclusive bounds.
    pub fn set_bounds(&mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) {
        self.field.set_codec(DateCodec::new(min, max));
    }

    /// Sets the day highlighted as today.
    pub fn set_today(&mut self, today: Option<NaiveDate>) {
        self.today = today;
    }

    /// Text for the trigger, such as `Mar 5, 2024`, or the placeholder.
    pub fn trigger_text(&self) -> String {
        match self.value() {
            Some(date) => self.field.codec().format_long(date),
            None => self.shell.props.placeholder.clone(),
        }
    }

    /// The text field's content.
    pub fn text(&self) -> &str {
        self.field.text()
    }

    /// Records typed text. Nothing is parsed until [`blur`](Self::blur).
    pub fn input(&mut self, text: &str) -> WidgetResponse {
        if self.shell.props.disabled {
            return WidgetResponse::Ignored;
        }
        self.field.input(text);
        WidgetResponse::Updated
    }

    /// The text field lost focus: commit or revert the typed text.
    pub fn blur(&mut self) -> WidgetResponse {
        match self.field.commit() {
            Commit::Unchanged => WidgetResponse::Ignored,
            Commit::Changed(date) => {
                self.month = MonthView::containing(date);
                self.on_change.emit(encode_iso(date));
                WidgetResponse::Committed
            }
            Commit::Reverted(_) => WidgetResponse::Updated,
        }
    }

    /// The displayed month.
    pub fn month(&self) -> MonthView {
        self.month
    }

    /// Shows the previous month.
    pub fn prev_month(&mut self) -> WidgetResponse {
        self.show_month(self.month.prev())
    }

    /// Shows the next month.
    pub fn next_month(&mut self) -> WidgetResponse {
        self.show_month(self.month.next())
    }

    /// Day cells of the displayed month, day 1 first.
    ///
    /// Render [`MonthView::leading_blanks`] empty cells before them.
    pub fn cells(&self) -> Vec<DayCell> {
        let codec = self.field.codec();
        let selected = self.value();
        self.month
            .days()
            .map(|date| DayCell {
                date,
                disabled: !codec.in_range(date),
                selected: selected == Some(date),
                today: self.today == Some(date),
            })
            .collect()
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.shell.is_open()
    }

    /// The panel placement while open.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.shell.placement()
    }

    /// The keyboard-focused cell.
    pub fn focused(&self) -> Option<usize> {
        self.shell.nav.focused()
    }

    /// Opens the panel on the month of the value, or of today.
    pub fn open(&mut self, surface: &impl Surface) -> WidgetResponse {
        if !self.is_open() {
            if let Some(seed) = self.value().or(self.today) {
                self.month = MonthView::containing(seed);
            }
        }
        self.shell.open(surface)
    }

    /// Closes the panel.
    pub fn close(&mut self) -> WidgetResponse {
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

    /// A key press. Escape also reverts uncommitted text.
    pub fn key_down(&mut self, key: Key, surface: &impl Surface) -> WidgetResponse {
        if key == Key::Escape && !self.shell.props.disabled && self.field.is_dirty() {
            self.field.revert();
            let response = self.shell.cancel();
            return if response == WidgetResponse::Ignored {
                WidgetResponse::Updated
            } else {
                response
            };
        }
        if !self.is_open() && matches!(key, Key::ArrowDown | Key::Enter) {
            return self.open(surface);
        }
        let cells = self.cells();
        match self.shell.key_down(key, &cells, surface) {
            KeyAction::Respond(response) => response,
            KeyAction::Commit(index) => self.commit(cells[index].date),
        }
    }

    /// A click on day `day` of the displayed month. Disabled days are ignored.
    pub fn click_day(&mut self, day: u32) -> WidgetResponse {
        if !self.is_open() {
            return WidgetResponse::Ignored;
        }
        let cells = self.cells();
        let Some(index) = day.checked_sub(1).and_then(|d| usize::try_from(d).ok()) else {
            return WidgetResponse::Ignored;
        };
        match self.shell.nav.click(index, &cells) {
            NavOutcome::Commit(index) => self.commit(cells[index].date),
            _ => {
                log::debug!("ignoring click on unavailable day {day}");
                WidgetResponse::Ignored
            }
        }
    }

    /// Forwards a page event while open. A page-level Escape also reverts uncommitted text.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: &impl Surface) -> WidgetResponse {
        let response = self.shell.handle_event(event, surface);
        if response == WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::Escape)) {
            self.field.revert();
        }
        response
    }

    fn show_month(&mut self, month: MonthView) -> WidgetResponse {
        self.month = month;
        self.shell.nav.reset();
        WidgetResponse::Updated
    }

    fn commit(&mut self, date: NaiveDate) -> WidgetResponse {
        let text = self.field.codec().format(&date);
        self.field.input(&text);
        // Routed through the field so the text and committed value stay in step.
        let response = match self.blur() {
            // Picking the day already held still reports it.
            WidgetResponse::Ignored => {
                self.on_change.emit(encode_iso(date));
                WidgetResponse::Committed
            }
            response => response,
        };
        self.shell.close();
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use kurbo::Rect;
    use perch_overlay::{ListenerRegistry, SurfaceSnapshot};
    use perch_placement::ViewportMetrics;

    const ANCHOR: AnchorId = AnchorId(11);

    fn surface() -> SurfaceSnapshot {
        let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
        surface.set_anchor(ANCHOR, Rect::from_origin_size((100.0, 100.0), (200.0, 40.0)));
        surface
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn opens_on_the_value_month() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_today(ymd(2025, 1, 15))
            .with_value("2024-03-05");
        picker.next_month();
        picker.open(&surface);
        assert_eq!(picker.month(), MonthView::new(2024, 3).unwrap());
        assert_eq!(picker.trigger_text(), "Mar 5, 2024");
        let cells = picker.cells();
        assert_eq!(cells.len(), 31);
        assert!(cells[4].selected);
    }

    #[test]
    fn days_outside_bounds_are_disabled() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_bounds(Some(ymd(2024, 3, 10)), Some(ymd(2024, 3, 20)))
            .with_value("2024-03-15")
            .on_change(move |v| sink.borrow_mut().push(v));
        picker.open(&surface);
        assert!(picker.cells()[8].disabled);
        assert!(!picker.cells()[9].disabled);
        assert_eq!(picker.click_day(9), WidgetResponse::Ignored);
        assert!(picker.is_open());
        assert_eq!(picker.click_day(12), WidgetResponse::Committed);
        assert!(!picker.is_open());
        assert_eq!(*seen.borrow(), ["2024-03-12"]);
    }

    #[test]
    fn blur_reverts_impossible_dates() {
        let registry = ListenerRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_value("2024-02-10")
            .on_change(move |v| sink.borrow_mut().push(v));
        picker.input("31/02/2024");
        assert_eq!(picker.blur(), WidgetResponse::Updated);
        assert_eq!(picker.text(), "10/02/2024");
        assert!(seen.borrow().is_empty());

        picker.input("05/03/2024");
        assert_eq!(picker.blur(), WidgetResponse::Committed);
        assert_eq!(*seen.borrow(), ["2024-03-05"]);
    }

    #[test]
    fn escape_reverts_typed_text() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let mut picker = DatePicker::new(&registry, ANCHOR).with_value("2024-02-10");
        picker.open(&surface);
        picker.input("01/01/20");
        assert!(matches!(
            picker.key_down(Key::Escape, &surface),
            WidgetResponse::Overlay(_)
        ));
        assert_eq!(picker.text(), "10/02/2024");
        assert!(!picker.is_open());
    }

    #[test]
    fn page_escape_reverts_typed_text() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_value("2024-02-10")
            .on_change(move |v| sink.borrow_mut().push(v));
        picker.open(&surface);
        picker.input("05/03/2024");
        assert_eq!(
            picker.handle_event(OverlayEvent::EscapeKey, &surface),
            WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::Escape))
        );
        assert!(!picker.is_open());
        assert_eq!(picker.text(), "10/02/2024");
        assert_eq!(picker.blur(), WidgetResponse::Ignored);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clicking_the_selected_day_reports_it_again() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_value("2024-02-10")
            .on_change(move |v| sink.borrow_mut().push(v));
        picker.open(&surface);
        assert_eq!(picker.click_day(10), WidgetResponse::Committed);
        assert!(!picker.is_open());
        assert_eq!(*seen.borrow(), ["2024-02-10"]);
    }

    #[test]
    fn keyboard_walks_days_and_month_buttons_reset_focus() {
        let registry = ListenerRegistry::new();
        let surface = surface();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let mut picker = DatePicker::new(&registry, ANCHOR)
            .with_value("2024-02-10")
            .on_change(move |v| sink.borrow_mut().push(v));
        picker.key_down(Key::Enter, &surface);
        assert!(picker.is_open());
        // February 2024 has 29 days; up from nothing lands on the 29th.
        assert_eq!(picker.key_down(Key::ArrowUp, &surface), WidgetResponse::Focused(28));
        assert_eq!(picker.prev_month(), WidgetResponse::Updated);
        assert_eq!(picker.focused(), None);
        assert_eq!(picker.key_down(Key::Home, &surface), WidgetResponse::Focused(0));
        assert_eq!(picker.key_down(Key::Enter, &surface), WidgetResponse::Committed);
        assert_eq!(*seen.borrow(), ["2024-01-01"]);
    }

    #[test]
    fn malformed_external_value_clears() {
        let registry = ListenerRegistry::new();
        let mut picker = DatePicker::new(&registry, ANCHOR).with_value("2024-02-10");
        picker.set_value("garbage");
        assert_eq!(picker.value(), None);
        assert_eq!(picker.value_iso(), "");
        assert_eq!(picker.trigger_text(), "Select date...");
    }
}
