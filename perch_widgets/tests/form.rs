// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Several pickers sharing one page.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use perch_codec::{HourFormat, TimeField};
use perch_nav::Key;
use perch_overlay::{
    AnchorId, DismissReason, ListenerKind, ListenerRegistry, OverlayEvent, OverlayResponse,
    SurfaceSnapshot,
};
use perch_placement::ViewportMetrics;
use perch_widgets::{
    DatePicker, MultiSelect, SearchableSelect, Select, SelectOption, TimePicker, WidgetResponse,
};

const STATUS: AnchorId = AnchorId(1);
const DUE: AnchorId = AnchorId(2);
const AT: AnchorId = AnchorId(3);
const TAGS: AnchorId = AnchorId(4);

fn page() -> SurfaceSnapshot {
    let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
    surface.set_anchor(STATUS, Rect::from_origin_size((100.0, 60.0), (200.0, 40.0)));
    surface.set_anchor(DUE, Rect::from_origin_size((100.0, 700.0), (200.0, 40.0)));
    surface.set_anchor(AT, Rect::from_origin_size((400.0, 60.0), (200.0, 40.0)));
    surface.set_anchor(TAGS, Rect::from_origin_size((700.0, 60.0), (250.0, 40.0)));
    surface
}

fn statuses() -> Vec<SelectOption> {
    vec![
        SelectOption::new("open", "Open"),
        SelectOption::new("done", "Done"),
        SelectOption::new("archived", "Archived").disabled(),
    ]
}

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(String) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |v| sink.borrow_mut().push(v))
}

#[test]
fn two_overlays_open_independently() {
    let registry = ListenerRegistry::new();
    let surface = page();
    let mut status = Select::new(&registry, STATUS, statuses());
    let mut due = DatePicker::new(&registry, DUE);

    status.click_trigger(&surface);
    due.click_trigger(&surface);
    assert!(status.is_open() && due.is_open());
    assert_eq!(registry.active_count(), 8);

    let a = status.placement().unwrap();
    let b = due.placement().unwrap();
    assert!(a.open_below);
    assert!(!b.open_below);
    assert_eq!(b.top, 376.0);

    // Escape is seen by both page-level listeners; each overlay closes on its own.
    assert_eq!(
        status.handle_event(OverlayEvent::EscapeKey, &surface),
        WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::Escape))
    );
    assert!(due.is_open());
    assert_eq!(registry.active_count(), 4);
    assert!(registry.is_listening(ListenerKind::Scroll));
}

#[test]
fn press_inside_one_panel_dismisses_the_other() {
    let registry = ListenerRegistry::new();
    let surface = page();
    let mut status = Select::new(&registry, STATUS, statuses());
    let mut at = TimePicker::new(&registry, AT);
    status.open(&surface);
    at.open(&surface);

    let inside_time_panel = Point::new(450.0, 200.0);
    assert_eq!(
        at.handle_event(OverlayEvent::PointerDown(inside_time_panel), &surface),
        WidgetResponse::Ignored
    );
    assert_eq!(
        status.handle_event(OverlayEvent::PointerDown(inside_time_panel), &surface),
        WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::OutsidePointer))
    );
    assert!(at.is_open());
    assert!(!status.is_open());
}

#[test]
fn scrolling_moves_open_panels() {
    let registry = ListenerRegistry::new();
    let mut surface = page();
    let mut tags = MultiSelect::new(&registry, TAGS, statuses());
    tags.open(&surface);
    let before = tags.placement().unwrap();

    // Page scrolled by 50: the trigger moved up in the viewport, the page position holds.
    surface.scroll_to(0.0, 50.0);
    surface.set_anchor(TAGS, Rect::from_origin_size((700.0, 10.0), (250.0, 40.0)));
    let response = tags.handle_event(OverlayEvent::Scroll, &surface);
    let WidgetResponse::Overlay(OverlayResponse::Repositioned(after)) = response else {
        panic!("expected a reposition, got {response:?}");
    };
    assert_eq!(after.top, before.top);
    assert_eq!(after.left, 700.0);
    assert_eq!(after.width, 250.0);

    // A viewport narrower than the panel's right edge pushes it left.
    surface.set_viewport(ViewportMetrics::new(900.0, 800.0).with_scroll(0.0, 50.0));
    let response = tags.handle_event(OverlayEvent::Resize, &surface);
    let WidgetResponse::Overlay(OverlayResponse::Repositioned(narrow)) = response else {
        panic!("expected a reposition, got {response:?}");
    };
    assert_eq!(narrow.left, 900.0 - 250.0 - 8.0);
}

#[test]
fn unmounting_open_widgets_releases_everything() {
    let registry = ListenerRegistry::new();
    let surface = page();
    {
        let mut status = SearchableSelect::new(&registry, STATUS, statuses());
        let mut due = DatePicker::new(&registry, DUE);
        let mut at = TimePicker::new(&registry, AT).with_format(HourFormat::H12);
        let mut tags = MultiSelect::new(&registry, TAGS, statuses());
        status.open(&surface);
        due.open(&surface);
        at.open(&surface);
        tags.open(&surface);
        assert_eq!(registry.active_count(), 16);
    }
    assert_eq!(registry.active_count(), 0);
}

#[test]
fn anchor_removed_while_open_closes() {
    let registry = ListenerRegistry::new();
    let mut surface = page();
    let mut due = DatePicker::new(&registry, DUE);
    due.open(&surface);
    surface.remove_anchor(DUE);
    assert_eq!(
        due.handle_event(OverlayEvent::Resize, &surface),
        WidgetResponse::Overlay(OverlayResponse::Dismissed(DismissReason::AnchorLost))
    );
    assert_eq!(registry.active_count(), 0);
}

#[test]
fn a_controlled_form_round() {
    let registry = ListenerRegistry::new();
    let surface = page();
    let (times, on_time) = recorder();
    let mut at = TimePicker::new(&registry, AT)
        .with_value("23:59")
        .on_change(on_time);

    at.click_trigger(&surface);
    at.increment(TimeField::Minute);
    // The consumer accepts the request and hands the value back.
    let accepted = times.borrow().last().cloned().unwrap();
    at.set_value(&accepted);
    assert_eq!(at.trigger_text(), "23:00");
    at.key_down(Key::Enter, &surface);
    assert!(!at.is_open());

    let (dates, on_date) = recorder();
    let mut due = DatePicker::new(&registry, DUE)
        .with_value("2024-02-10")
        .on_change(on_date);
    due.input("31/02/2024");
    due.blur();
    assert_eq!(due.text(), "10/02/2024");
    assert!(dates.borrow().is_empty());
}
