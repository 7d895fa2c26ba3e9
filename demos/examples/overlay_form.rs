// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted form session with four pickers: status and label selects near the top
//! of the page, due-date and reminder pickers near the bottom edge.
//!
//! The host owns the values. Each widget reports a requested value through its
//! `on_change` handler; the host stores it in its form state and pushes it back.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p perch_demos --example overlay_form`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use perch_codec::{HourFormat, NaiveDate, TimeField};
use perch_nav::Key;
use perch_overlay::{AnchorId, ListenerRegistry, OverlayEvent, SurfaceSnapshot};
use perch_placement::ViewportMetrics;
use perch_widgets::{DatePicker, MultiSelect, Select, SelectOption, TimePicker, WidgetResponse};

const STATUS: AnchorId = AnchorId(1);
const LABELS: AnchorId = AnchorId(2);
const DUE: AnchorId = AnchorId(3);
const REMIND: AnchorId = AnchorId(4);

#[derive(Debug, Default)]
struct Form {
    status: Option<String>,
    labels: Option<Vec<String>>,
    due: Option<String>,
    remind: Option<String>,
}

fn main() {
    env_logger::init();

    let registry = ListenerRegistry::new();
    let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
    surface.set_anchor(STATUS, Rect::from_origin_size((100.0, 60.0), (200.0, 40.0)));
    surface.set_anchor(LABELS, Rect::from_origin_size((340.0, 60.0), (300.0, 40.0)));
    surface.set_anchor(DUE, Rect::from_origin_size((100.0, 700.0), (200.0, 40.0)));
    surface.set_anchor(REMIND, Rect::from_origin_size((340.0, 700.0), (200.0, 40.0)));

    let form = Rc::new(RefCell::new(Form::default()));

    let sink = Rc::clone(&form);
    let mut status = Select::new(
        &registry,
        STATUS,
        vec![
            SelectOption::new("todo", "To do"),
            SelectOption::new("doing", "In progress"),
            SelectOption::new("blocked", "Blocked").disabled(),
            SelectOption::new("done", "Done"),
        ],
    )
    .on_change(move |v| sink.borrow_mut().status = Some(v));

    let sink = Rc::clone(&form);
    let mut labels = MultiSelect::new(
        &registry,
        LABELS,
        vec![
            SelectOption::new("bug", "Bug"),
            SelectOption::new("docs", "Docs"),
            SelectOption::new("perf", "Performance"),
        ],
    )
    .with_value(["bug"])
    .on_change(move |v| sink.borrow_mut().labels = Some(v));

    let sink = Rc::clone(&form);
    let today = NaiveDate::from_ymd_opt(2024, 3, 14);
    let mut due = DatePicker::new(&registry, DUE)
        .with_bounds(today, None)
        .on_change(move |v| sink.borrow_mut().due = Some(v));
    if let Some(today) = today {
        due.set_today(Some(today));
    }

    let sink = Rc::clone(&form);
    let mut remind = TimePicker::new(&registry, REMIND)
        .with_format(HourFormat::H12)
        .with_value("09:00")
        .on_change(move |v| sink.borrow_mut().remind = Some(v));

    // Status: open from the keyboard, walk past the disabled row, commit.
    report("status", status.key_down(Key::ArrowDown, &surface));
    println!("  panel at {:?}", status.placement());
    for _ in 0..4 {
        report("status", status.key_down(Key::ArrowDown, &surface));
    }
    report("status", status.key_down(Key::Enter, &surface));
    if let Some(value) = form.borrow_mut().status.take() {
        status.set_value(value);
    }
    println!("  trigger shows {:?}", status.trigger_text());

    // Labels: add one, then try to remove everything.
    report("labels", labels.click_trigger(&surface));
    report("labels", labels.click_option(2));
    sync_labels(&form, &mut labels);
    report("labels", labels.remove_chip("bug"));
    sync_labels(&form, &mut labels);
    report("labels", labels.remove_chip("perf"));
    sync_labels(&form, &mut labels);
    println!("  chips: {:?}", labels.chips().map(|o| &o.label).collect::<Vec<_>>());
    report(
        "labels",
        labels.handle_event(OverlayEvent::PointerDown(Point::new(900.0, 500.0)), &surface),
    );

    // Due date: the trigger sits near the bottom edge, so the calendar opens above.
    report("due", due.click_trigger(&surface));
    println!("  panel at {:?}", due.placement());
    print_month(&due);
    println!("  listeners held: {}", registry.active_count());

    // Scrolling moves the trigger up in the viewport; the panel follows it.
    surface.scroll_to(0.0, 120.0);
    surface.set_anchor(DUE, Rect::from_origin_size((100.0, 580.0), (200.0, 40.0)));
    report("due", due.handle_event(OverlayEvent::Scroll, &surface));
    report("due", due.click_day(21));
    sync_due(&form, &mut due);
    println!("  trigger shows {:?}", due.trigger_text());

    // Typed text: an impossible date reverts, a valid one commits.
    due.input("31/02/2024");
    report("due", due.blur());
    println!("  field reverted to {:?}", due.text());
    due.input("2024-04-02");
    report("due", due.blur());
    sync_due(&form, &mut due);
    println!("  trigger shows {:?}", due.trigger_text());

    // Reminder: step the minute past the hour; it wraps without touching the hour.
    report("remind", remind.click_trigger(&surface));
    for _ in 0..4 {
        report("remind", remind.decrement(TimeField::Minute));
        if let Some(value) = form.borrow_mut().remind.take() {
            remind.set_value(&value);
        }
    }
    println!("  trigger shows {:?}", remind.trigger_text());
    report("remind", remind.key_down(Key::Escape, &surface));

    println!("listeners held at the end: {}", registry.active_count());
}

fn report(widget: &str, response: WidgetResponse) {
    if response.changed() {
        println!("{widget}: {response:?}");
    } else {
        println!("{widget}: (no change)");
    }
}

fn sync_labels(form: &Rc<RefCell<Form>>, labels: &mut MultiSelect<&ListenerRegistry>) {
    if let Some(values) = form.borrow_mut().labels.take() {
        labels.set_value(values);
    }
}

fn sync_due(form: &Rc<RefCell<Form>>, due: &mut DatePicker<&ListenerRegistry>) {
    if let Some(value) = form.borrow_mut().due.take() {
        due.set_value(&value);
    }
}

fn print_month(due: &DatePicker<&ListenerRegistry>) {
    let month = due.month();
    println!("  {}", month.title());
    println!("  Su Mo Tu We Th Fr Sa");
    let mut line = String::from("  ");
    for _ in 0..month.leading_blanks() {
        line.push_str("   ");
    }
    for (i, cell) in due.cells().iter().enumerate() {
        let mark = if cell.today {
            '*'
        } else if cell.disabled {
            '-'
        } else {
            ' '
        };
        line.push_str(&format!("{:>2}{mark}", cell.date.format("%-d").to_string()));
        if (month.leading_blanks() as usize + i + 1) % 7 == 0 {
            println!("{line}");
            line = String::from("  ");
        }
    }
    if !line.trim().is_empty() {
        println!("{line}");
    }
}
