// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Widgets: headless form pickers on floating panels.
//!
//! Five widgets share one core: an [`Overlay`](perch_overlay::Overlay) for the panel's
//! lifecycle and placement, a [`ListNavigator`](perch_nav::ListNavigator) for keyboard
//! focus, and a codec from [`perch_codec`] for the value.
//!
//! | Widget | External value | Panel |
//! |---|---|---|
//! | [`Select`] | option value | option list |
//! | [`SearchableSelect`] | option value | search box and filtered list |
//! | [`MultiSelect`] | option values | checkable list; chips on the trigger |
//! | [`DatePicker`] | `YYYY-MM-DD` | calendar month |
//! | [`TimePicker`] | `HH:MM` | hour/minute(/period) spinners and presets |
//!
//! The consumer owns the value. Widgets never change it themselves: they call the
//! `on_change` handler with the requested value, and the consumer passes the value it
//! settles on back through `set_value`.
//!
//! Every widget takes trigger clicks, key presses and panel clicks as method calls,
//! and page events through `handle_event`. Each call returns a [`WidgetResponse`]
//! telling the host whether to redraw. Dropping a widget releases any listeners its
//! open panel holds.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use perch_nav::Key;
//! use perch_overlay::{AnchorId, ListenerRegistry, SurfaceSnapshot};
//! use perch_placement::ViewportMetrics;
//! use perch_widgets::{SearchableSelect, SelectOption, WidgetResponse};
//!
//! let registry = ListenerRegistry::new();
//! let anchor = AnchorId(1);
//! let mut surface = SurfaceSnapshot::new(ViewportMetrics::new(1000.0, 800.0));
//! surface.set_anchor(anchor, Rect::from_origin_size((40.0, 40.0), (240.0, 36.0)));
//!
//! let chosen = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&chosen);
//! let mut select = SearchableSelect::new(
//!     &registry,
//!     anchor,
//!     vec![
//!         SelectOption::new("nl", "Netherlands"),
//!         SelectOption::new("nz", "New Zealand"),
//!         SelectOption::new("no", "Norway"),
//!     ],
//! )
//! .on_change(move |value| *sink.borrow_mut() = value);
//!
//! select.key_down(Key::ArrowDown, &surface);
//! assert!(select.is_open());
//! select.set_search("zea", &surface);
//! assert_eq!(select.key_down(Key::ArrowDown, &surface), WidgetResponse::Focused(0));
//! assert_eq!(select.key_down(Key::Enter, &surface), WidgetResponse::Committed);
//! assert_eq!(*chosen.borrow(), "nz");
//! assert_eq!(registry.active_count(), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod date;
mod multi;
mod searchable;
mod select;
mod shell;
mod time;

pub use date::{DatePicker, DayCell};
pub use multi::MultiSelect;
pub use searchable::SearchableSelect;
pub use select::Select;
pub use shell::{FieldProps, SelectOption, WidgetResponse};
pub use time::TimePicker;
