// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Nav: keyboard navigation over the candidates of a floating panel.
//!
//! This crate models list navigation as:
//! - **Keys** ([`Key`]) delivered by the host while the trigger or its panel has focus.
//! - **Candidates** ([`Candidate`]): the options, calendar days, or time fields shown in
//!   the panel, each possibly disabled.
//! - A **navigator** ([`ListNavigator`]) holding the focused index into the *visible*
//!   candidates and turning keys into [`NavOutcome`]s.
//! - A **filter** ([`Filter`]) narrowing candidates by a search term and mapping visible
//!   positions back to the full list.
//!
//! ## Rules
//!
//! - `ArrowDown` while closed asks to open and leaves focus unset; while open it moves to
//!   the next candidate and wraps from the last to the first.
//! - `ArrowUp` only acts while open, moving back and wrapping from the first to the last.
//! - `Enter` while closed asks to open; while open it commits the focused candidate unless
//!   it is disabled.
//! - `Escape` cancels: the panel closes without committing.
//! - Disabled candidates are still visited by arrow keys, so keyboard users can see them,
//!   but neither `Enter` nor a pointer click commits them.
//! - Any filter change or close clears the focus.
//!
//! ```rust
//! use perch_nav::{Key, ListNavigator, NavOutcome};
//!
//! // Three enabled candidates; `bool` reports "disabled".
//! let candidates = [false, false, false];
//! let mut nav = ListNavigator::new();
//!
//! assert_eq!(nav.handle_key(Key::ArrowDown, false, &candidates), NavOutcome::RequestOpen);
//! assert_eq!(nav.focused(), None);
//!
//! assert_eq!(nav.handle_key(Key::ArrowDown, true, &candidates), NavOutcome::Moved(0));
//! assert_eq!(nav.handle_key(Key::ArrowUp, true, &candidates), NavOutcome::Moved(2));
//! assert_eq!(nav.handle_key(Key::Enter, true, &candidates), NavOutcome::Commit(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod filter;
mod key;
mod navigator;

pub use filter::{Filter, matches_term};
pub use key::Key;
pub use navigator::{Candidate, Direction, ListNavigator, NavOutcome, WrapMode};
