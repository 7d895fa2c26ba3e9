// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focused-index state machine.

use crate::Key;

/// Something a panel lists and a user can commit.
pub trait Candidate {
    /// Whether committing this candidate is refused.
    fn is_disabled(&self) -> bool;
}

/// A bare flag is a candidate that is disabled when `true`.
impl Candidate for bool {
    fn is_disabled(&self) -> bool {
        *self
    }
}

impl<C: Candidate + ?Sized> Candidate for &C {
    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

/// Wrap behavior at either end of the list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the first and last candidate.
    Never,
    /// Continue from the other end.
    #[default]
    Wrap,
}

/// Traversal direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the end of the list.
    Forward,
    /// Toward the start of the list.
    Backward,
}

/// What a key or click asks the widget to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavOutcome {
    /// Open the panel.
    RequestOpen,
    /// Focus moved to this index of the visible list.
    Moved(usize),
    /// Commit the candidate at this index of the visible list.
    Commit(usize),
    /// Close without committing.
    Cancel,
    /// Nothing to do.
    Ignored,
}

/// Focused-candidate state for one panel.
///
/// The focused index always refers to the list the user currently sees (after
/// filtering). It is `None` until the user navigates, and again after every filter
/// change and every close.
#[derive(Clone, Debug, Default)]
pub struct ListNavigator {
    focused: Option<usize>,
    wrap: WrapMode,
}

impl ListNavigator {
    /// Creates a navigator with nothing focused that wraps at both ends.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a navigator with an explicit wrap mode.
    #[must_use]
    pub fn with_wrap(wrap: WrapMode) -> Self {
        Self {
            focused: None,
            wrap,
        }
    }

    /// Index of the focused candidate in the visible list.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focuses `index`, or clears focus with `None`.
    ///
    /// Used for pointer hover and for seeding focus on open.
    pub fn set_focused(&mut self, index: Option<usize>) {
        self.focused = index;
    }

    /// Clears focus. Call on every filter change and every close.
    pub fn reset(&mut self) {
        self.focused = None;
    }

    /// Drops a focus that no longer points into a list of `len` candidates.
    pub fn clamp(&mut self, len: usize) {
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = None;
        }
    }

    /// Moves focus one step in `direction` over `len` candidates.
    ///
    /// From no focus, forward lands on the first candidate and backward on the last.
    /// Returns the new focus, or `None` for an empty list.
    pub fn step(&mut self, direction: Direction, len: usize) -> Option<usize> {
        if len == 0 {
            self.focused = None;
            return None;
        }
        let last = len - 1;
        // A stale index past the end counts as no focus.
        let current = self.focused.filter(|&i| i <= last);
        let next = match (direction, current) {
            (Direction::Forward, None) => 0,
            (Direction::Backward, None) => last,
            (Direction::Forward, Some(i)) if i < last => i + 1,
            (Direction::Backward, Some(i)) if i > 0 => i - 1,
            (Direction::Forward, Some(_)) => match self.wrap {
                WrapMode::Wrap => 0,
                WrapMode::Never => last,
            },
            (Direction::Backward, Some(_)) => match self.wrap {
                WrapMode::Wrap => last,
                WrapMode::Never => 0,
            },
        };
        self.focused = Some(next);
        Some(next)
    }

    /// Handles a key for a panel that is `open` over `candidates`.
    pub fn handle_key<C: Candidate>(&mut self, key: Key, open: bool, candidates: &[C]) -> NavOutcome {
        match (key, open) {
            (Key::ArrowDown | Key::Enter, false) => NavOutcome::RequestOpen,
            (Key::Escape, _) => {
                self.reset();
                NavOutcome::Cancel
            }
            (_, false) => NavOutcome::Ignored,
            (Key::ArrowDown, true) => self.moved(Direction::Forward, candidates.len()),
            (Key::ArrowUp, true) => self.moved(Direction::Backward, candidates.len()),
            (Key::Home, true) => self.jump(0, candidates.len()),
            (Key::End, true) => self.jump(candidates.len().wrapping_sub(1), candidates.len()),
            (Key::Enter, true) => match self.focused {
                Some(i) if candidates.get(i).is_some_and(|c| !c.is_disabled()) => {
                    NavOutcome::Commit(i)
                }
                Some(i) => {
                    log::debug!("enter on disabled or stale candidate {i}");
                    NavOutcome::Ignored
                }
                None => NavOutcome::Ignored,
            },
            (Key::ArrowLeft | Key::ArrowRight, true) => NavOutcome::Ignored,
        }
    }

    /// Handles a pointer click on the visible candidate at `index`.
    ///
    /// Clicks on disabled candidates are ignored.
    pub fn click<C: Candidate>(&mut self, index: usize, candidates: &[C]) -> NavOutcome {
        match candidates.get(index) {
            Some(c) if !c.is_disabled() => {
                self.focused = Some(index);
                NavOutcome::Commit(index)
            }
            _ => NavOutcome::Ignored,
        }
    }

    fn moved(&mut self, direction: Direction, len: usize) -> NavOutcome {
        match self.step(direction, len) {
            Some(i) => NavOutcome::Moved(i),
            None => NavOutcome::Ignored,
        }
    }

    fn jump(&mut self, index: usize, len: usize) -> NavOutcome {
        if index >= len {
            return NavOutcome::Ignored;
        }
        self.focused = Some(index);
        NavOutcome::Moved(index)
    }
}
