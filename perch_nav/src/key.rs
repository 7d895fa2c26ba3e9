// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keys the widgets react to.

/// A key press, already mapped from the host's keyboard event.
///
/// Only keys that drive a panel are modeled; hosts drop everything else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move to the previous candidate.
    ArrowUp,
    /// Move to the next candidate, or open the panel.
    ArrowDown,
    /// Move to the previous field of a multi-field panel.
    ArrowLeft,
    /// Move to the next field of a multi-field panel.
    ArrowRight,
    /// Jump to the first candidate.
    Home,
    /// Jump to the last candidate.
    End,
    /// Commit the focused candidate, or open the panel.
    Enter,
    /// Close without committing.
    Escape,
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Key;

    #[test]
    fn dom_names() {
        assert_eq!(Key::from_dom("ArrowDown"), Some(Key::ArrowDown));
        assert_eq!(Key::from_dom("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_dom("a"), None);
    }
}
