// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search-term filtering for searchable panels.

use alloc::string::String;
use smallvec::SmallVec;

/// Whether `label` contains `term`, ignoring case.
///
/// An empty term matches everything.
#[must_use]
pub fn matches_term(label: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let label = label.to_lowercase();
    let term = term.to_lowercase();
    label.contains(term.as_str())
}

/// The search term typed into a searchable panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    term: String,
}

impl Filter {
    /// Creates an empty filter that shows every candidate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether no term is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Replaces the term. Returns `true` when it changed.
    ///
    /// Callers reset the navigator's focus when this returns `true`.
    pub fn set_term(&mut self, term: &str) -> bool {
        if self.term == term {
            return false;
        }
        self.term.clear();
        self.term.push_str(term);
        true
    }

    /// Clears the term. Returns `true` when it was set.
    pub fn clear(&mut self) -> bool {
        let had = !self.term.is_empty();
        self.term.clear();
        had
    }

    /// Indices into `labels` that match the term, in order.
    ///
    /// Position `k` of the result is what the navigator calls visible index `k`.
    pub fn apply<'a, I>(&self, labels: I) -> SmallVec<[usize; 16]>
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels
            .into_iter()
            .enumerate()
            .filter(|(_, label)| matches_term(label, &self.term))
            .map(|(i, _)| i)
            .collect()
    }
}
