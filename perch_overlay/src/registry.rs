// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory listener registry.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::num::NonZeroU64;

use hashbrown::HashMap;

use crate::{ListenerHost, ListenerId, ListenerKind, ListenerOptions};

/// One live registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Handle returned to the registrant.
    pub id: ListenerId,
    /// What the registrant listens for.
    pub kind: ListenerKind,
    /// How it listens.
    pub options: ListenerOptions,
}

/// A [`ListenerHost`] that keeps registrations in memory.
///
/// Immediate-mode hosts consult [`is_listening`](Self::is_listening) to decide which
/// events to forward to open overlays; tests use [`active_count`](Self::active_count)
/// to check that every registration was released.
#[derive(Debug)]
pub struct ListenerRegistry {
    next: Cell<NonZeroU64>,
    live: RefCell<HashMap<ListenerId, Registration>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Cell::new(NonZeroU64::MIN),
            live: RefCell::new(HashMap::new()),
        }
    }

    /// Number of live registrations.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.live.borrow().len()
    }

    /// Number of live registrations of `kind`.
    #[must_use]
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.live
            .borrow()
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// Whether anyone currently listens for `kind`.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.live.borrow().values().any(|r| r.kind == kind)
    }

    /// Whether `id` is still registered.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.live.borrow().contains_key(&id)
    }

    /// Snapshot of live registrations, ordered by handle.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        let mut out: Vec<_> = self.live.borrow().values().copied().collect();
        out.sort_by_key(|r| r.id);
        out
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerHost for ListenerRegistry {
    fn add_listener(&self, kind: ListenerKind, options: ListenerOptions) -> ListenerId {
        let id = ListenerId(self.next.get());
        self.next.set(id.0.saturating_add(1));
        self.live
            .borrow_mut()
            .insert(id, Registration { id, kind, options });
        log::trace!("listener {id:?} added for {kind:?}");
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        if self.live.borrow_mut().remove(&id).is_none() {
            log::debug!("listener {id:?} was not registered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let registry = ListenerRegistry::new();
        let a = registry.add_listener(ListenerKind::Scroll, ListenerOptions { capture: true });
        let b = registry.add_listener(ListenerKind::Resize, ListenerOptions::default());
        assert_ne!(a, b);
        assert_eq!(registry.active_count(), 2);
        assert!(registry.is_listening(ListenerKind::Scroll));
        assert!(!registry.is_listening(ListenerKind::EscapeKey));

        registry.remove_listener(a);
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
        assert_eq!(registry.count(ListenerKind::Scroll), 0);

        // Removing twice is harmless.
        registry.remove_listener(a);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn registrations_are_sorted_by_handle() {
        let registry = ListenerRegistry::new();
        let ids: Vec<_> = ListenerKind::ALL
            .into_iter()
            .map(|k| registry.add_listener(k, k.default_options()))
            .collect();
        let snapshot: Vec<_> = registry.registrations().iter().map(|r| r.id).collect();
        assert_eq!(snapshot, ids);
        assert!(registry.registrations()[2].options.capture);
    }
}
