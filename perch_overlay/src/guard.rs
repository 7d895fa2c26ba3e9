// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped listener acquisition.

use smallvec::SmallVec;

use crate::{ListenerHost, ListenerId, ListenerKinds};

/// Listener registrations held for as long as the guard lives.
///
/// [`acquire`](Self::acquire) registers one listener per requested kind; dropping the
/// guard removes every one of them, synchronously, on whatever path the owner takes.
#[derive(Debug)]
pub struct ListenerGuard<H: ListenerHost> {
    host: H,
    ids: SmallVec<[ListenerId; 4]>,
}

impl<H: ListenerHost> ListenerGuard<H> {
    /// Registers a listener for each kind in `kinds` with its default options.
    pub fn acquire(host: H, kinds: ListenerKinds) -> Self {
        let ids = kinds
            .kinds()
            .map(|kind| host.add_listener(kind, kind.default_options()))
            .collect();
        Self { host, ids }
    }

    /// Handles of the held registrations.
    #[must_use]
    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }
}

impl<H: ListenerHost> Drop for ListenerGuard<H> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.host.remove_listener(id);
        }
    }
}
