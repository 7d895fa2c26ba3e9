// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration contract between overlays and their host.

use alloc::rc::Rc;
use core::num::NonZeroU64;

/// Opaque handle for one listener registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub NonZeroU64);

/// The kinds of page-level listeners an open overlay needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer pressed anywhere on the page; the overlay filters out presses on
    /// its own anchor and panel.
    OutsidePointer,
    /// Escape key pressed.
    EscapeKey,
    /// Any scroll, including nested scroll containers.
    Scroll,
    /// Window resized.
    Resize,
}

impl ListenerKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 4] = [
        Self::OutsidePointer,
        Self::EscapeKey,
        Self::Scroll,
        Self::Resize,
    ];

    /// The flag for this kind.
    #[must_use]
    pub const fn flag(self) -> ListenerKinds {
        match self {
            Self::OutsidePointer => ListenerKinds::OUTSIDE_POINTER,
            Self::EscapeKey => ListenerKinds::ESCAPE_KEY,
            Self::Scroll => ListenerKinds::SCROLL,
            Self::Resize => ListenerKinds::RESIZE,
        }
    }

    /// Options an overlay registers this kind with.
    ///
    /// Scroll listens in the capture phase: scroll events do not bubble, so a
    /// scroll inside a nested container is only visible to a capturing listener.
    #[must_use]
    pub const fn default_options(self) -> ListenerOptions {
        ListenerOptions {
            capture: matches!(self, Self::Scroll),
        }
    }
}

bitflags::bitflags! {
    /// A set of [`ListenerKind`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ListenerKinds: u8 {
        /// See [`ListenerKind::OutsidePointer`].
        const OUTSIDE_POINTER = 0b0001;
        /// See [`ListenerKind::EscapeKey`].
        const ESCAPE_KEY      = 0b0010;
        /// See [`ListenerKind::Scroll`].
        const SCROLL          = 0b0100;
        /// See [`ListenerKind::Resize`].
        const RESIZE          = 0b1000;
    }
}

impl ListenerKinds {
    /// Iterates the kinds contained in this set, in registration order.
    pub fn kinds(self) -> impl Iterator<Item = ListenerKind> {
        ListenerKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

impl Default for ListenerKinds {
    fn default() -> Self {
        Self::all()
    }
}

/// Registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// Listen during the capture phase rather than the bubble phase.
    pub capture: bool,
}

/// Something listeners can be registered with: a document, a window, an event loop.
///
/// Methods take `&self`; implementations use interior mutability so a single host
/// can be shared by every overlay on a page.
pub trait ListenerHost {
    /// Registers a listener and returns its handle.
    fn add_listener(&self, kind: ListenerKind, options: ListenerOptions) -> ListenerId;

    /// Removes a registration. Unknown handles are ignored.
    fn remove_listener(&self, id: ListenerId);
}

impl<T: ListenerHost + ?Sized> ListenerHost for &T {
    fn add_listener(&self, kind: ListenerKind, options: ListenerOptions) -> ListenerId {
        (**self).add_listener(kind, options)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id);
    }
}

impl<T: ListenerHost + ?Sized> ListenerHost for Rc<T> {
    fn add_listener(&self, kind: ListenerKind, options: ListenerOptions) -> ListenerId {
        (**self).add_listener(kind, options)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id);
    }
}
