// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll listeners and cooperative cancellation.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell as Flag;
use core::fmt;

use crate::IndexRange;

/// A shared cancellation flag.
///
/// Clones observe the same flag. Cancelling is permanent. Tokens are `!Send`: a grid
/// and everything listening to it live on one thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Flag<bool>>);

impl CancelToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and every clone of it.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Options for [`Grid::on_scroll`](crate::Grid::on_scroll).
#[derive(Debug, Clone, Default)]
pub struct ListenerOptions {
    /// Remove the listener after its first delivery.
    pub once: bool,
    /// Remove the listener once this token is cancelled.
    ///
    /// Independently of this, every listener is dropped when the grid is torn down.
    pub cancel: Option<CancelToken>,
}

impl ListenerOptions {
    /// Deliver a single event, then unsubscribe.
    #[must_use]
    pub fn once() -> Self {
        Self {
            once: true,
            cancel: None,
        }
    }

    /// Unsubscribe when `token` is cancelled.
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Payload delivered to scroll listeners, after recycling for the offset has run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Scroll offset along the primary axis.
    pub offset: f64,
    /// Rows (or columns) materialized at this offset, overscan included.
    pub range: Option<IndexRange>,
}

struct Listener {
    callback: Box<dyn FnMut(&ScrollEvent)>,
    once: bool,
    cancel: Option<CancelToken>,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("once", &self.once)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl Listener {
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Registered scroll listeners, in subscription order.
#[derive(Debug, Default)]
pub(crate) struct ScrollListeners {
    entries: Vec<Listener>,
}

impl ScrollListeners {
    pub(crate) fn add(&mut self, callback: Box<dyn FnMut(&ScrollEvent)>, options: ListenerOptions) {
        self.entries.push(Listener {
            callback,
            once: options.once,
            cancel: options.cancel,
        });
    }

    /// Delivers `event` to every live listener and prunes the finished ones.
    pub(crate) fn dispatch(&mut self, lifetime: &CancelToken, event: &ScrollEvent) {
        if lifetime.is_cancelled() {
            self.entries.clear();
            return;
        }
        self.entries.retain_mut(|listener| {
            if listener.is_cancelled() {
                return false;
            }
            (listener.callback)(event);
            !listener.once
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::{CancelToken, ListenerOptions, ScrollEvent, ScrollListeners};

    fn counter(listeners: &mut ScrollListeners, options: ListenerOptions) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        listeners.add(Box::new(move |_| h.set(h.get() + 1)), options);
        hits
    }

    const EVENT: ScrollEvent = ScrollEvent {
        offset: 0.0,
        range: None,
    };

    #[test]
    fn once_listeners_fire_a_single_time() {
        let lifetime = CancelToken::new();
        let mut listeners = ScrollListeners::default();
        let always = counter(&mut listeners, ListenerOptions::default());
        let once = counter(&mut listeners, ListenerOptions::once());
        listeners.dispatch(&lifetime, &EVENT);
        listeners.dispatch(&lifetime, &EVENT);
        assert_eq!(always.get(), 2);
        assert_eq!(once.get(), 1);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn cancelled_listeners_are_dropped() {
        let lifetime = CancelToken::new();
        let token = CancelToken::new();
        let mut listeners = ScrollListeners::default();
        let hits = counter(
            &mut listeners,
            ListenerOptions::default().with_cancel(token.clone()),
        );
        listeners.dispatch(&lifetime, &EVENT);
        token.cancel();
        listeners.dispatch(&lifetime, &EVENT);
        assert_eq!(hits.get(), 1);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn cancelled_lifetime_silences_everything() {
        let lifetime = CancelToken::new();
        let mut listeners = ScrollListeners::default();
        let hits = counter(&mut listeners, ListenerOptions::default());
        lifetime.cancel();
        listeners.dispatch(&lifetime, &EVENT);
        assert_eq!(hits.get(), 0);
        assert_eq!(listeners.len(), 0);
    }
}
