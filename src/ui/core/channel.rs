//! Single-threaded publish/subscribe.
//!
//! [`Listeners`] fans an event out to every registered callback.
//! [`Channel`] adds a current value on top: publishing the value that is
//! already current (same `Rc`) is a no-op, so memoized producers never wake
//! their consumers for nothing.
//!
//! Subscriptions unsubscribe when dropped. Callbacks run synchronously, after
//! the internal borrow is released, so a callback may read the channel or
//! drop its own subscription. A callback that publishes into the channel that
//! is currently notifying it is not re-entered.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! { struct ListenerKey; }

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Registry<E> {
    callbacks: SlotMap<ListenerKey, Callback<E>>,
}

pub struct Listeners<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                callbacks: SlotMap::with_key(),
            })),
        }
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl FnMut(&E) + 'static) -> Subscription {
        let callback: Callback<E> = Rc::new(RefCell::new(f));
        let key = self.inner.borrow_mut().callbacks.insert(callback);
        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().callbacks.remove(key);
                }
            })),
        }
    }

    pub fn emit(&self, event: &E) {
        let callbacks: Vec<Callback<E>> = self.inner.borrow().callbacks.values().cloned().collect();
        for callback in callbacks {
            match callback.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(event),
                Err(_) => tracing::trace!("skipping re-entrant listener"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a callback registered; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

pub struct Channel<T> {
    current: RefCell<Option<Rc<T>>>,
    listeners: Listeners<Option<Rc<T>>>,
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
            listeners: Listeners::new(),
        }
    }

    pub fn current(&self) -> Option<Rc<T>> {
        self.current.borrow().clone()
    }

    /// Returns `false` when `value` is already the current value.
    pub fn publish(&self, value: Rc<T>) -> bool {
        {
            let mut current = self.current.borrow_mut();
            if current.as_ref().is_some_and(|cur| Rc::ptr_eq(cur, &value)) {
                return false;
            }
            *current = Some(value.clone());
        }
        tracing::trace!(subscribers = self.listeners.len(), "channel publish");
        self.listeners.emit(&Some(value));
        true
    }

    /// Withdraws the current value; subscribers see `None`.
    pub fn retract(&self) -> bool {
        if self.current.borrow_mut().take().is_none() {
            return false;
        }
        self.listeners.emit(&None);
        true
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl FnMut(&Option<Rc<T>>) + 'static) -> Subscription {
        self.listeners.subscribe(f)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/channel.rs"]
mod tests;
