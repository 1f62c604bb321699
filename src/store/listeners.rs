// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(u64, Callback<E>)>,
    dispatching: bool,
    cancelled: Vec<u64>,
}

/// Single-threaded callback registry.
pub struct Listeners<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Listeners {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Listeners {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 1,
                entries: Vec::new(),
                dispatching: false,
                cancelled: Vec::new(),
            })),
        }
    }

    pub fn register(&self, callback: Callback<E>) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push((id, callback));
            id
        };
        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut reg = inner.borrow_mut();
                let before = reg.entries.len();
                reg.entries.retain(|(eid, _)| *eid != id);
                if reg.entries.len() == before && reg.dispatching {
                    reg.cancelled.push(id);
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every registered listener with `event`. Listeners may register or
    /// cancel subscriptions while being called.
    pub fn emit(&self, event: &E) {
        let mut taken = {
            let mut reg = self.inner.borrow_mut();
            reg.dispatching = true;
            std::mem::take(&mut reg.entries)
        };
        for (id, callback) in taken.iter_mut() {
            if self.inner.borrow().cancelled.contains(id) {
                continue;
            }
            callback(event);
        }
        let mut reg = self.inner.borrow_mut();
        reg.dispatching = false;
        let cancelled = std::mem::take(&mut reg.cancelled);
        taken.retain(|(id, _)| !cancelled.contains(id));
        taken.append(&mut reg.entries);
        reg.entries = taken;
    }

    /// Calls only the most recently registered listener.
    pub(crate) fn emit_latest(&self, event: &E) {
        let last = {
            let mut reg = self.inner.borrow_mut();
            reg.dispatching = true;
            reg.entries.pop()
        };
        if let Some((id, mut callback)) = last {
            callback(event);
            let mut reg = self.inner.borrow_mut();
            reg.dispatching = false;
            let cancelled = std::mem::take(&mut reg.cancelled);
            if !cancelled.contains(&id) {
                reg.entries.push((id, callback));
            }
        } else {
            self.inner.borrow_mut().dispatching = false;
        }
    }
}

/// Cancellation handle returned by every subscription. Dropping it cancels too.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_listener_stops_receiving() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let listeners: Listeners<u32> = Listeners::new();
        let sink = Rc::clone(&seen);
        let sub = listeners.register(Box::new(move |v: &u32| sink.borrow_mut().push(*v)));
        listeners.emit(&1);
        sub.cancel();
        listeners.emit(&2);
        assert_eq!(*seen.borrow(), vec![1]);
        assert!(listeners.is_empty());
    }

    #[test]
    fn listener_can_cancel_itself_during_dispatch() {
        let listeners: Listeners<u32> = Listeners::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(RefCell::new(0));
        let (slot2, count2) = (Rc::clone(&slot), Rc::clone(&count));
        let sub = listeners.register(Box::new(move |_: &u32| {
            *count2.borrow_mut() += 1;
            if let Some(s) = slot2.borrow_mut().take() {
                s.cancel();
            }
        }));
        *slot.borrow_mut() = Some(sub);
        listeners.emit(&1);
        listeners.emit(&2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn listener_cancelled_mid_dispatch_is_not_called() {
        let listeners: Listeners<u32> = Listeners::new();
        let later: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (later2, calls_a) = (Rc::clone(&later), Rc::clone(&calls));
        let first = listeners.register(Box::new(move |_: &u32| {
            calls_a.borrow_mut().push("first");
            if let Some(s) = later2.borrow_mut().take() {
                s.cancel();
            }
        }));
        let calls_b = Rc::clone(&calls);
        let second = listeners.register(Box::new(move |_: &u32| {
            calls_b.borrow_mut().push("second");
        }));
        *later.borrow_mut() = Some(second);
        listeners.emit(&1);
        listeners.emit(&2);
        assert_eq!(*calls.borrow(), vec!["first", "first"]);
        assert_eq!(listeners.len(), 1);
        first.cancel();
    }
}
