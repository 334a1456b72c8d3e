// File: crates/dashplot-core/src/events.rs
// Summary: Single-threaded change notification with RAII subscriptions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Callback invoked on every notification.
pub type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// An observable list of callbacks. Cloning shares the same list.
#[derive(Clone, Default)]
pub struct Subscribers {
    inner: Rc<RefCell<SubscriberList>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it stays registered until the returned handle is dropped.
    pub fn subscribe(&self, callback: Callback) -> Subscription {
        let mut list = self.inner.borrow_mut();
        list.next_id += 1;
        let id = list.next_id;
        list.entries.push((id, callback));
        Subscription { list: Rc::downgrade(&self.inner), id }
    }

    /// Invoke every callback registered at the time of the call.
    /// Callbacks may subscribe or unsubscribe while running.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self.inner.borrow().entries.iter().map(|(_, cb)| cb.clone()).collect();
        for cb in callbacks {
            cb();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    list: Weak<RefCell<SubscriberList>>,
    id: u64,
}

impl Subscription {
    /// A handle attached to nothing; dropping it is a no-op.
    pub fn detached() -> Self {
        Self { list: Weak::new(), id: 0 }
    }

    /// Unsubscribe now.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(list) = self.list.upgrade() {
            if let Ok(mut list) = list.try_borrow_mut() {
                list.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).field("live", &(self.list.strong_count() > 0)).finish()
    }
}
