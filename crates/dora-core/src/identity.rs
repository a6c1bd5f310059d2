//! Subscription plumbing for identity-change notifications.
//!
//! Adapters keep an [`IdentityListeners`] and call [`IdentityListeners::notify`]
//! whenever the provider reports a change; consumers hold the returned
//! [`Subscription`] for as long as they want callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dora_types::identity::Identity;

pub type IdentityCallback = Box<dyn Fn(Option<Identity>)>;

/// Handle returned by `on_identity_change`. Unsubscribes when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to tear down
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Rc<dyn Fn(Option<Identity>)>)>,
}

/// Registered identity-change callbacks, clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct IdentityListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl IdentityListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: IdentityCallback) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, Rc::from(callback)));
            id
        };
        let table: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Invoke every callback. Callbacks may subscribe or unsubscribe re-entrantly.
    pub fn notify(&self, identity: Option<Identity>) {
        let callbacks: Vec<_> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            cb(identity.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
