//! Event bus between the exchange controller, the identity bridge, and the UI.
//!
//! Single-threaded (WASM constraint), interior mutability via RefCell.
//! Events are buffered and drained by the UI on each frame; an optional
//! notifier lets the host schedule that frame when an event arrives from
//! an async task.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use dora_types::event::ChatEvent;

type Notifier = Rc<dyn Fn()>;

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
    notifier: Rc<RefCell<Option<Notifier>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            notifier: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the callback run after every emit (e.g. `ctx.request_repaint`).
    pub fn set_notifier(&self, notify: impl Fn() + 'static) {
        *self.notifier.borrow_mut() = Some(Rc::new(notify));
    }

    pub fn emit(&self, event: ChatEvent) {
        self.queue.borrow_mut().push_back(event);
        // Clone out so the notifier may emit or drain without a double borrow.
        let notify = self.notifier.borrow().clone();
        if let Some(notify) = notify {
            notify();
        }
    }

    /// Drain all pending events. Called by the UI layer each frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
