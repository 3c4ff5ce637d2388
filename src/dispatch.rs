//! Serialized event delivery.
//!
//! Browser callbacks can fire synchronously from inside another one: removing
//! a focused toast delivers `focusout` while the click that removed it is
//! still being handled. [`Dispatcher`] owns the controller in a `RefCell` and
//! queues any event that arrives while it is borrowed. The queue is drained
//! before the outer [`Dispatcher::dispatch`] returns, so events are always
//! handled one at a time and in arrival order.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::app::App;
use crate::events::{Event, Outcome};
use crate::platform::{Platform, Scheduler};

pub struct Dispatcher<P: Platform> {
    app: RefCell<Option<App<P>>>,
    queue: RefCell<VecDeque<Event<P::Element>>>,
}

impl<P: Platform> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> Dispatcher<P> {
    pub const fn new() -> Self {
        Self {
            app: RefCell::new(None),
            queue: RefCell::new(VecDeque::new()),
        }
    }

    pub fn install(&self, app: App<P>) {
        *self.app.borrow_mut() = Some(app);
    }

    pub fn is_running(&self) -> bool {
        self.app.try_borrow().map_or(true, |slot| slot.is_some())
    }

    /// Hand one event to the controller. Returns `Continue` when the event
    /// was queued behind one still being handled, or when nothing is
    /// installed yet.
    pub fn dispatch(&self, event: Event<P::Element>) -> Outcome {
        let Ok(mut slot) = self.app.try_borrow_mut() else {
            trace!("controller busy; event queued");
            self.queue.borrow_mut().push_back(event);
            return Outcome::Continue;
        };
        let Some(app) = slot.as_mut() else {
            return Outcome::Continue;
        };

        let outcome = deliver(app, event);
        // Re-borrowed per pop so a handler can queue while we drain.
        while let Some(next) = self.pop() {
            deliver(app, next);
        }
        outcome
    }

    /// Run `f` against the controller, unless it has not started or is busy.
    pub fn with_app<T>(&self, f: impl FnOnce(&mut App<P>) -> T) -> Option<T> {
        match self.app.try_borrow_mut() {
            Ok(mut slot) => slot.as_mut().map(f),
            Err(_) => {
                warn!("controller busy; call dropped");
                None
            }
        }
    }

    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    fn pop(&self) -> Option<Event<P::Element>> {
        self.queue.borrow_mut().pop_front()
    }
}

fn deliver<P: Platform>(app: &mut App<P>, event: Event<P::Element>) -> Outcome {
    if let Event::Wake(handle) = &event {
        Scheduler::fired(app.platform_mut(), *handle);
    }
    app.handle(event)
}
