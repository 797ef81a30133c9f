//! Idle-timeout scheduling port.
//!
//! The store arms one timer per successful restore/login/register and hands
//! the scheduler a callback. Cancellation is not needed: a callback that fires
//! after a newer session write is ignored by the store's generation check.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Runs a callback once after a delay.
pub trait IdleScheduler {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>);
}

impl<T: IdleScheduler + ?Sized> IdleScheduler for Rc<T> {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>) {
        (**self).schedule(after, callback);
    }
}

/// Scheduler that only fires when told to. Used by tests and the one-shot CLI.
#[derive(Default)]
pub struct ManualTimers {
    pending: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers that have not fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Delays of the armed timers, in arming order.
    #[must_use]
    pub fn delays(&self) -> Vec<Duration> {
        self.pending.borrow().iter().map(|(after, _)| *after).collect()
    }

    /// Fire every armed timer, oldest first. Returns how many fired.
    ///
    /// Timers armed by the callbacks themselves stay pending.
    pub fn fire_all(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let fired = due.len();
        for (_, callback) in due {
            callback();
        }
        fired
    }
}

impl IdleScheduler for ManualTimers {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push((after, callback));
    }
}
