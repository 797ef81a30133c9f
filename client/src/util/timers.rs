//! Browser timers for simulated latency and the idle timeout.
//!
//! TRADE-OFFS
//! ==========
//! Idle timers are fire-and-forget (`Timeout::forget`); the session store
//! ignores callbacks from an outdated session, so nothing needs cancelling.
//! Outside the browser timers never fire and sleeps complete immediately.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

use session::IdleScheduler;
use session::backend::SleepFn;

/// `setTimeout`-backed idle scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

/// Clamp a duration to the millisecond range `setTimeout` accepts.
pub(crate) fn timeout_millis(after: Duration) -> u32 {
    u32::try_from(after.as_millis()).unwrap_or(u32::MAX)
}

impl IdleScheduler for BrowserTimers {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::callback::Timeout::new(timeout_millis(after), callback).forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("idle timer for {}ms not armed outside the browser", timeout_millis(after));
            drop(callback);
        }
    }
}

/// Sleep used by the latency-simulating backend.
pub fn sleep_fn() -> SleepFn {
    #[cfg(feature = "csr")]
    {
        Rc::new(|after: Duration| -> Pin<Box<dyn Future<Output = ()>>> {
            Box::pin(gloo_timers::future::sleep(after))
        })
    }
    #[cfg(not(feature = "csr"))]
    {
        Rc::new(|_: Duration| -> Pin<Box<dyn Future<Output = ()>>> { Box::pin(async {}) })
    }
}
