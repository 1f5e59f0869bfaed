//! Cancellation for retry waits

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared flag that interrupts retry delays.
///
/// Clones share the same flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel and wake every thread currently sleeping on this token
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *cancelled = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Block for `delay` unless cancelled first.
    ///
    /// Returns `true` if the full delay elapsed, `false` if the token was
    /// (or became) cancelled.
    pub fn sleep(&self, delay: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // A delay too large for `Instant` never elapses; only cancel ends it
        let Some(deadline) = Instant::now().checked_add(delay) else {
            while !*cancelled {
                cancelled = cvar
                    .wait(cancelled)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
            }
            return false;
        };

        // Condvar waits may wake spuriously, so loop until the deadline.
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            cancelled = match cvar.wait_timeout(cancelled, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        false
    }

    /// Cancel this token from a background thread after `timeout`
    pub fn cancel_after(&self, timeout: Duration) -> std::thread::JoinHandle<()> {
        let token = self.clone();
        std::thread::spawn(move || {
            if token.sleep(timeout) {
                tracing::warn!("Timeout of {:?} reached, cancelling", timeout);
                token.cancel();
            }
        })
    }
}
