// src/fetch/pacing.rs
// =============================================================================
// Global request pacing.
//
// Every request asks the Pacer for a start slot. Slots are handed out at least
// `delay` apart, no matter which worker asks, so the target server never sees
// two requests closer together than the configured delay.
//
// The lock is only held while reserving a slot, not while sleeping, so
// workers queue up behind each other without blocking the runtime.
// =============================================================================

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_slot: Mutex::new(None),
        }
    }

    /// Waits until this caller's slot comes up
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        let start = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.delay);
            start
        };

        sleep_until(start).await;
    }
}
