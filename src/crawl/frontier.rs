// src/crawl/frontier.rs
// =============================================================================
// The frontier: which URLs are waiting, which are being fetched, and which
// have ever been seen.
//
// Every URL moves through: Unseen -> Queued -> Fetching -> Done
//
// - admit()    Unseen -> Queued (only the first time a URL is offered)
// - next()     Queued -> Fetching (waits if others are still working)
// - complete() Fetching -> Done
//
// The visited set is never shrunk, so a Done URL can't come back.
// All state sits behind one mutex: "is it visited?" and "mark it visited"
// happen in the same critical section, so two workers that discover the same
// URL at once can't both queue it.
//
// The crawl is finished when nothing is queued and nothing is in flight.
// =============================================================================

use crate::target::CrawlTarget;
use std::collections::{HashSet, VecDeque};
use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Queued,
    /// Already queued, fetching or done
    Duplicate,
    /// The max_urls cap has been used up
    LimitReached,
    Cancelled,
}

#[derive(Debug, Default)]
struct FrontierState {
    visited: HashSet<String>,
    queued: VecDeque<CrawlTarget>,
    in_flight: usize,
    admitted: usize,
}

#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    wakeup: Notify,
    max_urls: Option<usize>,
    cancel: CancellationToken,
}

/// The key a URL is de-duplicated under: the URL without its #fragment
pub fn visit_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}

impl Frontier {
    pub fn new(max_urls: Option<usize>, cancel: CancellationToken) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            wakeup: Notify::new(),
            max_urls,
            cancel,
        }
    }

    /// Queues `target` unless its URL has been seen before
    pub async fn admit(&self, target: CrawlTarget) -> Admission {
        if self.cancel.is_cancelled() {
            return Admission::Cancelled;
        }

        let mut state = self.state.lock().await;

        let key = visit_key(&target.url);
        if state.visited.contains(&key) {
            return Admission::Duplicate;
        }
        if self.max_urls.is_some_and(|cap| state.admitted >= cap) {
            return Admission::LimitReached;
        }

        state.visited.insert(key);
        state.admitted += 1;
        state.queued.push_back(target);
        drop(state);

        self.wakeup.notify_waiters();
        Admission::Queued
    }

    /// Hands out the next queued target
    ///
    /// Returns None when the crawl is over: either nothing is queued and no
    /// other worker can add more, or the run was cancelled.
    pub async fn next(&self) -> Option<CrawlTarget> {
        loop {
            // Register interest before looking at the state, so a wakeup
            // between the check and the await isn't lost
            let notified = self.wakeup.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.cancel.is_cancelled() {
                return None;
            }

            {
                let mut state = self.state.lock().await;
                if let Some(target) = state.queued.pop_front() {
                    state.in_flight += 1;
                    return Some(target);
                }
                if state.in_flight == 0 {
                    drop(state);
                    // Let the other idle workers see the crawl is over
                    self.wakeup.notify_waiters();
                    return None;
                }
            }

            tokio::select! {
                _ = &mut notified => {}
                _ = self.cancel.cancelled() => {}
            }
        }
    }

    /// Marks the target handed out by next() as done
    pub async fn complete(&self) {
        {
            let mut state = self.state.lock().await;
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.wakeup.notify_waiters();
    }

    /// Number of distinct URLs ever admitted
    pub async fn admitted(&self) -> usize {
        self.state.lock().await.admitted
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::sync::Mutex and not std::sync::Mutex?
//    - admit() and next() are async and run on many tasks at once
//    - tokio's Mutex can be awaited without blocking the thread
//    - It also can't be "poisoned" by a panic, so no unwrap() on lock()
//
// 2. What is Notify?
//    - A way for one task to say "something changed" to tasks that wait
//    - notify_waiters() wakes everyone currently waiting
//    - We call enable() before checking the state so a notification that
//      arrives in between is not missed
//
// 3. Why count in_flight?
//    - An empty queue doesn't mean the crawl is over
//    - A worker still fetching a page may discover more links
//    - Only "queue empty AND nothing in flight" means we're done
// -----------------------------------------------------------------------------
