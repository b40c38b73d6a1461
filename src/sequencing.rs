//! Request sequencing
//!
//! Each user action takes a ticket before issuing its request. Results are
//! only published for the most recently issued ticket, so a slow response to
//! an older request can never overwrite the result of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Monotonic request number handed out by a [`RequestSequencer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Issues tickets and publishes results for the latest ticket only
#[derive(Debug, Default)]
pub struct RequestSequencer {
    /// Number of the most recently issued ticket
    latest: AtomicU64,
    /// Serializes publishing so the newest result is written last
    publish_lock: Mutex<()>,
    /// Thread currently holding `publish_lock`
    publisher: Mutex<Option<ThreadId>>,
}

/// Records the publishing thread for the lifetime of a publish call
struct PublisherGuard<'a> {
    publisher: &'a Mutex<Option<ThreadId>>,
}

impl<'a> PublisherGuard<'a> {
    fn enter(publisher: &'a Mutex<Option<ThreadId>>, thread_id: ThreadId) -> Self {
        *publisher.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread_id);
        Self { publisher }
    }
}

impl Drop for PublisherGuard<'_> {
    fn drop(&mut self) {
        *self.publisher.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, making every earlier ticket stale
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the most recently issued one
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Runs `publish` if `ticket` is current
    ///
    /// Returns `None` without calling `publish` when a newer ticket has been
    /// issued in the meantime.
    ///
    /// `publish` may itself issue and publish a newer ticket on the same
    /// thread; the nested call runs without waiting for the outer one.
    pub fn publish_if_current<F, R>(&self, ticket: Ticket, publish: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let thread_id = thread::current().id();
        let nested = *self
            .publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            == Some(thread_id);

        let _lock = if nested {
            None
        } else {
            Some(
                self.publish_lock
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            )
        };

        if !self.is_current(ticket) {
            log::warn!(
                "Discarding stale response for request #{} (latest is #{})",
                ticket.0,
                self.latest.load(Ordering::SeqCst)
            );
            return None;
        }

        // Declared after `_lock` so the owner is cleared before unlocking
        let _owner = (!nested).then(|| PublisherGuard::enter(&self.publisher, thread_id));

        Some(publish())
    }
}
