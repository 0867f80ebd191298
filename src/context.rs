//! Per-request cancellation and deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Carries a cancellation signal from the inbound request down to the store.
///
/// Clones share the same cancellation flag, so a clone handed to the store
/// observes `cancel()` calls made through any other clone.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that only finishes when cancelled explicitly.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Why the context finished, or `None` while it is still live.
    pub fn err(&self) -> Option<&'static str> {
        if self.cancelled.load(Ordering::Acquire) {
            return Some("context canceled");
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some("context deadline exceeded"),
            _ => None,
        }
    }
}
