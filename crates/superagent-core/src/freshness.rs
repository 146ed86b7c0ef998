//! Primitives that decide when a panel refetches and which responses it keeps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Counter bumped by operations that invalidate server state.
///
/// Panels subscribe to the counter instead of to unrelated message text.
#[derive(Debug, Default)]
pub struct DataVersion(AtomicU64);

impl DataVersion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Increments the version and returns the new value.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Sequence number handed out for one request on one read slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets for a read slot.
///
/// A response is applied only if its ticket is still the latest one issued
/// for the slot; anything older is stale and must be discarded.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Check this while holding the view lock the response will be written to.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// The dependency values a read cycle was last run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dependencies {
    pub session_generation: u64,
    pub data_version: u64,
}

/// Remembers the last [`Dependencies`] a panel loaded with.
#[derive(Debug, Default)]
pub struct RefreshGate {
    seen: Mutex<Option<Dependencies>>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` (and records `deps`) when `deps` differ from the last run.
    pub fn should_refresh(&self, deps: Dependencies) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if *seen == Some(deps) {
            false
        } else {
            *seen = Some(deps);
            true
        }
    }
}
