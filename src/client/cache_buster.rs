//! Cache-defeating query values for GET requests

use std::sync::atomic::{AtomicU64, Ordering};

/// Query parameter name appended to every GET
pub const CACHE_PARAM: &str = "_t";

/// Millisecond timestamps forced strictly increasing.
///
/// Two requests issued within the same millisecond still get distinct
/// values, so an intermediary cache can never serve one for the other.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value: `max(now_ms, last + 1)`
    pub fn next(&self) -> u64 {
        self.next_at(now_ms())
    }

    fn next_at(&self, now: u64) -> u64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
