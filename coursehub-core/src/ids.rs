//! Course id generation
//!
//! Ids stay time-derived (Unix milliseconds) so they sort by creation time,
//! but two ids handed out in the same millisecond never collide: each new
//! id is strictly greater than the previous one.

use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic, time-derived id source
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator that will only issue ids greater than `floor`
    pub fn new(floor: i64) -> Self {
        IdGenerator {
            last: AtomicI64::new(floor),
        }
    }

    /// Create a generator seeded past every id in `existing`
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::new(existing.into_iter().max().unwrap_or(0))
    }

    /// Issue the next id using the current wall clock
    pub fn next_id(&self) -> i64 {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    /// Issue the next id as if the clock read `now_ms`
    pub fn next_id_at(&self, now_ms: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Last id handed out (or the seed floor)
    pub fn last_id(&self) -> i64 {
        self.last.load(Ordering::Acquire)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
