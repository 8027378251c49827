//! Application state

use coursehub_core::CourseHub;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The course-sharing service
    pub hub: Arc<CourseHub>,

    /// Server start time
    pub start_time: Instant,

    /// Set while the most recent catalog write has failed
    pub storage_degraded: Arc<AtomicBool>,
}

impl AppState {
    /// Create new application state
    pub fn new(hub: Arc<CourseHub>) -> Self {
        Self {
            hub,
            start_time: Instant::now(),
            storage_degraded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether the last catalog write failed
    pub fn is_degraded(&self) -> bool {
        self.storage_degraded.load(Ordering::Relaxed)
    }

    /// Follow catalog write outcomes: log, count, and track degradation.
    ///
    /// Spawns a task that lives as long as the store's writer.
    pub fn watch_persistence(&self) -> tokio::task::JoinHandle<()> {
        let mut events = self.hub.subscribe_persist_events();
        let degraded = Arc::clone(&self.storage_degraded);

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                crate::metrics::record_persist(&event);
                degraded.store(event.is_failure(), Ordering::Relaxed);
            }
        })
    }
}
