//! Durable storage for the course catalog
//!
//! A backend only knows how to read and overwrite the whole catalog. The
//! [`CourseStore`](crate::store::CourseStore) decides when to call it.

use crate::error::{CourseHubError, Result};
use crate::types::Course;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

/// Whole-catalog storage
pub trait CourseBackend: Send + Sync + fmt::Debug {
    /// Read the full catalog
    fn load(&self) -> Result<Vec<Course>>;

    /// Overwrite the full catalog
    fn save(&self, courses: &[Course]) -> Result<()>;

    /// Human readable location, for logs
    fn location(&self) -> String;
}

/// Catalog stored as a pretty-printed JSON array on disk.
///
/// Saves overwrite the file in place; a crash mid-write can leave it
/// truncated. Keys a record carries beyond the [`Course`] fields are kept
/// in [`Course::extra`] and written back as loaded.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    create_if_missing: bool,
}

impl JsonFileBackend {
    /// Backend for an existing catalog file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend {
            path: path.into(),
            create_if_missing: false,
        }
    }

    /// Start from an empty catalog when the file does not exist yet
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CourseBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<Course>> {
        if self.create_if_missing && !self.path.exists() {
            info!("Catalog {:?} does not exist, starting empty", self.path);
            self.save(&[])?;
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let courses: Vec<Course> = serde_json::from_str(&contents)?;
        debug!("Loaded {} courses from {:?}", courses.len(), self.path);
        Ok(courses)
    }

    fn save(&self, courses: &[Course]) -> Result<()> {
        let json = serde_json::to_string_pretty(courses)?;
        std::fs::write(&self.path, json)?;
        debug!("Wrote {} courses to {:?}", courses.len(), self.path);
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    courses: Mutex<Vec<Course>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend preloaded with `courses`
    pub fn with_courses(courses: Vec<Course>) -> Self {
        MemoryBackend {
            courses: Mutex::new(courses),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail with an IO error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Catalog as last saved
    pub fn snapshot(&self) -> Vec<Course> {
        self.courses.lock().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CourseBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<Course>> {
        Ok(self.courses.lock().clone())
    }

    fn save(&self, courses: &[Course]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CourseHubError::Storage(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory backend configured to fail writes",
            )));
        }
        *self.courses.lock() = courses.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
