//! Course catalog store
//!
//! The store owns the authoritative in-memory course list. Every mutation
//! runs in two phases: the list is changed under the lock, then a full
//! snapshot is queued for a single background writer that overwrites the
//! backing storage. Callers never wait for the write. Write failures are
//! logged and published as [`PersistEvent`]s to whoever subscribed.

use crate::backend::CourseBackend;
use crate::error::{CourseHubError, Result};
use crate::ids::IdGenerator;
use crate::types::{Course, CourseDraft};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

/// Result of one background write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Snapshot written to storage
    Written,
    /// Write failed; storage is stale until the next successful write
    Failed(String),
}

/// Emitted by the writer after every attempted write
#[derive(Debug, Clone)]
pub struct PersistEvent {
    /// Storage location that was written
    pub location: String,
    /// Number of courses in the snapshot
    pub courses: usize,
    /// What happened
    pub outcome: PersistOutcome,
    /// When the attempt finished
    pub timestamp: Instant,
}

impl PersistEvent {
    /// Whether the write failed
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, PersistOutcome::Failed(_))
    }
}

enum WriteCommand {
    Save(Vec<Course>),
    Flush(oneshot::Sender<()>),
}

type Subscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<PersistEvent>>>>;

/// In-memory course list backed by whole-file persistence
pub struct CourseStore {
    courses: RwLock<Vec<Course>>,
    ids: IdGenerator,
    writer: mpsc::UnboundedSender<WriteCommand>,
    subscribers: Subscribers,
    location: String,
}

impl CourseStore {
    /// Load the catalog from `backend` and start the background writer.
    ///
    /// Must be called from within a Tokio runtime. Fails if the backing
    /// storage is unreadable or malformed.
    pub fn load(backend: Arc<dyn CourseBackend>) -> Result<Self> {
        let courses = backend.load()?;
        let location = backend.location();
        info!("Loaded {} courses from {}", courses.len(), location);

        let ids = IdGenerator::seeded(courses.iter().map(|c| c.id));
        let subscribers: Subscribers = Arc::new(Mutex::new(Vec::new()));

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(backend, rx, Arc::clone(&subscribers)));

        Ok(CourseStore {
            courses: RwLock::new(courses),
            ids,
            writer: tx,
            subscribers,
            location,
        })
    }

    /// All courses in insertion order
    pub fn list(&self) -> Vec<Course> {
        self.courses.read().clone()
    }

    /// Look up a course by id
    pub fn get(&self, id: i64) -> Option<Course> {
        self.courses.read().iter().find(|c| c.id == id).cloned()
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.read().len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.courses.read().is_empty()
    }

    /// Storage location, for logs and health output
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Validate and append a new course
    #[instrument(skip(self, draft), fields(title = ?draft.title))]
    pub fn add(&self, draft: CourseDraft) -> Result<Course> {
        // Validate before drawing an id so rejected drafts don't consume one.
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            debug!("Rejected course, missing {:?}", missing);
            return Err(CourseHubError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let course = draft.into_course(self.ids.next_id())?;

        let mut courses = self.courses.write();
        courses.push(course.clone());
        self.schedule_persist(&courses);
        drop(courses);

        info!("Added course {} ({})", course.id, course.title);
        Ok(course)
    }

    /// Remove a course by id, returning the removed record
    #[instrument(skip(self))]
    pub fn remove(&self, id: i64) -> Result<Course> {
        let mut courses = self.courses.write();
        let index = courses
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CourseHubError::NotFound(format!("Course {} not found", id)))?;

        let removed = courses.remove(index);
        self.schedule_persist(&courses);
        drop(courses);

        info!("Removed course {} ({})", removed.id, removed.title);
        Ok(removed)
    }

    /// Wait until every write queued so far has been attempted
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.writer.send(WriteCommand::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Receive a [`PersistEvent`] for every write attempted from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PersistEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    // Called with the write lock held so snapshots reach the writer in
    // mutation order.
    fn schedule_persist(&self, courses: &[Course]) {
        if self
            .writer
            .send(WriteCommand::Save(courses.to_vec()))
            .is_err()
        {
            error!(
                "Catalog writer for {} has stopped, change not persisted",
                self.location
            );
        }
    }
}

async fn run_writer(
    backend: Arc<dyn CourseBackend>,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
    subscribers: Subscribers,
) {
    let location = backend.location();
    debug!("Catalog writer started for {}", location);

    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Save(snapshot) => {
                let count = snapshot.len();
                let backend = Arc::clone(&backend);
                let result = tokio::task::spawn_blocking(move || backend.save(&snapshot)).await;

                let outcome = match result {
                    Ok(Ok(())) => PersistOutcome::Written,
                    Ok(Err(e)) => PersistOutcome::Failed(e.to_string()),
                    Err(e) => PersistOutcome::Failed(format!("writer task failed: {}", e)),
                };

                if let PersistOutcome::Failed(reason) = &outcome {
                    error!("Failed to write catalog to {}: {}", location, reason);
                }

                let event = PersistEvent {
                    location: location.clone(),
                    courses: count,
                    outcome,
                    timestamp: Instant::now(),
                };
                subscribers
                    .lock()
                    .retain(|tx| tx.send(event.clone()).is_ok());
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    warn!("Catalog writer for {} stopped", location);
}
