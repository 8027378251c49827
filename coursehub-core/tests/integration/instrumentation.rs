//! Logs emitted by the instrumented catalog and directory operations

use super::draft;
use coursehub_core::{ActingIdentity, CourseHub, MemoryBackend, Role};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[tokio::test]
async fn test_mutations_log_inside_their_spans() {
    let hub = CourseHub::open(Arc::new(MemoryBackend::new())).unwrap();
    let admin = ActingIdentity::new("admin01", Role::Admin);

    let output = capture(|| {
        let course = hub.add_course(draft("Traced", "user01", "ChungHo")).unwrap();
        hub.delete_course(course.id, &admin).unwrap();
        hub.promote_user("user02", &admin).unwrap();
    });

    assert!(output.contains("add{"), "{}", output);
    assert!(output.contains("Added course"), "{}", output);
    assert!(output.contains("delete_course{"), "{}", output);
    assert!(output.contains("actor_role=ADMIN"), "{}", output);
    assert!(output.contains("remove{"), "{}", output);
    assert!(output.contains("promote{"), "{}", output);
    assert!(output.contains("Promoted User2 from MEMBER to SUB_ADMIN"), "{}", output);
}

#[tokio::test]
async fn test_refusals_are_logged_as_warnings() {
    let hub = CourseHub::open(Arc::new(MemoryBackend::new())).unwrap();
    let course = hub.add_course(draft("Guarded", "admin01", "Admin")).unwrap();
    let sub_admin = ActingIdentity::new("subadmin01", Role::SubAdmin);

    let output = capture(|| {
        assert!(hub.delete_course(course.id, &sub_admin).is_err());
        assert!(hub.promote_user("user01", &sub_admin).is_err());
    });

    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("refused (owner admin01 is ADMIN)"), "{}", output);
    assert!(output.contains("Promotion of user01 refused for role SUB_ADMIN"), "{}", output);
}
