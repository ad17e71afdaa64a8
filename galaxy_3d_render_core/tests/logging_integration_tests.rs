//! Integration tests for the logging system
//!
//! Installs a custom logger through the public API and checks the entries
//! produced by camera and resource operations.
//!
//! Run with: cargo test --test logging_integration_tests


use backend_test_utils::recording_backend;
use galaxy_3d_render_core::galaxy3d::camera::Camera;
use galaxy_3d_render_core::galaxy3d::log::{LogEntry, LogSeverity, Logger};
use galaxy_3d_render_core::galaxy3d::resource::TextureKeyDesc;
use galaxy_3d_render_core::galaxy3d::{log, RenderingSession};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER
// ============================================================================

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn entries_from(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries.lock().unwrap()
        .iter()
        .filter(|entry| entry.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// CAMERA
// ============================================================================

#[test]
#[serial]
fn test_integration_invalid_aspect_is_logged() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);

    let mut camera = Camera::new(640, 480);
    let before = camera.projection_matrix();
    camera.set_frustum_perspective(45.0, f64::NAN, 1.0, 100.0);

    let warnings = entries_from(&entries, "galaxy3d::Camera");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, LogSeverity::Warn);
    assert!(warnings[0].message.contains("aspect"));
    assert_eq!(camera.projection_matrix(), before);

    log::reset_logger();
}

// ============================================================================
// RESOURCES
// ============================================================================

#[test]
#[serial]
fn test_integration_leaked_key_is_logged() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);

    let mut session = RenderingSession::default();
    let (backend, _log) = recording_backend();
    let key = session.register_context(backend, None).unwrap();
    session.switch_to(key).unwrap();

    let rock = session.texture_key(TextureKeyDesc::from_source("rock.png"));
    rock.put_handle(key, 1).unwrap();
    drop(rock);
    session.reclaim();

    let warnings: Vec<_> = entries_from(&entries, "galaxy3d::ResourceManager")
        .into_iter()
        .filter(|entry| entry.severity == LogSeverity::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("1 native handle"));

    let registered = entries_from(&entries, "galaxy3d::ContextRegistry");
    assert!(registered.iter().any(|entry| entry.severity == LogSeverity::Info));

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_min_severity_silences_info() {
    let (logger, entries) = TestLogger::new();
    log::set_logger(logger);
    let previous = log::min_severity();
    log::set_min_severity(LogSeverity::Warn);

    let mut session = RenderingSession::default();
    let (backend, _log) = recording_backend();
    session.register_context(backend, None).unwrap();

    assert!(entries_from(&entries, "galaxy3d::ContextRegistry").is_empty());

    log::set_min_severity(previous);
    log::reset_logger();
}
