pub mod repository;

use repository::log_event_internal;

/// Fire-and-forget server-side event log, persisted to the system_log table
/// and surfaced in the dashboard history.
///
/// ```ignore
/// logger::log("import", "42 productos importados");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
