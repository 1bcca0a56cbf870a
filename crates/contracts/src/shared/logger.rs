use serde::{Deserialize, Serialize};

/// Persistent application log entry, shown in the dashboard history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String, // "client" or "server"
    pub category: String,
    pub message: String,
}

/// DTO for client-side notifications persisted to the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub source: String,
    pub category: String,
    pub message: String,
}
