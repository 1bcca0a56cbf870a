use axum::{http::StatusCode, Json};
use contracts::shared::logger::{CreateLogRequest, LogEntry};

use crate::shared::logger;

const DEFAULT_LOG_LIMIT: u64 = 200;

/// GET /api/logs
pub async fn list_recent() -> Result<Json<Vec<LogEntry>>, StatusCode> {
    match logger::repository::get_recent_logs(DEFAULT_LOG_LIMIT).await {
        Ok(entries) => Ok(Json(entries)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/logs — clients persist their notification history here
pub async fn create(Json(request): Json<CreateLogRequest>) -> StatusCode {
    match logger::repository::log_event(&request.source, &request.category, &request.message).await
    {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    match logger::repository::clear_all_logs().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
