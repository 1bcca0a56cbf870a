use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/system/auth/me",
            get(|| async { "ok" })
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .fallback_service(ServeDir::new("dist"))
}
