use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_commerce;
use crate::system::auth::extractor::CurrentUser;

type Commerce = contracts::domain::a001_commerce::Commerce;
type CommerceDto = contracts::domain::a001_commerce::CommerceDto;

/// GET /api/commerce
pub async fn list_mine(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<Commerce>>, axum::http::StatusCode> {
    match a001_commerce::service::list_for_owner(&claims.sub).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/commerce/:id
pub async fn get_by_id(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Commerce>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_commerce::service::get_owned(uuid, &claims.sub).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/commerce — create when the DTO has no id, update otherwise
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CommerceDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_commerce::service::update(&claims.sub, dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_commerce::service::create(&claims.sub, dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::warn!("commerce upsert failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/commerce/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_commerce::service::delete(&claims.sub, uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
