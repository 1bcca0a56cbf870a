use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a002_product;
use crate::system::auth::extractor::CurrentUser;

type Product = contracts::domain::a002_product::Product;
type ProductDto = contracts::domain::a002_product::ProductDto;

/// GET /api/commerce/:id/products
pub async fn list_for_commerce(
    CurrentUser(claims): CurrentUser,
    Path(commerce_id): Path<String>,
) -> Result<Json<Vec<Product>>, axum::http::StatusCode> {
    let commerce_uuid = match uuid::Uuid::parse_str(&commerce_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_product::service::list_for_commerce(commerce_uuid, &claims.sub).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::NOT_FOUND),
    }
}

/// GET /api/commerce/:id/products/:product_id
pub async fn get_by_id(
    CurrentUser(claims): CurrentUser,
    Path((commerce_id, product_id)): Path<(String, String)>,
) -> Result<Json<Product>, axum::http::StatusCode> {
    let (commerce_uuid, product_uuid) = match (
        uuid::Uuid::parse_str(&commerce_id),
        uuid::Uuid::parse_str(&product_id),
    ) {
        (Ok(c), Ok(p)) => (c, p),
        _ => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_product::service::get_by_id(commerce_uuid, product_uuid, &claims.sub).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::NOT_FOUND),
    }
}

/// POST /api/commerce/:id/products — create when the DTO has no id
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    Path(commerce_id): Path<String>,
    Json(dto): Json<ProductDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let commerce_uuid = match uuid::Uuid::parse_str(&commerce_id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };

    let result = if dto.id.is_some() {
        a002_product::service::update(commerce_uuid, &claims.sub, dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a002_product::service::create(commerce_uuid, &claims.sub, dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::warn!("product upsert failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/commerce/:id/products/:product_id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path((commerce_id, product_id)): Path<(String, String)>,
) -> Result<(), axum::http::StatusCode> {
    let (commerce_uuid, product_uuid) = match (
        uuid::Uuid::parse_str(&commerce_id),
        uuid::Uuid::parse_str(&product_id),
    ) {
        (Ok(c), Ok(p)) => (c, p),
        _ => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_product::service::delete(commerce_uuid, &claims.sub, product_uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
