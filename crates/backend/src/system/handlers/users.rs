use axum::{extract::Path, http::StatusCode, Json};
use contracts::system::users::{ChangePasswordDto, UpdateUserDto, User};

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/system/users (admin only)
pub async fn list() -> Result<Json<Vec<User>>, StatusCode> {
    match service::list_all().await {
        Ok(users) => Ok(Json(users)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/system/users/:id (admin only)
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /api/system/users/:id (admin only)
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<StatusCode, StatusCode> {
    dto.id = id;
    match service::update(dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(_) => Err(StatusCode::BAD_REQUEST),
    }
}

/// POST /api/system/users/:id/change-password
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, StatusCode> {
    dto.user_id = id;
    match service::change_password(dto, &claims.sub).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(_) => Err(StatusCode::BAD_REQUEST),
    }
}
