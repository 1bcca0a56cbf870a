use axum::{extract::Path, http::StatusCode, Json};
use serde_json::json;

use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_products::{
    ImportPreview, ImportReport, ImportRequest, PreviewRequest,
};
use contracts::usecases::u502_publish_assistant::{
    ExportRequest, ExportResponse, UploadGistRequest, UploadGistResponse,
};

use crate::shared::config;
use crate::system::auth::extractor::CurrentUser;
use crate::usecases::u501_import_products::executor as import_executor;
use crate::usecases::u502_publish_assistant::executor as export_executor;
use crate::usecases::u502_publish_assistant::executor::ExportError;
use crate::usecases::u502_publish_assistant::gist_client::PublishError;

type ErrorBody = (StatusCode, Json<serde_json::Value>);

fn error_body(status: StatusCode, message: impl AsRef<str>) -> ErrorBody {
    (status, Json(json!({ "error": message.as_ref() })))
}

fn usecase_error_to_response(e: UseCaseError) -> ErrorBody {
    let status = match e.code.as_str() {
        "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
        "NOT_FOUND" => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match &e.details {
        Some(details) => format!("{}: {}", e.message, details),
        None => e.message.clone(),
    };
    error_body(status, message)
}

// ============================================================================
// u501: CSV import
// ============================================================================

/// POST /api/commerce/:id/import/preview
pub async fn u501_preview(
    CurrentUser(claims): CurrentUser,
    Path(commerce_id): Path<String>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<ImportPreview>, ErrorBody> {
    let commerce_uuid = uuid::Uuid::parse_str(&commerce_id)
        .map_err(|_| error_body(StatusCode::BAD_REQUEST, "id de comercio inválido"))?;

    import_executor::preview(commerce_uuid, &claims.sub, request)
        .await
        .map(Json)
        .map_err(usecase_error_to_response)
}

/// POST /api/commerce/:id/import
pub async fn u501_run_import(
    CurrentUser(claims): CurrentUser,
    Path(commerce_id): Path<String>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportReport>, ErrorBody> {
    let commerce_uuid = uuid::Uuid::parse_str(&commerce_id)
        .map_err(|_| error_body(StatusCode::BAD_REQUEST, "id de comercio inválido"))?;

    import_executor::run_import(commerce_uuid, &claims.sub, request)
        .await
        .map(Json)
        .map_err(usecase_error_to_response)
}

// ============================================================================
// u502: assistant export / Gist proxies
// ============================================================================

/// Missing request fields answer 400 with a descriptive message instead of
/// a bare serde rejection
fn validate_export_request(request: &ExportRequest) -> Result<(String, String), String> {
    let comercio_id = request
        .comercio_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "El campo comercioId es requerido".to_string())?;
    let user_id = request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "El campo userId es requerido".to_string())?;
    Ok((comercio_id.to_string(), user_id.to_string()))
}

fn export_error_to_response(e: ExportError) -> ErrorBody {
    match e {
        ExportError::NotFound(message) => error_body(StatusCode::NOT_FOUND, message),
        ExportError::Publish(publish) => publish_error_to_response(publish),
        ExportError::Internal(err) => {
            tracing::error!("export failed: {}", err);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Provider failures keep the downstream status; missing credentials are a
/// server misconfiguration (500); transport problems map to 502
fn publish_error_to_response(e: PublishError) -> ErrorBody {
    match e {
        PublishError::MissingToken => {
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        PublishError::Provider { status, .. } => {
            let status_code =
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            error_body(status_code, e.to_string())
        }
        PublishError::Transport(_) => error_body(StatusCode::BAD_GATEWAY, e.to_string()),
        PublishError::Payload(_) => error_body(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

/// POST /api/export-json
pub async fn u502_export_json(
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, ErrorBody> {
    let (comercio_id, user_id) = validate_export_request(&request)
        .map_err(|message| error_body(StatusCode::BAD_REQUEST, message))?;

    let gist_config = &config::get_config().gist;

    export_executor::export_commerce(&comercio_id, &user_id, gist_config)
        .await
        .map(Json)
        .map_err(export_error_to_response)
}

/// POST /api/generate-gist and POST /api/uploadGist: publish an arbitrary
/// payload, answer `{url}`
pub async fn u502_upload_gist(
    Json(request): Json<UploadGistRequest>,
) -> Result<Json<UploadGistResponse>, ErrorBody> {
    let gist_config = &config::get_config().gist;

    export_executor::upload_payload(&request.payload, request.filename.as_deref(), gist_config)
        .await
        .map(Json)
        .map_err(publish_error_to_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_request_requires_comercio_id() {
        let request = ExportRequest {
            comercio_id: None,
            user_id: Some("user-1".to_string()),
        };
        let err = validate_export_request(&request).unwrap_err();
        assert!(err.contains("comercioId"));
    }

    #[test]
    fn export_request_requires_user_id() {
        let request = ExportRequest {
            comercio_id: Some("abc".to_string()),
            user_id: Some("   ".to_string()),
        };
        let err = validate_export_request(&request).unwrap_err();
        assert!(err.contains("userId"));
    }

    #[test]
    fn complete_export_request_passes() {
        let request = ExportRequest {
            comercio_id: Some("abc".to_string()),
            user_id: Some("user-1".to_string()),
        };
        assert_eq!(
            validate_export_request(&request).unwrap(),
            ("abc".to_string(), "user-1".to_string())
        );
    }

    #[test]
    fn missing_token_maps_to_500() {
        let (status, _) = publish_error_to_response(PublishError::MissingToken);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_status_is_surfaced() {
        let (status, _) = publish_error_to_response(PublishError::Provider {
            status: 422,
            message: "Validation Failed".to_string(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_usecase_error_maps_to_400() {
        let (status, _) = usecase_error_to_response(UseCaseError::validation("sin nombre"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
