use serde::{Deserialize, Serialize};

/// Body of `POST /api/export-json`.
///
/// Both fields are declared optional so the handler can answer a descriptive
/// 400 instead of a serde rejection when one is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "comercioId")]
    pub comercio_id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Body of the thin Gist proxies (`/api/generate-gist`, `/api/uploadGist`):
/// an arbitrary JSON payload plus an optional filename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadGistRequest {
    pub payload: serde_json::Value,
    pub filename: Option<String>,
}
