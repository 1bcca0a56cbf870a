use serde::{Deserialize, Serialize};

use super::document::AssistantDocument;

/// Where the published document lives on the Gist provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistInfo {
    pub gist_id: String,
    pub raw_url: String,
    pub web_url: String,
}

/// Success body of `POST /api/export-json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub json_data: AssistantDocument,
    pub gist: GistInfo,
}

/// Success body of the thin Gist proxies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadGistResponse {
    pub url: String,
}
