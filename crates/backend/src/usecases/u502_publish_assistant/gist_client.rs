use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::shared::config::GistConfig;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "indiceia-server";

/// Failure modes of a Gist publication.
/// Provider failures keep the downstream status code so handlers can
/// surface it instead of a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("El token del proveedor de Gists no está configurado en el servidor")]
    MissingToken,

    #[error("El proveedor de Gists respondió {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("No se pudo contactar al proveedor de Gists: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Respuesta inesperada del proveedor de Gists: {0}")]
    Payload(String),
}

/// Where a published document ended up
#[derive(Debug, Clone)]
pub struct PublishedGist {
    pub id: String,
    pub raw_url: String,
    pub web_url: String,
}

// Subset of the provider's Gist resource we care about
#[derive(Debug, Deserialize)]
struct GistApiResponse {
    id: String,
    html_url: String,
    files: HashMap<String, GistApiFile>,
}

#[derive(Debug, Deserialize)]
struct GistApiFile {
    raw_url: String,
}

/// HTTP client for the Gist provider's REST API.
/// The token is server-held; requests are authenticated with it.
pub struct GistClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl GistClient {
    /// Build a client from configuration; fails when no token is available
    pub fn from_config(config: &GistConfig) -> Result<Self, PublishError> {
        let token = config.resolve_token().ok_or(PublishError::MissingToken)?;
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_base,
            token,
        })
    }

    /// Create a new public Gist holding one file
    pub async fn create_gist(
        &self,
        description: &str,
        filename: &str,
        content: &str,
    ) -> Result<PublishedGist, PublishError> {
        let url = format!("{}/gists", self.api_base);
        let body = json!({
            "description": description,
            "public": true,
            "files": { filename: { "content": content } }
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response, filename).await
    }

    /// Update the file inside an existing Gist
    pub async fn update_gist(
        &self,
        gist_id: &str,
        filename: &str,
        content: &str,
    ) -> Result<PublishedGist, PublishError> {
        let url = format!("{}/gists/{}", self.api_base, gist_id);
        let body = json!({
            "files": { filename: { "content": content } }
        });

        let response = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response, filename).await
    }

    async fn parse_response(
        response: reqwest::Response,
        filename: &str,
    ) -> Result<PublishedGist, PublishError> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Gist API request failed ({}): {}", status, message);
            return Err(PublishError::Provider {
                status: status.as_u16(),
                message: provider_message(&message),
            });
        }

        let body = response.text().await?;
        let parsed: GistApiResponse =
            serde_json::from_str(&body).map_err(|e| PublishError::Payload(e.to_string()))?;

        extract_published(parsed, filename)
    }
}

/// Pull our file's raw URL out of the provider payload; any file wins when
/// the exact name is absent (the provider may rename on collisions)
fn extract_published(
    response: GistApiResponse,
    filename: &str,
) -> Result<PublishedGist, PublishError> {
    let raw_url = response
        .files
        .get(filename)
        .map(|f| f.raw_url.clone())
        .or_else(|| response.files.values().next().map(|f| f.raw_url.clone()))
        .ok_or_else(|| PublishError::Payload("el Gist no contiene archivos".to_string()))?;

    Ok(PublishedGist {
        id: response.id,
        raw_url,
        web_url: response.html_url,
    })
}

/// The provider answers errors as JSON with a "message" field; fall back to
/// the raw body when it does not
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.chars().take(300).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "id": "abc123",
        "html_url": "https://gist.github.com/indiceia/abc123",
        "files": {
            "indiceia-demo.json": {
                "raw_url": "https://gist.githubusercontent.com/indiceia/abc123/raw/indiceia-demo.json"
            }
        }
    }"#;

    #[test]
    fn parses_provider_payload() {
        let parsed: GistApiResponse = serde_json::from_str(FIXTURE).unwrap();
        let published = extract_published(parsed, "indiceia-demo.json").unwrap();

        assert_eq!(published.id, "abc123");
        assert!(reqwest::Url::parse(&published.raw_url).is_ok());
        assert!(published.web_url.starts_with("https://gist.github.com/"));
    }

    #[test]
    fn falls_back_to_any_file_when_name_differs() {
        let parsed: GistApiResponse = serde_json::from_str(FIXTURE).unwrap();
        let published = extract_published(parsed, "otro-nombre.json").unwrap();
        assert!(published.raw_url.contains("/raw/"));
    }

    #[test]
    fn empty_file_map_is_a_payload_error() {
        let parsed: GistApiResponse = serde_json::from_str(
            r#"{"id": "x", "html_url": "https://gist.github.com/x", "files": {}}"#,
        )
        .unwrap();
        assert!(matches!(
            extract_published(parsed, "f.json"),
            Err(PublishError::Payload(_))
        ));
    }

    #[test]
    fn provider_message_prefers_json_field() {
        assert_eq!(
            provider_message(r#"{"message": "Bad credentials"}"#),
            "Bad credentials"
        );
        assert_eq!(provider_message("plain text"), "plain text");
    }

    #[test]
    fn missing_token_is_detected() {
        let config = GistConfig::default();
        // only when the env var is absent too does this fail
        if std::env::var("GIST_TOKEN").is_err() {
            assert!(matches!(
                GistClient::from_config(&config),
                Err(PublishError::MissingToken)
            ));
        }
    }
}
