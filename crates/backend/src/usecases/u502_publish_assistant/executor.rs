use contracts::usecases::u502_publish_assistant::{ExportResponse, GistInfo, UploadGistResponse};
use uuid::Uuid;

use super::builder;
use super::gist_client::{GistClient, PublishError, PublishedGist};
use crate::domain::{a001_commerce, a002_product};
use crate::shared::config::GistConfig;
use crate::shared::logger;

/// Failure of an assistant export, split by who caused it
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

const DEFAULT_FILENAME_PREFIX: &str = "indiceia";

/// Export one commerce: build the assistant document, publish it as a Gist
/// (create on first export, update afterwards) and persist the raw URL back
/// onto the commerce record.
pub async fn export_commerce(
    comercio_id: &str,
    user_id: &str,
    gist_config: &GistConfig,
) -> Result<ExportResponse, ExportError> {
    let commerce_uuid = Uuid::parse_str(comercio_id)
        .map_err(|_| ExportError::NotFound("Comercio no encontrado".to_string()))?;

    // Lookup is sequenced before everything else: no document is built for
    // a commerce the caller does not own
    let commerce = a001_commerce::service::get_owned(commerce_uuid, user_id)
        .await?
        .ok_or_else(|| ExportError::NotFound("Comercio no encontrado".to_string()))?;

    let products = a002_product::repository::list_by_commerce(commerce_uuid).await?;

    let document = builder::build_document(&commerce, &products);
    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| ExportError::Internal(anyhow::anyhow!(e)))?;

    let client = GistClient::from_config(gist_config)?;
    let prefix = gist_config
        .filename_prefix
        .as_deref()
        .unwrap_or(DEFAULT_FILENAME_PREFIX);
    let filename = format!("{}-{}.json", prefix, comercio_id);
    let description = format!("Asistente de {} (INDICEIA)", commerce.base.description);

    let published = publish(&client, &commerce.publication.gist_id, &description, &filename, &content).await?;

    a001_commerce::service::record_publication(
        commerce,
        published.id.clone(),
        published.raw_url.clone(),
        published.web_url.clone(),
    )
    .await?;

    logger::log("export", &format!("Asistente publicado: {}", published.raw_url));

    Ok(ExportResponse {
        success: true,
        json_data: document,
        gist: GistInfo {
            gist_id: published.id,
            raw_url: published.raw_url,
            web_url: published.web_url,
        },
    })
}

/// Create or update, falling back to create when the stored Gist id no
/// longer exists on the provider (deleted by hand)
async fn publish(
    client: &GistClient,
    stored_gist_id: &Option<String>,
    description: &str,
    filename: &str,
    content: &str,
) -> Result<PublishedGist, PublishError> {
    if let Some(gist_id) = stored_gist_id {
        match client.update_gist(gist_id, filename, content).await {
            Ok(published) => return Ok(published),
            Err(PublishError::Provider { status: 404, .. }) => {
                tracing::warn!("Stored gist {} is gone; creating a new one", gist_id);
            }
            Err(e) => return Err(e),
        }
    }
    client.create_gist(description, filename, content).await
}

/// Thin proxy: publish an arbitrary JSON payload and hand back the raw URL
pub async fn upload_payload(
    payload: &serde_json::Value,
    filename: Option<&str>,
    gist_config: &GistConfig,
) -> Result<UploadGistResponse, PublishError> {
    let client = GistClient::from_config(gist_config)?;

    let filename = filename.unwrap_or("indiceia-export.json");
    let content = serde_json::to_string_pretty(payload)
        .map_err(|e| PublishError::Payload(e.to_string()))?;

    let published = client
        .create_gist("Exportación INDICEIA", filename, &content)
        .await?;

    Ok(UploadGistResponse {
        url: published.raw_url,
    })
}
