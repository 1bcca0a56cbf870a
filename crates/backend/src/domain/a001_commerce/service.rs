use anyhow::Result;
use contracts::domain::a001_commerce::{Commerce, CommerceDto};
use uuid::Uuid;

use super::repository;
use crate::shared::logger;

/// List the commerces of one account
pub async fn list_for_owner(owner_user_id: &str) -> Result<Vec<Commerce>> {
    repository::list_by_owner(owner_user_id).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Commerce>> {
    repository::get_by_id(id).await
}

/// Fetch a commerce and verify it belongs to `owner_user_id`.
/// Ownership failures look like absence so tenants cannot probe each other.
pub async fn get_owned(id: Uuid, owner_user_id: &str) -> Result<Option<Commerce>> {
    let commerce = repository::get_by_id(id).await?;
    Ok(commerce.filter(|c| c.owner_user_id == owner_user_id))
}

pub async fn create(owner_user_id: &str, dto: CommerceDto) -> Result<Uuid> {
    let code = next_code(owner_user_id).await?;
    let mut commerce = Commerce::new_for_insert(owner_user_id.to_string(), code, &dto);
    commerce.validate().map_err(|e| anyhow::anyhow!(e))?;

    let id = repository::insert(&commerce).await?;
    logger::log(
        "commerce",
        &format!("Comercio creado: {}", commerce.base.description),
    );
    Ok(id)
}

pub async fn update(owner_user_id: &str, dto: CommerceDto) -> Result<()> {
    let id_str = dto
        .id
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Falta el id del comercio"))?;
    let id = Uuid::parse_str(id_str)?;

    let mut commerce = get_owned(id, owner_user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Comercio no encontrado"))?;

    commerce.update(&dto);
    commerce.validate().map_err(|e| anyhow::anyhow!(e))?;
    commerce.before_write();

    repository::update(&commerce).await?;
    Ok(())
}

pub async fn delete(owner_user_id: &str, id: Uuid) -> Result<bool> {
    match get_owned(id, owner_user_id).await? {
        Some(_) => repository::soft_delete(id).await,
        None => Ok(false),
    }
}

/// Persist the Gist location after a successful publication
pub async fn record_publication(
    mut commerce: Commerce,
    gist_id: String,
    raw_url: String,
    web_url: String,
) -> Result<()> {
    commerce.mark_published(gist_id, raw_url, web_url);
    commerce.before_write();
    repository::update(&commerce).await?;
    Ok(())
}

async fn next_code(owner_user_id: &str) -> Result<String> {
    let count = repository::count_by_owner(owner_user_id).await?;
    Ok(format!("COM-{:05}", count + 1))
}
