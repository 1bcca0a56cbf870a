use anyhow::Result;
use contracts::domain::a001_commerce::CommerceId;
use contracts::domain::a002_product::{Product, ProductDto};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_commerce;

/// Verify the commerce exists and belongs to the caller before touching
/// its products (commerce lookup always precedes product writes)
async fn require_owned_commerce(commerce_id: Uuid, owner_user_id: &str) -> Result<CommerceId> {
    let commerce = a001_commerce::service::get_owned(commerce_id, owner_user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Comercio no encontrado"))?;
    Ok(commerce.base.id)
}

pub async fn list_for_commerce(commerce_id: Uuid, owner_user_id: &str) -> Result<Vec<Product>> {
    require_owned_commerce(commerce_id, owner_user_id).await?;
    repository::list_by_commerce(commerce_id).await
}

pub async fn get_by_id(
    commerce_id: Uuid,
    product_id: Uuid,
    owner_user_id: &str,
) -> Result<Option<Product>> {
    require_owned_commerce(commerce_id, owner_user_id).await?;
    let product = repository::get_by_id(product_id).await?;
    // A product fetched through another tenant's commerce does not exist
    Ok(product.filter(|p| p.commerce_id.value() == commerce_id))
}

pub async fn create(commerce_id: Uuid, owner_user_id: &str, dto: ProductDto) -> Result<Uuid> {
    let commerce_ref = require_owned_commerce(commerce_id, owner_user_id).await?;

    let mut product = Product::new_for_insert(
        commerce_ref,
        dto.code.clone().unwrap_or_default(),
        dto.name.clone(),
    );
    product.update(&dto);
    product.validate().map_err(|e| anyhow::anyhow!(e))?;

    repository::insert(&product).await
}

pub async fn update(commerce_id: Uuid, owner_user_id: &str, dto: ProductDto) -> Result<()> {
    require_owned_commerce(commerce_id, owner_user_id).await?;

    let id_str = dto
        .id
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Falta el id del producto"))?;
    let product_id = Uuid::parse_str(id_str)?;

    let mut product = repository::get_by_id(product_id)
        .await?
        .filter(|p| p.commerce_id.value() == commerce_id)
        .ok_or_else(|| anyhow::anyhow!("Producto no encontrado"))?;

    product.update(&dto);
    product.validate().map_err(|e| anyhow::anyhow!(e))?;
    product.before_write();

    repository::update(&product).await
}

pub async fn delete(commerce_id: Uuid, owner_user_id: &str, product_id: Uuid) -> Result<bool> {
    require_owned_commerce(commerce_id, owner_user_id).await?;

    match repository::get_by_id(product_id).await? {
        Some(p) if p.commerce_id.value() == commerce_id => repository::soft_delete(product_id).await,
        _ => Ok(false),
    }
}
