use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::a001_commerce::CommerceId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a product or service line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A product or service belonging to one commerce.
/// `base.description` holds the item name, `base.code` the merchant's SKU.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    /// Owning commerce
    #[serde(rename = "commerceId")]
    pub commerce_id: CommerceId,

    #[serde(default)]
    pub category: String,

    /// Unit price; 0.0 means "price on request"
    #[serde(default)]
    pub price: f64,

    /// Units in stock; None for services and untracked items
    pub stock: Option<i64>,

    /// Free-text description shown in the catalog
    #[serde(default)]
    pub detail: String,
}

impl Product {
    pub fn new_for_insert(commerce_id: CommerceId, code: String, name: String) -> Self {
        Self {
            base: BaseAggregate::new(ProductId::new_v4(), code, name),
            commerce_id,
            category: String::new(),
            price: 0.0,
            stock: None,
            detail: String::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ProductDto) {
        self.base.description = dto.name.clone();
        self.base.code = dto.code.clone().unwrap_or_default();
        self.category = dto.category.clone().unwrap_or_default();
        self.price = dto.price.unwrap_or(0.0);
        self.stock = dto.stock;
        self.detail = dto.detail.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del producto no puede estar vacío".into());
        }
        if self.price < 0.0 {
            return Err("El precio no puede ser negativo".into());
        }
        if matches!(self.stock, Some(s) if s < 0) {
            return Err("El stock no puede ser negativo".into());
        }
        Ok(())
    }

    /// Hook before persisting
    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Productos"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a product from the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    pub name: String,
    pub code: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub detail: Option<String>,
}
