use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::WeekSchedule;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a commerce (merchant tenant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommerceId(pub Uuid);

impl CommerceId {
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

impl AggregateId for CommerceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CommerceId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

/// Payment methods a commerce accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    BankTransfer,
    MercadoPago,
    Qr,
}

impl PaymentMethod {
    /// Customer-facing Spanish label, used by the assistant
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::DebitCard => "tarjeta de débito",
            PaymentMethod::CreditCard => "tarjeta de crédito",
            PaymentMethod::BankTransfer => "transferencia bancaria",
            PaymentMethod::MercadoPago => "Mercado Pago",
            PaymentMethod::Qr => "pago con QR",
        }
    }
}

/// Bookkeeping written back after a successful Gist publication
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GistPublication {
    pub gist_id: Option<String>,
    pub raw_url: Option<String>,
    pub web_url: Option<String>,
    pub exported_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A merchant tenant: profile, opening hours and payment configuration.
/// `base.description` holds the business name shown to customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commerce {
    #[serde(flatten)]
    pub base: BaseAggregate<CommerceId>,

    /// Account that owns this commerce
    #[serde(rename = "ownerUserId")]
    pub owner_user_id: String,

    /// Business category (e.g. "restaurante", "ferretería")
    pub category: String,

    pub address: String,
    pub phone: String,
    pub whatsapp: String,

    pub hours: WeekSchedule,

    #[serde(rename = "paymentMethods")]
    pub payment_methods: Vec<PaymentMethod>,

    /// Greeting line the assistant opens conversations with
    #[serde(rename = "assistantGreeting")]
    pub assistant_greeting: String,

    /// Publication state of the exported assistant document
    #[serde(default)]
    pub publication: GistPublication,
}

impl Commerce {
    /// New commerce for insertion
    pub fn new_for_insert(owner_user_id: String, code: String, dto: &CommerceDto) -> Self {
        let mut commerce = Self {
            base: BaseAggregate::new(CommerceId::new_v4(), code, dto.name.clone()),
            owner_user_id,
            category: dto.category.clone(),
            address: dto.address.clone(),
            phone: dto.phone.clone(),
            whatsapp: dto.whatsapp.clone(),
            hours: dto.hours.clone(),
            payment_methods: dto.payment_methods.clone(),
            assistant_greeting: dto.assistant_greeting.clone().unwrap_or_default(),
            publication: GistPublication::default(),
        };
        commerce.base.comment = dto.comment.clone();
        commerce
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Apply an edit from the dashboard; publication state is untouched
    pub fn update(&mut self, dto: &CommerceDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone();
        self.address = dto.address.clone();
        self.phone = dto.phone.clone();
        self.whatsapp = dto.whatsapp.clone();
        self.hours = dto.hours.clone();
        self.payment_methods = dto.payment_methods.clone();
        if let Some(greeting) = &dto.assistant_greeting {
            self.assistant_greeting = greeting.clone();
        }
    }

    /// Record a successful publication
    pub fn mark_published(&mut self, gist_id: String, raw_url: String, web_url: String) {
        self.publication = GistPublication {
            gist_id: Some(gist_id),
            raw_url: Some(raw_url),
            web_url: Some(web_url),
            exported_at: Some(chrono::Utc::now()),
        };
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del comercio no puede estar vacío".into());
        }
        if self.owner_user_id.trim().is_empty() {
            return Err("El comercio debe pertenecer a un usuario".into());
        }
        Ok(())
    }

    /// Hook before persisting
    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Commerce {
    type Id = CommerceId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "commerce"
    }

    fn element_name() -> &'static str {
        "Comercio"
    }

    fn list_name() -> &'static str {
        "Comercios"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a commerce from the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommerceDto {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub hours: WeekSchedule,
    #[serde(rename = "paymentMethods", default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(rename = "assistantGreeting")]
    pub assistant_greeting: Option<String>,
    pub comment: Option<String>,
}
