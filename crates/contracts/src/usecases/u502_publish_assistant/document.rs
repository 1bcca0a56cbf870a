use serde::{Deserialize, Serialize};

/// The JSON document published to the Gist and consumed by the chat widget.
///
/// Wire names are camelCase: the widget is a JavaScript consumer and the
/// document format predates this server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantDocument {
    pub version: u32,
    pub commerce: CommerceCard,
    /// Weekly opening hours rendered as customer-facing lines
    /// (e.g. "lunes: 09:00 a 18:00")
    pub hours: Vec<String>,
    pub payment_methods: Vec<String>,
    pub catalog: Vec<CatalogItem>,
    /// Keyword-triggered responses, evaluated in order by the widget
    pub rules: Vec<AssistantRule>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Public profile of the commerce inside the exported document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
}

/// One catalog entry inside the exported document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: f64,
    pub stock: Option<i64>,
    pub description: String,
}

/// A rule of the exported assistant: when a customer message contains one of
/// the keywords, the widget answers with `response`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRule {
    pub intent: String,
    pub keywords: Vec<String>,
    pub response: String,
}
