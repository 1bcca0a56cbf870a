use serde::{Deserialize, Serialize};

/// One CSV row after column mapping and typed parsing.
///
/// `name` is the only mandatory field; everything else is absent when the
/// source column was unmapped, empty or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub name: String,
    pub code: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub description: Option<String>,
}

impl ParsedRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            category: None,
            price: None,
            stock: None,
            description: None,
        }
    }
}
