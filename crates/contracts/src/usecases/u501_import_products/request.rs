use serde::{Deserialize, Serialize};

use super::mapping::ColumnMapping;

/// How parsed rows are merged into the existing product set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Every parsed row becomes a new record, unconditionally
    #[default]
    Add,
    /// Overwrite an existing record matched by code (or name); insert otherwise
    Update,
    /// Delete everything the commerce has, then insert all parsed rows
    Replace,
}

/// Request to import a CSV file into a commerce's product set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Raw CSV text (UTF-8, comma-delimited, first row is headers)
    #[serde(rename = "csvText")]
    pub csv_text: String,

    #[serde(default)]
    pub policy: ImportPolicy,

    /// Explicit column mapping; when absent the heuristic auto-mapping
    /// computed from the headers is used
    pub mapping: Option<ColumnMapping>,
}

/// Request to tokenize + auto-map a CSV without writing anything
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(rename = "csvText")]
    pub csv_text: String,
}
