use serde::{Deserialize, Serialize};

use super::mapping::ColumnMapping;
use super::record::ParsedRecord;
use super::request::ImportPolicy;

/// Result of a committed import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub policy: ImportPolicy,
    /// Rows parsed from the file
    pub total_rows: usize,
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Rows whose name match was ambiguous (several existing records share
    /// the name); the first match in repository order was overwritten
    pub ambiguous_matches: usize,
    pub warnings: Vec<String>,
}

/// Result of a dry-run: tokenization + auto-mapping, nothing written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreview {
    pub headers: Vec<String>,
    pub mapping: ColumnMapping,
    /// Headers that matched no target field and will be ignored
    #[serde(rename = "ignoredHeaders")]
    pub ignored_headers: Vec<String>,
    /// Whether the mapping feeds the mandatory name field
    pub importable: bool,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    /// First rows parsed under the mapping, for the confirmation dialog
    pub sample: Vec<ParsedRecord>,
}
