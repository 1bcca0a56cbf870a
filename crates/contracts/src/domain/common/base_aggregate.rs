use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Fields shared by every aggregate in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Unique record identifier
    pub id: Id,
    /// Business code of the record (e.g. "COM-00042", "PRD-00137")
    pub code: String,
    /// Display name of the record
    pub description: String,
    /// Free-form comment
    pub comment: Option<String>,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// New aggregate with fresh metadata
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Aggregate loaded from the database, metadata preserved
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
