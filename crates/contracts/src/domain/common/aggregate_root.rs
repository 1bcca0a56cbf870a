use super::EntityMetadata;

/// Trait implemented by every aggregate root.
///
/// Instance accessors expose the shared base fields; the static methods
/// describe the aggregate class itself (index, table, UI names).
pub trait AggregateRoot {
    type Id;

    // Instance data

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // Class-level metadata

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Database table name (e.g. "a001_commerce")
    fn collection_name() -> &'static str;

    /// Singular UI name
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;
}
