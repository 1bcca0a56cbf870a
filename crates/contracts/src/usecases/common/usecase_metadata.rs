/// Static description of a use case
pub trait UseCaseMetadata {
    /// Use-case index in the system (e.g. "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (snake_case)
    fn usecase_name() -> &'static str;

    /// Human-readable name for the dashboard
    fn display_name() -> &'static str;

    /// Short description of what the use case does
    fn description() -> &'static str;
}
