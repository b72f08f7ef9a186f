/// Errors produced by the `stack-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A widget update omitted a field that must always be supplied.
    #[error("required attribute '{field}' is missing")]
    MissingAttribute { field: &'static str },
}
