//! Error types for the store crate.

use stack_core::{CoreError, WidgetId};

/// Caller-facing failures of [`OrderedStore`](crate::OrderedStore) operations.
///
/// All variants are recoverable and terminal for the call that produced them;
/// the store never retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced widget id is not held by the store.
    #[error("widget not found: {0}")]
    NotFound(WidgetId),

    /// An update omitted a required attribute.
    #[error("required attribute '{field}' is missing")]
    NullAttribute { field: &'static str },

    /// A page request asked for more widgets than the store serves at once.
    #[error("too many widgets requested: {requested} exceeds the limit of {max}")]
    TooManyRequested { requested: usize, max: usize },
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingAttribute { field } => StoreError::NullAttribute { field },
        }
    }
}

/// Failures reported by a [`PersistenceGateway`](crate::PersistenceGateway).
///
/// The store treats the backend as a best-effort mirror, so these never reach
/// store callers; they are logged and the in-memory state stays authoritative.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PersistenceError {
    /// The backend could not be reached.
    #[error("persistence backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the operation. Not raised by
    /// [`InMemoryGateway`](crate::InMemoryGateway); available to external
    /// backends.
    #[error("persistence {operation} failed: {reason}")]
    OperationFailed {
        operation: &'static str,
        reason: String,
    },
}
