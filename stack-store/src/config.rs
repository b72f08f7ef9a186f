//! Store configuration.

use serde::{Deserialize, Serialize};

/// Behaviour switches for an [`OrderedStore`](crate::OrderedStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StoreConfig {
    /// Mirror every mutation to the persistence gateway and allow reads to
    /// prefer it.
    pub durable: bool,
}

impl StoreConfig {
    /// Memory-only configuration.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self { durable: false }
    }

    /// Configuration with durable mirroring enabled.
    #[must_use]
    pub const fn durable() -> Self {
        Self { durable: true }
    }
}
