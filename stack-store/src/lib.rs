//! Stacking-ordered widget store for the widget stack service.
//!
//! [`OrderedStore`] keeps widgets densely ordered by stacking index and serves
//! paged, filtered reads. When durable mode is on it mirrors every mutation to
//! a [`PersistenceGateway`] and lets reads prefer the durable copy.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod persistence;
pub mod store;

pub use config::StoreConfig;
pub use error::{PersistenceError, StoreError};
pub use persistence::{InMemoryGateway, PersistenceGateway, SortOrder};
pub use store::{OrderedStore, MAX_PAGE_SIZE, TOPMOST_Z};
