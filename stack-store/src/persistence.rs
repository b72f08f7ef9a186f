//! Durable backend abstraction.
//!
//! The store only ever talks to a [`PersistenceGateway`]; the engine behind it
//! (relational database, key-value store, remote service) is out of this
//! crate's hands.

use std::{collections::HashMap, sync::Arc, sync::RwLock};

use stack_core::{Widget, WidgetId};

use crate::PersistenceError;

/// Ordering requested from [`PersistenceGateway::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Lowest stacking index first.
    ZAscending,
    /// Highest stacking index first. The store itself only pages upward;
    /// this exists for other consumers of a backend.
    ZDescending,
}

/// Durable storage for widgets.
///
/// Implementations must be `Send + Sync`. Mutating calls are issued while the
/// store holds its write lock, so implementations should not call back into
/// the store. Internal concurrency control is the implementation's concern.
pub trait PersistenceGateway: Send + Sync {
    /// Insert or replace `widget` keyed by its id.
    ///
    /// # Errors
    /// Returns a [`PersistenceError`] if the backend cannot store the widget.
    fn save(&self, widget: &Widget) -> Result<(), PersistenceError>;

    /// Look up a widget by id.
    ///
    /// # Errors
    /// Returns a [`PersistenceError`] if the backend cannot be queried.
    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, PersistenceError>;

    /// Return up to `limit` widgets starting at `offset`, sorted by `order`.
    ///
    /// # Errors
    /// Returns a [`PersistenceError`] if the backend cannot be queried.
    fn find_all(
        &self,
        offset: usize,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<Widget>, PersistenceError>;

    /// Remove `widget` from the backend.
    ///
    /// # Errors
    /// Returns a [`PersistenceError`] if the backend cannot remove the widget.
    fn delete(&self, widget: &Widget) -> Result<(), PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Arc<G> {
    fn save(&self, widget: &Widget) -> Result<(), PersistenceError> {
        (**self).save(widget)
    }

    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, PersistenceError> {
        (**self).find_by_id(id)
    }

    fn find_all(
        &self,
        offset: usize,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<Widget>, PersistenceError> {
        (**self).find_all(offset, limit, order)
    }

    fn delete(&self, widget: &Widget) -> Result<(), PersistenceError> {
        (**self).delete(widget)
    }
}

/// Process-local [`PersistenceGateway`] backed by a hash map.
///
/// Stands in for a real backend in tests and in deployments that enable
/// durable mode without wiring an external engine.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    rows: RwLock<HashMap<WidgetId, Widget>>,
}

impl InMemoryGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let rows = self.rows.read().expect("gateway read lock poisoned");
        rows.len()
    }

    /// Returns `true` if no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn save(&self, widget: &Widget) -> Result<(), PersistenceError> {
        self.rows
            .write()
            .map_err(|_| PersistenceError::Unavailable("gateway write lock poisoned".to_owned()))?
            .insert(widget.id.clone(), widget.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, PersistenceError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| PersistenceError::Unavailable("gateway read lock poisoned".to_owned()))?;
        Ok(rows.get(id).cloned())
    }

    fn find_all(
        &self,
        offset: usize,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<Widget>, PersistenceError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| PersistenceError::Unavailable("gateway read lock poisoned".to_owned()))?;
        let mut all: Vec<&Widget> = rows.values().collect();
        match order {
            SortOrder::ZAscending => {
                all.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.id.cmp(&b.id)));
            }
            SortOrder::ZDescending => {
                all.sort_by(|a, b| b.z.cmp(&a.z).then_with(|| a.id.cmp(&b.id)));
            }
        }
        Ok(all.into_iter().skip(offset).take(limit).cloned().collect())
    }

    fn delete(&self, widget: &Widget) -> Result<(), PersistenceError> {
        self.rows
            .write()
            .map_err(|_| PersistenceError::Unavailable("gateway write lock poisoned".to_owned()))?
            .remove(&widget.id);
        Ok(())
    }
}
