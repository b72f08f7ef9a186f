//! Stacking-ordered widget store.
//!
//! Holds every widget behind one reader/writer lock. Mutations take the write
//! lock for their whole duration, including the durable mirror call, so a
//! create's shift-and-insert is never observed half done and the backend sees
//! mutations in the same order as memory.

use std::{
    fmt,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use indexmap::IndexMap;
use stack_core::{Filter, NewWidget, Widget, WidgetId, WidgetUpdate};

use crate::{PersistenceError, PersistenceGateway, SortOrder, StoreConfig, StoreError};

/// Largest page [`OrderedStore::get_many`] will serve.
pub const MAX_PAGE_SIZE: usize = 500;

/// Stacking index given to a widget created without `z` into an empty store:
/// `i32::MAX`, the largest index a create can request.
///
/// Stored indices are `i64` while callers place widgets with `i32`, so the
/// stack keeps growing past this value without two widgets meeting.
pub const TOPMOST_Z: i64 = 2_147_483_647;

type Widgets = IndexMap<WidgetId, Widget>;

/// Thread-safe widget collection ordered by stacking index.
///
/// Entries live in insertion order; reads sort them by `z` with a stable sort,
/// so widgets sharing an index (possible after [`OrderedStore::update`]) come
/// back in the order they were created.
pub struct OrderedStore {
    widgets: RwLock<Widgets>,
    durable: Option<Box<dyn PersistenceGateway>>,
}

impl OrderedStore {
    /// Create an empty, memory-only store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: RwLock::new(IndexMap::new()),
            durable: None,
        }
    }

    /// Create an empty store that mirrors to `gateway` when `config.durable`
    /// is set. With durable mode off the gateway is dropped unused.
    #[must_use]
    pub fn with_gateway(config: StoreConfig, gateway: impl PersistenceGateway + 'static) -> Self {
        let durable: Option<Box<dyn PersistenceGateway>> = if config.durable {
            Some(Box::new(gateway))
        } else {
            None
        };
        Self {
            widgets: RwLock::new(IndexMap::new()),
            durable,
        }
    }

    /// Returns `true` if mutations are mirrored to a persistence gateway.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    /// Number of widgets held in memory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the store holds no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert a new widget and return a copy of what was stored.
    ///
    /// Without an explicit `z` the widget lands one above the current maximum,
    /// or at [`TOPMOST_Z`] when the store is empty. With an explicit `z`,
    /// every stored widget at `z` or above moves up by one first.
    pub fn create(&self, request: NewWidget) -> Widget {
        let mut widgets = self.write();

        let z = match request.z {
            Some(z) => {
                let z = i64::from(z);
                let shifted = shift_up_from(&mut widgets, z);
                if let Some(gateway) = &self.durable {
                    for id in &shifted {
                        if let Some(moved) = widgets.get(id) {
                            mirror(gateway.save(moved), "save", id);
                        }
                    }
                }
                tracing::debug!(z, shifted = shifted.len(), "made room for explicit placement");
                z
            }
            None => next_topmost(&widgets),
        };

        let widget = request.into_widget(WidgetId::generate(), z, Utc::now());
        widgets.insert(widget.id.clone(), widget.clone());
        if let Some(gateway) = &self.durable {
            mirror(gateway.save(&widget), "save", &widget.id);
        }

        tracing::debug!(widget_id = %widget.id, z, "widget created");
        widget
    }

    /// Replace the widget stored under `id` and return a copy of the result.
    ///
    /// Other widgets are left where they are even if the new `z` collides.
    ///
    /// # Errors
    /// Returns [`StoreError::NullAttribute`] if any field of `update` is
    /// missing, checked before the lookup.
    /// Returns [`StoreError::NotFound`] if `id` is not stored.
    pub fn update(&self, update: WidgetUpdate, id: &WidgetId) -> Result<Widget, StoreError> {
        let widget = update.into_widget(id.clone(), Utc::now())?;

        let mut widgets = self.write();
        let slot = widgets.get_mut(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        slot.clone_from(&widget);
        if let Some(gateway) = &self.durable {
            mirror(gateway.save(&widget), "save", id);
        }

        tracing::debug!(widget_id = %id, z = widget.z, "widget updated");
        Ok(widget)
    }

    /// Look up a widget by id.
    ///
    /// With durable mode on and `prefer_durable` set, the gateway answers
    /// first; memory is consulted when it has no such widget or fails.
    #[must_use]
    pub fn get_by_id(&self, id: &WidgetId, prefer_durable: bool) -> Option<Widget> {
        let widgets = self.read();

        if let Some(gateway) = self.preferred_gateway(prefer_durable) {
            match gateway.find_by_id(id) {
                Ok(Some(widget)) => return Some(widget),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(widget_id = %id, error = %e, "durable lookup failed");
                }
            }
        }

        widgets.get(id).cloned()
    }

    /// Return up to `limit` widgets starting at `offset`, lowest `z` first.
    ///
    /// With durable mode on and `prefer_durable` set, a non-empty page from the
    /// gateway is returned as is; otherwise the page is cut from memory.
    ///
    /// # Errors
    /// Returns [`StoreError::TooManyRequested`] if `limit` exceeds
    /// [`MAX_PAGE_SIZE`].
    pub fn get_many(
        &self,
        offset: usize,
        limit: usize,
        prefer_durable: bool,
    ) -> Result<Vec<Widget>, StoreError> {
        if limit > MAX_PAGE_SIZE {
            return Err(StoreError::TooManyRequested {
                requested: limit,
                max: MAX_PAGE_SIZE,
            });
        }

        let widgets = self.read();

        if let Some(gateway) = self.preferred_gateway(prefer_durable) {
            match gateway.find_all(offset, limit, SortOrder::ZAscending) {
                Ok(page) if !page.is_empty() => return Ok(page),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(offset, limit, error = %e, "durable page query failed");
                }
            }
        }

        Ok(ordered_page(&widgets, offset, limit))
    }

    /// [`get_many`](Self::get_many) narrowed to widgets passing `filter`.
    ///
    /// The filter applies after paging, so a page may come back shorter than
    /// `limit` even when more matching widgets exist.
    ///
    /// # Errors
    /// Returns [`StoreError::TooManyRequested`] if `limit` exceeds
    /// [`MAX_PAGE_SIZE`].
    pub fn get_filtered(
        &self,
        offset: usize,
        limit: usize,
        prefer_durable: bool,
        filter: &Filter,
    ) -> Result<Vec<Widget>, StoreError> {
        let mut page = self.get_many(offset, limit, prefer_durable)?;
        page.retain(|widget| filter.matches(widget));
        Ok(page)
    }

    /// Remove the widget stored under `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if `id` is not stored.
    pub fn delete(&self, id: &WidgetId) -> Result<(), StoreError> {
        let mut widgets = self.write();
        let removed = widgets.shift_remove(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if let Some(gateway) = &self.durable {
            mirror(gateway.delete(&removed), "delete", id);
        }

        tracing::debug!(widget_id = %id, z = removed.z, "widget deleted");
        Ok(())
    }

    fn preferred_gateway(&self, prefer_durable: bool) -> Option<&dyn PersistenceGateway> {
        if prefer_durable {
            self.durable.as_deref()
        } else {
            None
        }
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn read(&self) -> RwLockReadGuard<'_, Widgets> {
        self.widgets.read().expect("widget store read lock poisoned")
    }

    #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
    fn write(&self) -> RwLockWriteGuard<'_, Widgets> {
        self.widgets.write().expect("widget store write lock poisoned")
    }
}

impl Default for OrderedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedStore")
            .field("len", &self.len())
            .field("durable", &self.is_durable())
            .finish()
    }
}

/// Bump every widget at `z` or above by one. Returns the ids that moved.
fn shift_up_from(widgets: &mut Widgets, z: i64) -> Vec<WidgetId> {
    widgets
        .values_mut()
        .filter(|widget| widget.z >= z)
        .map(|widget| {
            widget.z = widget.z.saturating_add(1);
            widget.id.clone()
        })
        .collect()
}

fn next_topmost(widgets: &Widgets) -> i64 {
    widgets
        .values()
        .map(|widget| widget.z)
        .max()
        .map_or(TOPMOST_Z, |max| max.saturating_add(1))
}

fn ordered_page(widgets: &Widgets, offset: usize, limit: usize) -> Vec<Widget> {
    let mut ordered: Vec<&Widget> = widgets.values().collect();
    ordered.sort_by_key(|widget| widget.z);
    ordered.into_iter().skip(offset).take(limit).cloned().collect()
}

fn mirror(result: Result<(), PersistenceError>, operation: &'static str, id: &WidgetId) {
    if let Err(e) = result {
        tracing::warn!(widget_id = %id, operation, error = %e, "durable mirror failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stack_core::examples::example_widgets;

    use super::*;
    use crate::InMemoryGateway;

    struct AlwaysFailGateway;

    impl PersistenceGateway for AlwaysFailGateway {
        fn save(&self, _widget: &Widget) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("mock always fails".to_owned()))
        }

        fn find_by_id(&self, _id: &WidgetId) -> Result<Option<Widget>, PersistenceError> {
            Err(PersistenceError::Unavailable("mock".to_owned()))
        }

        fn find_all(
            &self,
            _offset: usize,
            _limit: usize,
            _order: SortOrder,
        ) -> Result<Vec<Widget>, PersistenceError> {
            Err(PersistenceError::Unavailable("mock".to_owned()))
        }

        fn delete(&self, _widget: &Widget) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("mock".to_owned()))
        }
    }

    fn unit(z: Option<i32>) -> NewWidget {
        let req = NewWidget::new(1, 1, 1, 1);
        match z {
            Some(z) => req.with_z(z),
            None => req,
        }
    }

    fn z_of(store: &OrderedStore, id: &WidgetId) -> i64 {
        match store.get_by_id(id, false) {
            Some(w) => w.z,
            None => panic!("widget {id} vanished"),
        }
    }

    fn page(store: &OrderedStore, offset: usize, limit: usize) -> Vec<Widget> {
        match store.get_many(offset, limit, false) {
            Ok(p) => p,
            Err(e) => panic!("get_many failed: {e}"),
        }
    }

    fn durable_store() -> (OrderedStore, Arc<InMemoryGateway>) {
        let gateway = Arc::new(InMemoryGateway::new());
        let store = OrderedStore::with_gateway(StoreConfig::durable(), Arc::clone(&gateway));
        (store, gateway)
    }

    #[test]
    fn create_without_z_into_empty_store_is_topmost() {
        let store = OrderedStore::new();
        let widget = store.create(unit(None));
        assert_eq!(widget.z, TOPMOST_Z, "first free-floating widget must take the sentinel");
    }

    #[test]
    fn create_without_z_lands_above_current_max() {
        let store = OrderedStore::new();
        store.create(unit(Some(1)));
        let second = store.create(unit(None));
        assert_eq!(second.z, 2, "auto placement must be max + 1");
    }

    #[test]
    fn create_with_explicit_z_keeps_requested_index() {
        let store = OrderedStore::new();
        let widget = store.create(unit(Some(1)));
        assert_eq!(widget.z, 1);
        assert_eq!(widget.id.as_str().len(), 36, "id must be a fresh UUID");
    }

    #[test]
    fn create_with_colliding_z_shifts_existing_up() {
        let store = OrderedStore::new();
        let a = store.create(unit(Some(5)));
        let b = store.create(unit(Some(5)));

        assert_eq!(z_of(&store, &a.id), 6, "A must move up by one");
        assert_eq!(b.z, 5, "B must hold the requested index");

        let order: Vec<WidgetId> = page(&store, 0, 10).into_iter().map(|w| w.id).collect();
        assert_eq!(order, vec![b.id, a.id], "read order is ascending z");
    }

    #[test]
    fn create_shifts_only_widgets_at_or_above_index() {
        let store = OrderedStore::new();
        let low = store.create(unit(Some(1)));
        let mid = store.create(unit(Some(3)));
        let high = store.create(unit(Some(7)));

        store.create(unit(Some(3)));

        assert_eq!(z_of(&store, &low.id), 1, "below the insertion point stays put");
        assert_eq!(z_of(&store, &mid.id), 4);
        assert_eq!(z_of(&store, &high.id), 8);
    }

    #[test]
    fn create_explicit_below_topmost_sentinel_pushes_it_past_i32() {
        let store = OrderedStore::new();
        let floating = store.create(unit(None));
        let placed = store.create(unit(Some(1)));

        assert_eq!(z_of(&store, &floating.id), TOPMOST_Z + 1, "sentinel widget moves up");
        assert_eq!(placed.z, 1);
        let order: Vec<WidgetId> = page(&store, 0, 10).into_iter().map(|w| w.id).collect();
        assert_eq!(order, vec![placed.id, floating.id]);
    }

    #[test]
    fn topmost_sentinel_is_i32_max() {
        assert_eq!(TOPMOST_Z, i64::from(i32::MAX));
    }

    #[test]
    fn create_without_z_twice_from_empty_store_stays_unique() {
        let store = OrderedStore::new();
        let first = store.create(unit(None));
        let second = store.create(unit(None));

        assert_eq!(first.z, TOPMOST_Z);
        assert_eq!(second.z, TOPMOST_Z + 1, "second auto placement goes above the sentinel");
        assert_ne!(first.z, second.z);
    }

    #[test]
    fn create_with_z_at_i32_max_twice_stays_unique() {
        let store = OrderedStore::new();
        let first = store.create(unit(Some(i32::MAX)));
        let second = store.create(unit(Some(i32::MAX)));

        assert_eq!(z_of(&store, &first.id), TOPMOST_Z + 1, "earlier widget is shifted up");
        assert_eq!(second.z, TOPMOST_Z);
        let top = store.create(unit(None));
        assert_eq!(top.z, TOPMOST_Z + 2, "auto placement keeps climbing past i32::MAX");
    }

    #[test]
    fn create_example_widgets_stack_in_reverse() {
        let store = OrderedStore::new();
        let created: Vec<Widget> = example_widgets().into_iter().map(|r| store.create(r)).collect();

        let zs: Vec<i64> = created.iter().map(|w| z_of(&store, &w.id)).collect();
        assert_eq!(zs, vec![3, 2, 1], "each explicit z=1 insert pushes earlier widgets up");
    }

    #[test]
    fn returned_copy_is_detached_from_store() {
        let store = OrderedStore::new();
        let mut widget = store.create(unit(Some(1)));
        widget.x = 99;
        widget.z = 42;

        let stored = store.get_by_id(&widget.id, false);
        assert_eq!(stored.map(|w| (w.x, w.z)), Some((1, 1)), "mutating a copy must not leak");
    }

    #[test]
    fn update_overwrites_fields_and_restamps() {
        let store = OrderedStore::new();
        let created = store.create(unit(Some(1)));

        let mut update = WidgetUpdate::from(created.clone());
        update.x = Some(3);
        update.y = Some(4);
        let updated = match store.update(update, &created.id) {
            Ok(w) => w,
            Err(e) => panic!("update failed: {e}"),
        };

        assert_eq!((updated.x, updated.y), (3, 4));
        assert!(updated.last_modified >= created.last_modified, "last_modified must be refreshed");
        assert_eq!(store.get_by_id(&created.id, false), Some(updated));
    }

    #[test]
    fn update_does_not_reshuffle_on_collision() {
        let store = OrderedStore::new();
        let a = store.create(unit(Some(1)));
        let b = store.create(unit(Some(2)));

        let mut update = WidgetUpdate::from(b.clone());
        update.z = Some(1);
        if let Err(e) = store.update(update, &b.id) {
            panic!("update failed: {e}");
        }

        assert_eq!(z_of(&store, &a.id), 1, "update must not shift other widgets");
        assert_eq!(z_of(&store, &b.id), 1, "collisions are allowed after update");
        let order: Vec<WidgetId> = page(&store, 0, 10).into_iter().map(|w| w.id).collect();
        assert_eq!(order, vec![a.id, b.id], "ties keep creation order");
    }

    #[test]
    fn update_with_missing_attribute_returns_null_attribute() {
        let store = OrderedStore::new();
        let created = store.create(unit(Some(1)));
        let mut update = WidgetUpdate::from(created.clone());
        update.x = None;

        let result = store.update(update, &created.id);
        assert_eq!(result, Err(StoreError::NullAttribute { field: "x" }));
    }

    #[test]
    fn update_unknown_id_returns_not_found() {
        let store = OrderedStore::new();
        let created = store.create(unit(Some(1)));
        let unknown = WidgetId::new("test");

        let result = store.update(WidgetUpdate::from(created), &unknown);
        assert_eq!(result, Err(StoreError::NotFound(unknown)));
    }

    #[test]
    fn update_validation_precedes_lookup() {
        let store = OrderedStore::new();
        let result = store.update(WidgetUpdate::default(), &WidgetId::new("missing"));
        assert!(
            matches!(result, Err(StoreError::NullAttribute { .. })),
            "missing fields must be reported before the unknown id"
        );
    }

    #[test]
    fn get_many_over_limit_returns_too_many_requested() {
        let store = OrderedStore::new();
        assert_eq!(
            store.get_many(0, 600, false),
            Err(StoreError::TooManyRequested {
                requested: 600,
                max: MAX_PAGE_SIZE,
            })
        );
        assert!(store.get_many(0, MAX_PAGE_SIZE, false).is_ok(), "limit 500 is allowed");
    }

    #[test]
    fn get_many_orders_ascending_and_honours_offset() {
        let store = OrderedStore::new();
        let first = store.create(unit(Some(1)));
        let second = store.create(unit(Some(1)));

        let all = page(&store, 0, 3);
        assert_eq!(all.len(), 2);
        assert_eq!((all[0].id.clone(), all[0].z), (second.id, 1));
        assert_eq!((all[1].id.clone(), all[1].z), (first.id.clone(), 2));

        let rest = page(&store, 1, 3);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, first.id);
    }

    #[test]
    fn get_filtered_applies_bounding_test() {
        let store = OrderedStore::new();
        for req in example_widgets() {
            store.create(req);
        }

        let filtered = match store.get_filtered(0, 3, false, &Filter::new(0, 0, 100, 150)) {
            Ok(p) => p,
            Err(e) => panic!("get_filtered failed: {e}"),
        };
        let ys: Vec<i32> = filtered.iter().map(|w| w.y).collect();
        assert_eq!(ys, vec![100, 50]);
    }

    #[test]
    fn get_filtered_over_limit_returns_too_many_requested() {
        let store = OrderedStore::new();
        let result = store.get_filtered(0, 501, false, &Filter::default());
        assert!(matches!(result, Err(StoreError::TooManyRequested { requested: 501, .. })));
    }

    #[test]
    fn delete_removes_widget() {
        let store = OrderedStore::new();
        let widget = store.create(unit(Some(1)));
        assert_eq!(store.delete(&widget.id), Ok(()));
        assert!(store.is_empty(), "store must be empty after delete");
    }

    #[test]
    fn delete_unknown_returns_not_found() {
        let store = OrderedStore::new();
        let unknown = WidgetId::new("test");
        assert_eq!(store.delete(&unknown), Err(StoreError::NotFound(unknown)));
    }

    #[test]
    fn memory_only_store_ignores_gateway() {
        let gateway = Arc::new(InMemoryGateway::new());
        let store = OrderedStore::with_gateway(StoreConfig::in_memory(), Arc::clone(&gateway));
        store.create(unit(None));

        assert!(!store.is_durable());
        assert!(gateway.is_empty(), "gateway must not be written without durable mode");
    }

    #[test]
    fn durable_store_mirrors_create_update_delete() {
        let (store, gateway) = durable_store();
        let widget = store.create(unit(Some(1)));
        assert_eq!(gateway.len(), 1);

        let mut update = WidgetUpdate::from(widget.clone());
        update.width = Some(10);
        if let Err(e) = store.update(update, &widget.id) {
            panic!("update failed: {e}");
        }
        match gateway.find_by_id(&widget.id) {
            Ok(Some(w)) => assert_eq!(w.width, 10, "update must reach the gateway"),
            other => panic!("expected mirrored widget, got {other:?}"),
        }

        if let Err(e) = store.delete(&widget.id) {
            panic!("delete failed: {e}");
        }
        assert!(gateway.is_empty(), "delete must reach the gateway");
    }

    #[test]
    fn durable_store_mirrors_shifted_widgets() {
        let (store, gateway) = durable_store();
        let a = store.create(unit(Some(5)));
        store.create(unit(Some(5)));

        match gateway.find_by_id(&a.id) {
            Ok(Some(w)) => assert_eq!(w.z, 6, "shifted index must be persisted"),
            other => panic!("expected mirrored widget, got {other:?}"),
        }
    }

    #[test]
    fn get_by_id_prefers_durable_copy() {
        let (store, gateway) = durable_store();
        let widget = store.create(unit(Some(1)));

        let mut diverged = widget.clone();
        diverged.x = 77;
        if let Err(e) = gateway.save(&diverged) {
            panic!("save failed: {e}");
        }

        assert_eq!(store.get_by_id(&widget.id, true).map(|w| w.x), Some(77));
        assert_eq!(store.get_by_id(&widget.id, false).map(|w| w.x), Some(1));
    }

    #[test]
    fn get_by_id_falls_back_to_memory_when_durable_misses() {
        let (store, gateway) = durable_store();
        let widget = store.create(unit(Some(1)));
        if let Err(e) = gateway.delete(&widget) {
            panic!("delete failed: {e}");
        }

        assert_eq!(store.get_by_id(&widget.id, true), Some(widget));
        assert_eq!(store.get_by_id(&WidgetId::new("absent"), true), None);
    }

    #[test]
    fn get_many_prefers_non_empty_durable_page() {
        let (store, gateway) = durable_store();
        store.create(unit(Some(1)));

        let extra = unit(Some(0)).into_widget(WidgetId::new("durable-only"), 0, Utc::now());
        if let Err(e) = gateway.save(&extra) {
            panic!("save failed: {e}");
        }

        let durable = match store.get_many(0, 10, true) {
            Ok(p) => p,
            Err(e) => panic!("get_many failed: {e}"),
        };
        assert_eq!(durable.len(), 2, "durable page wins");
        assert_eq!(durable[0].id, extra.id);
        assert_eq!(page(&store, 0, 10).len(), 1, "memory view is unaffected");
    }

    #[test]
    fn get_filtered_applies_filter_to_durable_page() {
        let (store, gateway) = durable_store();
        let mirrored = store.create(NewWidget::new(50, 50, 100, 100).with_z(1));

        let now = Utc::now();
        let inside = NewWidget::new(10, 10, 10, 10).into_widget(WidgetId::new("inside"), 0, now);
        let outside = NewWidget::new(100, 10, 10, 10).into_widget(WidgetId::new("outside"), 2, now);
        for widget in [&inside, &outside] {
            if let Err(e) = gateway.save(widget) {
                panic!("save failed: {e}");
            }
        }

        let filter = Filter::new(0, 0, 100, 150);
        let durable = match store.get_filtered(0, 10, true, &filter) {
            Ok(p) => p,
            Err(e) => panic!("get_filtered failed: {e}"),
        };
        let ids: Vec<WidgetId> = durable.into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![inside.id, mirrored.id], "x == x_stop is filtered out");

        let memory = match store.get_filtered(0, 10, false, &filter) {
            Ok(p) => p,
            Err(e) => panic!("get_filtered failed: {e}"),
        };
        assert_eq!(memory.len(), 1, "memory only knows the mirrored widget");
    }

    #[test]
    fn get_many_falls_back_when_durable_page_empty() {
        let (store, _gateway) = durable_store();
        store.create(unit(Some(1)));

        let result = match store.get_many(5, 10, true) {
            Ok(p) => p,
            Err(e) => panic!("get_many failed: {e}"),
        };
        assert!(result.is_empty(), "memory page past the end is empty too");

        let first = match store.get_many(0, 10, true) {
            Ok(p) => p,
            Err(e) => panic!("get_many failed: {e}"),
        };
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn failing_gateway_never_fails_store_operations() {
        let store = OrderedStore::with_gateway(StoreConfig::durable(), AlwaysFailGateway);
        let widget = store.create(unit(Some(1)));

        assert_eq!(store.get_by_id(&widget.id, true), Some(widget.clone()));
        assert_eq!(store.get_many(0, 10, true).map(|p| p.len()), Ok(1));
        assert!(store.update(WidgetUpdate::from(widget.clone()), &widget.id).is_ok());
        assert_eq!(store.delete(&widget.id), Ok(()));
    }

    #[test]
    fn debug_output_reports_len_and_mode() {
        let store = OrderedStore::new();
        store.create(unit(None));
        let debug = format!("{store:?}");
        assert!(debug.contains("len: 1"), "got {debug}");
        assert!(debug.contains("durable: false"), "got {debug}");
    }
}
