//! In-memory document store.
//!
//! Behaves like the managed store as far as the apps can observe: live
//! queries receive the full collection on subscribe and after every write,
//! closed subscriptions never fire again, and created documents get a
//! store-assigned id and creation timestamp.
//!
//! Deliveries can be held back and released later, which lets tests
//! resolve a snapshot after the subscriber has gone away.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use crate::extraction::timestamp::to_native_timestamp;

use super::models::{DocumentSnapshot, Snapshot};
use super::store::{ReportStore, SnapshotHandler, StoreError, Subscription};

const TIMESTAMP_FIELD: &str = "timestamp";

struct ListenerSlot {
    collection: String,
    active: AtomicBool,
    handler: Mutex<SnapshotHandler>,
}

impl ListenerSlot {
    fn deliver(&self, delivery: &Delivery) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let mut handler = self.handler.lock();
        // Closed while waiting for the handler lock.
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        match delivery {
            Delivery::Snapshot(snapshot) => handler(Ok(snapshot)),
            Delivery::Error(err) => handler(Err(err)),
        }
    }
}

enum Delivery {
    Snapshot(Snapshot),
    Error(StoreError),
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<DocumentSnapshot>>,
    listeners: HashMap<u64, Arc<ListenerSlot>>,
    next_listener: u64,
    unavailable: Option<StoreError>,
    holding: bool,
    pending: Vec<(Arc<ListenerSlot>, Delivery)>,
}

impl Inner {
    fn snapshot(&self, collection: &str) -> Snapshot {
        Snapshot::new(self.collections.get(collection).cloned().unwrap_or_default())
    }

    /// Queue or return deliveries for every listener on `collection`.
    fn fan_out(&mut self, collection: &str) -> Vec<(Arc<ListenerSlot>, Delivery)> {
        let snapshot = self.snapshot(collection);
        let targets: Vec<_> = self
            .listeners
            .values()
            .filter(|slot| slot.collection == collection)
            .map(|slot| (slot.clone(), Delivery::Snapshot(snapshot.clone())))
            .collect();
        self.route(targets)
    }

    fn route(
        &mut self,
        deliveries: Vec<(Arc<ListenerSlot>, Delivery)>,
    ) -> Vec<(Arc<ListenerSlot>, Delivery)> {
        if self.holding {
            self.pending.extend(deliveries);
            Vec::new()
        } else {
            deliveries
        }
    }
}

/// Thread-safe in-memory [`ReportStore`].
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document under a caller-chosen id.
    pub fn insert(&self, collection: &str, id: &str, data: Value) {
        let deliveries = {
            let mut inner = self.inner.lock();
            let docs = inner.collections.entry(collection.to_string()).or_default();
            match docs.iter_mut().find(|d| d.id == id) {
                Some(existing) => existing.data = data,
                None => docs.push(DocumentSnapshot::new(id, data)),
            }
            inner.fan_out(collection)
        };
        dispatch(deliveries);
    }

    /// Overwrite one top-level field, as the dispatch side does with
    /// `status`. Returns false if the document does not exist.
    pub fn set_field(&self, collection: &str, id: &str, field: &str, value: Value) -> bool {
        let deliveries = {
            let mut inner = self.inner.lock();
            let Some(doc) = inner
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            else {
                return false;
            };
            match doc.data.as_object_mut() {
                Some(obj) => {
                    obj.insert(field.to_string(), value);
                }
                None => return false,
            }
            inner.fan_out(collection)
        };
        dispatch(deliveries);
        true
    }

    pub fn remove(&self, collection: &str, id: &str) -> bool {
        let (removed, deliveries) = {
            let mut inner = self.inner.lock();
            let removed = match inner.collections.get_mut(collection) {
                Some(docs) => {
                    let before = docs.len();
                    docs.retain(|d| d.id != id);
                    docs.len() != before
                }
                None => false,
            };
            let deliveries = if removed {
                inner.fan_out(collection)
            } else {
                Vec::new()
            };
            (removed, deliveries)
        };
        dispatch(deliveries);
        removed
    }

    pub fn documents(&self, collection: &str) -> Vec<DocumentSnapshot> {
        self.inner.lock().snapshot(collection).docs
    }

    /// Make subsequent subscribes and writes fail with `error`; `None`
    /// restores service.
    pub fn set_unavailable(&self, error: Option<StoreError>) {
        self.inner.lock().unavailable = error;
    }

    /// End every live query on `collection` with `error`.
    pub fn fail_listeners(&self, collection: &str, error: StoreError) {
        let deliveries = {
            let mut inner = self.inner.lock();
            let targets: Vec<_> = inner
                .listeners
                .values()
                .filter(|slot| slot.collection == collection)
                .map(|slot| (slot.clone(), Delivery::Error(error.clone())))
                .collect();
            inner.route(targets)
        };
        dispatch(deliveries);
    }

    /// Queue deliveries instead of invoking handlers.
    pub fn hold_deliveries(&self) {
        self.inner.lock().holding = true;
    }

    /// Stop holding and flush everything queued, in order.
    pub fn release_deliveries(&self) {
        let deliveries = {
            let mut inner = self.inner.lock();
            inner.holding = false;
            std::mem::take(&mut inner.pending)
        };
        dispatch(deliveries);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

fn dispatch(deliveries: Vec<(Arc<ListenerSlot>, Delivery)>) {
    for (slot, delivery) in deliveries {
        slot.deliver(&delivery);
    }
}

fn close_listener(inner: &Weak<Mutex<Inner>>, key: u64, slot: &ListenerSlot) {
    slot.active.store(false, Ordering::SeqCst);
    if let Some(inner) = inner.upgrade() {
        inner.lock().listeners.remove(&key);
    }
}

impl ReportStore for InMemoryStore {
    fn subscribe(
        &self,
        collection: &str,
        on_snapshot: SnapshotHandler,
    ) -> Result<Subscription, StoreError> {
        let (key, slot, deliveries) = {
            let mut inner = self.inner.lock();
            if let Some(err) = &inner.unavailable {
                return Err(err.clone());
            }

            let key = inner.next_listener;
            inner.next_listener += 1;
            let slot = Arc::new(ListenerSlot {
                collection: collection.to_string(),
                active: AtomicBool::new(true),
                handler: Mutex::new(on_snapshot),
            });
            inner.listeners.insert(key, slot.clone());

            let initial = Delivery::Snapshot(inner.snapshot(collection));
            let deliveries = inner.route(vec![(slot.clone(), initial)]);
            (key, slot, deliveries)
        };

        dispatch(deliveries);

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(&format!("listener-{}", key), move || {
            close_listener(&weak, key, &slot)
        }))
    }

    fn create(&self, collection: &str, mut data: Value) -> Result<String, StoreError> {
        let Some(obj) = data.as_object_mut() else {
            return Err(StoreError::Rejected {
                reason: "document body must be an object".to_string(),
            });
        };
        if !obj.contains_key(TIMESTAMP_FIELD) {
            obj.insert(TIMESTAMP_FIELD.to_string(), to_native_timestamp(Utc::now()));
        }

        let id = Uuid::new_v4().simple().to_string()[..20].to_string();
        let deliveries = {
            let mut inner = self.inner.lock();
            if let Some(err) = &inner.unavailable {
                return Err(err.clone());
            }
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(DocumentSnapshot::new(&id, data));
            inner.fan_out(collection)
        };
        dispatch(deliveries);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    type Seen = Arc<Mutex<Vec<Result<Vec<String>, StoreError>>>>;

    fn recorder() -> (Seen, SnapshotHandler) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: SnapshotHandler = Box::new(move |event: Result<&Snapshot, &StoreError>| {
            let entry = event
                .map(|s| s.docs.iter().map(|d| d.id.clone()).collect::<Vec<_>>())
                .map_err(Clone::clone);
            sink.lock().push(entry);
        });
        (seen, handler)
    }

    #[test]
    fn test_initial_snapshot_and_fan_out() {
        let store = InMemoryStore::new();
        store.insert("reports", "a", json!({"n": 1}));

        let (seen, handler) = recorder();
        let _sub = store.subscribe("reports", handler).unwrap();
        store.insert("reports", "b", json!({"n": 2}));
        store.insert("other", "z", json!({}));

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Ok(vec!["a".to_string()]));
        assert_eq!(seen[1], Ok(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_unsubscribe_stops_callbacks() {
        let store = InMemoryStore::new();
        let (seen, handler) = recorder();
        let mut sub = store.subscribe("reports", handler).unwrap();
        assert_eq!(store.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(store.listener_count(), 0);
        store.insert("reports", "a", json!({}));
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_held_delivery_dropped_after_unsubscribe() {
        let store = InMemoryStore::new();
        store.hold_deliveries();
        let (seen, handler) = recorder();
        let mut sub = store.subscribe("reports", handler).unwrap();
        store.insert("reports", "a", json!({}));
        sub.unsubscribe();
        store.release_deliveries();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        let store = InMemoryStore::new();
        let id = store.create("reports", json!({"status": "Unattended"})).unwrap();
        assert_eq!(id.len(), 20);

        let docs = store.documents("reports");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert!(docs[0].data["timestamp"]["seconds"].is_i64());
    }

    #[test]
    fn test_create_rejects_non_object() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.create("reports", json!([1, 2])),
            Err(StoreError::Rejected { .. })
        ));
    }

    #[test]
    fn test_unavailable() {
        let store = InMemoryStore::new();
        store.set_unavailable(Some(StoreError::PermissionDenied));
        let (_seen, handler) = recorder();
        assert_eq!(
            store.subscribe("reports", handler).unwrap_err(),
            StoreError::PermissionDenied
        );
        assert!(store.create("reports", json!({})).is_err());
    }

    #[test]
    fn test_fail_listeners_and_set_field() {
        let store = InMemoryStore::new();
        store.insert("reports", "a", json!({"status": "Unattended"}));
        let (seen, handler) = recorder();
        let _sub = store.subscribe("reports", handler).unwrap();

        assert!(store.set_field("reports", "a", "status", json!("pending")));
        assert!(!store.set_field("reports", "missing", "status", json!("pending")));
        assert_eq!(store.documents("reports")[0].data["status"], "pending");

        let err = StoreError::Unavailable {
            reason: "offline".to_string(),
        };
        store.fail_listeners("reports", err.clone());
        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], Err(err));
    }

    #[test]
    fn test_remove() {
        let store = InMemoryStore::new();
        store.insert("reports", "a", json!({}));
        assert!(store.remove("reports", "a"));
        assert!(!store.remove("reports", "a"));
        assert!(store.documents("reports").is_empty());
    }
}
