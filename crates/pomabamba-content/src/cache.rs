//! In-memory cache for content collections.
//!
//! A populated slot is only ever replaced by a later successful fetch or
//! cleared through one of the `invalidate*` methods; nothing expires on its own.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::types::{Festivity, Tour};

/// One cached collection.
///
/// The lock only guards reading or swapping the `Arc`; it is never held across
/// a network call, so two concurrent first fetches both go to the network and
/// the last one to finish wins.
#[derive(Debug)]
pub struct CacheSlot<T> {
    value: RwLock<Option<Arc<[T]>>>,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }
}

impl<T> CacheSlot<T> {
    pub fn get(&self) -> Option<Arc<[T]>> {
        self.value.read().clone()
    }

    /// Store a freshly fetched collection, replacing whatever was there.
    pub fn store(&self, records: Vec<T>) -> Arc<[T]> {
        let records: Arc<[T]> = records.into();
        *self.value.write() = Some(Arc::clone(&records));
        records
    }

    pub fn clear(&self) {
        *self.value.write() = None;
    }

    pub fn is_populated(&self) -> bool {
        self.value.read().is_some()
    }
}

/// Cache owned by whoever builds the content client.
///
/// Share it with `Arc` to let several clients see the same data, or give each
/// client its own instance to keep them isolated.
#[derive(Debug, Default)]
pub struct ContentCache {
    tours: CacheSlot<Tour>,
    festivities: CacheSlot<Festivity>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tours(&self) -> &CacheSlot<Tour> {
        &self.tours
    }

    pub fn festivities(&self) -> &CacheSlot<Festivity> {
        &self.festivities
    }

    /// Drop every cached collection; the next fetch goes to the network.
    pub fn invalidate(&self) {
        tracing::debug!("Invalidating content cache");
        self.tours.clear();
        self.festivities.clear();
    }

    pub fn invalidate_tours(&self) {
        self.tours.clear();
    }

    pub fn invalidate_festivities(&self) {
        self.festivities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let slot: CacheSlot<u32> = CacheSlot::default();
        assert!(!slot.is_populated());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_store_replaces_previous_value() {
        let slot = CacheSlot::default();
        slot.store(vec![1, 2, 3]);
        let second = slot.store(vec![4]);

        assert_eq!(&*second, &[4]);
        assert_eq!(slot.get().as_deref(), Some(&[4][..]));
    }

    #[test]
    fn test_stored_value_survives_clear_for_existing_holders() {
        let slot = CacheSlot::default();
        let held = slot.store(vec!["a"]);
        slot.clear();

        assert!(slot.get().is_none());
        assert_eq!(&*held, &["a"]);
    }

    #[test]
    fn test_invalidate_clears_both_collections() {
        let cache = ContentCache::new();
        cache.tours().store(Vec::new());
        cache.festivities().store(Vec::new());
        assert!(cache.tours().is_populated());

        cache.invalidate_tours();
        assert!(!cache.tours().is_populated());
        assert!(cache.festivities().is_populated());

        cache.invalidate();
        assert!(!cache.festivities().is_populated());
    }

    #[test]
    fn test_independent_caches_do_not_share_state() {
        let first = ContentCache::new();
        let second = ContentCache::new();
        first.tours().store(Vec::new());

        assert!(first.tours().is_populated());
        assert!(!second.tours().is_populated());
    }
}
