//! Cache Store Module
//!
//! Bounded container combining HashMap storage with LRU tracking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::LruTracker;
use crate::config::validate_capacity;
use crate::error::Result;

/// Upper bound on the slots reserved up front; larger caches grow on demand
const MAX_PREALLOCATED: usize = 1024;

// == LRU Cache ==
/// Fixed-capacity key-value store with least-recently-used eviction.
///
/// All operations take `&self` and serialize on one internal lock, so the
/// cache can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
}

#[derive(Debug)]
struct Inner<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// LRU access tracker, always holding exactly the keys of `entries`
    lru: LruTracker<K>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        validate_capacity(capacity)?;
        debug!(capacity, "Creating LRU cache");

        let reserved = capacity.min(MAX_PREALLOCATED);
        Ok(Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(reserved),
                lru: LruTracker::with_capacity(reserved),
            }),
            capacity,
        })
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let value = inner.entries.get(key)?.clone();
        inner.lru.promote(key);
        Some(value)
    }

    // == Put ==
    /// Inserts or replaces the value for `key`, making it most recently used.
    ///
    /// Only a new key arriving while the cache is full evicts, and then
    /// exactly the least recently used entry, which is returned.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let mut evicted = None;
        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.lru.evict_oldest() {
                evicted = inner.entries.remove(&oldest).map(|old| (oldest, old));
                debug!(capacity = self.capacity, "Evicted least recently used entry");
            }
        }

        inner.entries.insert(key.clone(), value);
        inner.lru.touch(key);

        evicted
    }

    // == Remove ==
    /// Removes `key`, returning its value. Missing keys are a no-op.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let value = inner.entries.remove(key)?;
        inner.lru.remove(key);
        Some(value)
    }

    /// Removes `key` only if `predicate` holds for its current value.
    ///
    /// The check and the removal happen under the same lock.
    pub(crate) fn remove_if<Q, F>(&self, key: &Q, predicate: F) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> bool,
    {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if !predicate(inner.entries.get(key)?) {
            return None;
        }
        inner.lru.remove(key);
        inner.entries.remove(key)
    }

    // == Clear ==
    /// Removes every entry and resets the recency order.
    pub fn clear(&self) {
        let mut guard = self.inner.lock();
        let removed = guard.entries.len();
        guard.entries.clear();
        guard.lru.clear();
        debug!(removed, "Cleared LRU cache");
    }

    // == Size ==
    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Checks for `key` without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().entries.contains_key(key)
    }

    // == Entries ==
    /// Returns a point-in-time copy of all entries.
    ///
    /// Entries come least recently used first; callers should not rely on it.
    pub fn entries(&self) -> Vec<(K, V)> {
        let guard = self.inner.lock();
        guard
            .lru
            .iter()
            .filter_map(|key| {
                guard
                    .entries
                    .get(key)
                    .map(|value| (key.clone(), value.clone()))
            })
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
