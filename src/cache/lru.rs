//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a strictly increasing sequence number:
/// - Smallest stamp = Least recently used
/// - Largest stamp = Most recently used
///
/// Keys that were never re-accessed keep their insertion order.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Current stamp of each tracked key
    stamps: HashMap<K, u64>,
    /// Keys ordered by stamp
    order: BTreeMap<u64, K>,
    /// Stamp handed out by the next touch
    next_stamp: u64,
}

impl<K> LruTracker<K>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stamps: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            next_stamp: 0,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if it is new.
    pub fn touch(&mut self, key: K) {
        if !self.promote(&key) {
            let stamp = self.bump();
            self.stamps.insert(key.clone(), stamp);
            self.order.insert(stamp, key);
        }
    }

    // == Promote ==
    /// Moves an already tracked key to the most recently used position.
    ///
    /// Returns false, changing nothing, if the key is not tracked.
    pub fn promote<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let stamp = self.next_stamp;
        let Some(slot) = self.stamps.get_mut(key) else {
            return false;
        };
        let old = std::mem::replace(slot, stamp);
        self.next_stamp += 1;

        if let Some(owned) = self.order.remove(&old) {
            self.order.insert(stamp, owned);
        }
        true
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.values().next()
    }

    /// Iterates tracked keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.values()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.stamps.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stamps.contains_key(key)
    }

    fn bump(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}

impl<K> Default for LruTracker<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
