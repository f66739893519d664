//! Timed LRU Cache Module
//!
//! Layers a cache-wide time to live over the bounded LRU store. Expiry is
//! lazy: stale entries are only removed when a read observes them.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{LruCache, TimedHolder};
use crate::config::{validate_ttl_millis, CacheConfig};
use crate::error::Result;

// == Timed LRU Cache ==
/// LRU cache whose entries expire a fixed time after they were written.
///
/// `contains`, `size` and `entries` never evict, so between expiry and the
/// next `get`/`touch_and_get` of a key they may still count it.
#[derive(Debug)]
pub struct TimedLruCache<K, V> {
    cache: LruCache<K, Arc<TimedHolder<V>>>,
    ttl: Duration,
}

impl<K, V> TimedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache of `capacity` entries living `ttl_millis` each.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero or `ttl_millis` is negative.
    pub fn new(capacity: usize, ttl_millis: i64) -> Result<Self> {
        Self::with_ttl(capacity, validate_ttl_millis(ttl_millis)?)
    }

    /// Creates a cache of `capacity` entries living `ttl` each.
    pub fn with_ttl(capacity: usize, ttl: Duration) -> Result<Self> {
        let cache = LruCache::new(capacity)?;
        debug!(capacity, ?ttl, "Creating timed LRU cache");
        Ok(Self { cache, ttl })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let ttl = config.validate()?;
        Self::with_ttl(config.capacity, ttl)
    }

    // == Get ==
    /// Returns the live value for `key`, marking it most recently used.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let holder = self.cache.get(key)?;
        let value = holder.content();
        if value.is_none() {
            self.evict_expired(key, &holder);
        }
        value
    }

    // == Touch And Get ==
    /// Like `get`, but a live value also starts a fresh time to live.
    pub fn touch_and_get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let holder = self.cache.get(key)?;
        let value = holder.touch();
        if value.is_none() {
            self.evict_expired(key, &holder);
        }
        value
    }

    // == Put ==
    /// Stores `value` under `key` with a fresh time to live.
    pub fn put(&self, key: K, value: V) {
        let holder = TimedHolder::with_content(self.ttl, value);
        self.cache.put(key, Arc::new(holder));
    }

    /// Stores `value` if there is one.
    ///
    /// `None` is a no-op: it neither stores an empty entry nor removes a
    /// value already cached under `key`.
    pub fn put_optional(&self, key: K, value: Option<V>) {
        match value {
            Some(value) => self.put(key, value),
            None => trace!("Ignoring put of an empty value"),
        }
    }

    // == Remove ==
    /// Removes `key`. Missing keys are a no-op.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.remove(key);
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Number of stored entries, expired ones included until observed.
    pub fn size(&self) -> usize {
        self.cache.size()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Checks for `key` without an expiry check or recency update.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.contains(key)
    }

    // == Entries ==
    /// Returns a point-in-time copy of the live entries.
    ///
    /// Expired entries are skipped but left in place.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.cache
            .entries()
            .into_iter()
            .filter_map(|(key, holder)| holder.peek().map(|value| (key, value)))
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Removes `key` if it still maps to `holder`.
    ///
    /// A holder never comes back to life once its value expired, but the key
    /// may have been re-put since it was read; that newer entry stays.
    fn evict_expired<Q>(&self, key: &Q, holder: &Arc<TimedHolder<V>>)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self
            .cache
            .remove_if(key, |current| Arc::ptr_eq(current, holder))
            .is_some()
        {
            debug!("Removed expired entry");
        }
    }
}
