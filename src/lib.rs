//! Timed LRU - A bounded, thread-safe in-memory cache
//!
//! Provides least-recently-used eviction under a fixed capacity, optionally
//! combined with a cache-wide time to live that is checked lazily on access.
//!
//! ```
//! use timed_lru::{LruCache, TimedLruCache};
//!
//! let lru = LruCache::new(2).unwrap();
//! lru.put("a", 1);
//! lru.put("b", 2);
//! lru.get("a");
//! lru.put("c", 3);
//! assert!(!lru.contains("b"));
//!
//! let timed = TimedLruCache::new(100, 60_000).unwrap();
//! timed.put("session".to_string(), 42);
//! assert_eq!(timed.touch_and_get("session"), Some(42));
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{LruCache, TimedLruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
