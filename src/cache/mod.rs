//! Cache Module
//!
//! Provides the bounded LRU store and the lazily expiring TTL layer on top.

mod holder;
mod lru;
mod store;
mod timed;


// Re-export public types
pub use holder::TimedHolder;
pub use lru::LruTracker;
pub use store::LruCache;
pub use timed::TimedLruCache;
