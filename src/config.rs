//! Configuration Module
//!
//! Construction parameters for the caches, embeddable in an application's
//! own configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Cache construction parameters.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Time to live of every entry, in milliseconds
    pub ttl_millis: i64,
}

impl CacheConfig {
    /// Creates a config from raw parameters without validating them.
    pub fn new(capacity: usize, ttl_millis: i64) -> Self {
        Self {
            capacity,
            ttl_millis,
        }
    }

    // == Validate ==
    /// Checks the parameters and returns the TTL as a `Duration`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero or `ttl_millis` is negative.
    pub fn validate(&self) -> Result<Duration> {
        validate_capacity(self.capacity)?;
        validate_ttl_millis(self.ttl_millis)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl_millis: 300_000,
        }
    }
}

pub(crate) fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidConfiguration(
            "capacity must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_ttl_millis(ttl_millis: i64) -> Result<Duration> {
    u64::try_from(ttl_millis)
        .map(Duration::from_millis)
        .map_err(|_| {
            CacheError::InvalidConfiguration(format!(
                "ttl must not be negative, got {} ms",
                ttl_millis
            ))
        })
}
