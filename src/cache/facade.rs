//! Cache Facade Module
//!
//! The only interface external callers use. Normalizes keys, applies the
//! expiry policy, runs values through the codec, and delegates persistence
//! to the store.

use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{codec, expiry, SqliteStore};
use crate::error::{CacheError, Result};

// == Review Cache ==
/// Persistent review cache with per-entry expiration.
///
/// Owns the process-wide store handle; constructed once at startup and
/// passed by reference to all callers.
#[derive(Debug)]
pub struct ReviewCache {
    store: SqliteStore,
}

impl ReviewCache {
    // == Open ==
    /// Opens the cache at the given file path.
    ///
    /// A `StorageUnavailable` failure here is fatal to process startup.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        let store = SqliteStore::open(path, busy_timeout)?;
        Ok(Self { store })
    }

    // == Get ==
    /// Retrieves a value from the cache.
    ///
    /// Returns `Ok(None)` on a miss. A stale entry is deleted on the way out
    /// and reported as a miss. A corrupt entry (undecodable value or expiry)
    /// is treated the same way, so a poisoned row can never break reads.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let key = key.to_lowercase();

        let Some((raw_value, raw_expiry)) = self.store.read(&key)? else {
            return Ok(None);
        };

        let deadline = match codec::decode_deadline(&raw_expiry) {
            Ok(deadline) => deadline,
            Err(CacheError::CorruptValue(msg)) => {
                warn!("Evicting entry with corrupt expiry for key {key}: {msg}");
                self.store.delete(&key)?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !expiry::is_fresh(deadline, expiry::unix_now()) {
            debug!("Entry for key {key} expired, evicting");
            self.store.delete(&key)?;
            return Ok(None);
        }

        match codec::decode(&raw_value) {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::CorruptValue(msg)) => {
                warn!("Evicting corrupt entry for key {key}: {msg}");
                self.store.delete(&key)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // == Set ==
    /// Adds a key/value pair with an optional TTL in seconds.
    ///
    /// Tries a plain insert first and falls back to a full replace when the
    /// key already exists, so the call is idempotent regardless of prior
    /// state. Storage failures are logged and swallowed; a cache-write
    /// failure must never abort the caller's primary workflow.
    pub fn set(&self, key: &str, value: &Value, ttl: Option<u64>) {
        let key = key.to_lowercase();
        if let Err(e) = self.try_set(&key, value, ttl) {
            warn!("Failed to cache entry for key {key}: {e}");
        }
    }

    fn try_set(&self, key: &str, value: &Value, ttl: Option<u64>) -> Result<()> {
        let (val, exp) = Self::encode_entry(value, ttl)?;
        match self.store.insert(key, &val, &exp) {
            Ok(()) => {
                info!("Cached new entry for key {key}");
                Ok(())
            }
            Err(CacheError::DuplicateKey(_)) => {
                debug!("Key {key} already cached, falling back to replace");
                self.store.write(key, &val, &exp)?;
                info!("Replaced cached entry for key {key}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    // == Update ==
    /// Unconditional replace with an optional TTL in seconds.
    ///
    /// Same swallow-and-log policy as [`ReviewCache::set`].
    pub fn update(&self, key: &str, value: &Value, ttl: Option<u64>) {
        let key = key.to_lowercase();
        if let Err(e) = self.try_update(&key, value, ttl) {
            warn!("Failed to update cached entry for key {key}: {e}");
        }
    }

    fn try_update(&self, key: &str, value: &Value, ttl: Option<u64>) -> Result<()> {
        let (val, exp) = Self::encode_entry(value, ttl)?;
        self.store.write(key, &val, &exp)?;
        info!("Updated cached entry for key {key}");
        Ok(())
    }

    fn encode_entry(value: &Value, ttl: Option<u64>) -> Result<(Vec<u8>, Vec<u8>)> {
        let deadline = expiry::compute_deadline(ttl, expiry::unix_now());
        Ok((codec::encode(value)?, codec::encode_deadline(deadline)))
    }

    // == Delete ==
    /// Deletes a cache entry. Absence counts as success.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.store.delete(&key.to_lowercase())
    }

    // == Count ==
    /// Total number of cached records, counting stale-but-unevicted rows.
    pub fn count(&self) -> Result<u64> {
        self.store.count()
    }

    // == Clear ==
    /// Removes every cached record; returns how many were deleted.
    pub fn clear(&self) -> Result<usize> {
        self.store.clear()
    }
}
