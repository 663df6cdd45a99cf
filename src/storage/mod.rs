//! Persistence adapter — a flat, string-keyed store of JSON values.
//!
//! The [`KeyValueStore`] port is all the garden core knows about durability.
//! [`SqliteStore`] keeps values in a single-table SQLite file; [`MemoryStore`]
//! keeps them in a map for tests and throwaway sessions. Callers read through
//! [`load_json_or`], which turns missing or corrupt values into defaults.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GardenError;

/// Key holding the serialized habit collection.
pub const HABITS_KEY: &str = "lg_habits";
/// Key holding the serialized [`UserStats`](crate::garden::types::UserStats).
pub const STATS_KEY: &str = "lg_stats";
/// Key holding the calendar date of the last wisdom fetch.
pub const LAST_WISDOM_DATE_KEY: &str = "lg_last_wisdom_date";
/// Key holding the cached wisdom text.
pub const DAILY_WISDOM_KEY: &str = "lg_daily_wisdom";

/// Durable key-value storage. Last writer wins; no transactions, no versioning.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, GardenError>;

    /// Overwrite the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), GardenError>;
}

/// Read and decode a JSON value, substituting `default` when the key is absent,
/// the adapter fails, or the stored text does not parse.
pub fn load_json_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value unusable, using default");
            default
        }
    }
}

/// Read and decode a JSON value. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, GardenError> {
    match store.load(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), GardenError> {
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)
}
