//! Typed errors for the garden core.

use thiserror::Error;

/// Failures surfaced by the habit store and the persistence adapters.
#[derive(Debug, Error)]
pub enum GardenError {
    /// A habit was submitted without a title.
    #[error("habit title must not be empty")]
    EmptyTitle,

    /// The key-value adapter could not read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for GardenError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
