pub mod coach;
pub mod habits;
pub mod stats;

use std::sync::Arc;

use anyhow::Result;
use lifegarden::config::GardenConfig;
use lifegarden::garden::store::HabitStore;
use lifegarden::storage::{KeyValueStore, SqliteStore};

/// Open the configured database.
pub fn open_kv(config: &GardenConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store = SqliteStore::open(config.resolved_db_path())?;
    Ok(Arc::new(store))
}

/// Open the database and load the habit store from it.
pub fn open_garden(config: &GardenConfig) -> Result<(Arc<dyn KeyValueStore>, HabitStore)> {
    let kv = open_kv(config)?;
    let store = HabitStore::load(kv.clone());
    Ok((kv, store))
}
