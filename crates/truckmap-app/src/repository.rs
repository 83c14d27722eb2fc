//! Opening the on-disk truck store

use std::path::Path;

use tracing::info;
use truckmap_store::{FileStorage, TruckStore};
use truckmap_types::Result;

use crate::config::Config;

/// Open the store in the configured data directory
pub fn open_store(config: &Config) -> Result<TruckStore> {
    open_store_at(&config.data_dir()?, config.storage_quota_bytes)
}

pub fn open_store_at(dir: &Path, quota: Option<usize>) -> Result<TruckStore> {
    let storage = FileStorage::open(dir.to_path_buf())?.with_quota(quota);
    let store = TruckStore::load(Box::new(storage));
    info!(dir = %dir.display(), trucks = store.len(), "opened truck store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckmap_types::{Coordinate, NewTruck};

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store_at(dir.path(), None).unwrap();
        assert!(store.is_empty());
        let created = store.create(NewTruck::new("Tacos", Coordinate::new(1.0, 2.0)));
        assert!(created.warning.is_none());

        let reopened = open_store_at(dir.path(), None).unwrap();
        assert_eq!(reopened.all(), store.all());
    }

    #[test]
    fn test_open_store_uses_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("nested")),
            ..Config::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.is_empty());
        assert!(dir.path().join("nested").is_dir());
    }
}
