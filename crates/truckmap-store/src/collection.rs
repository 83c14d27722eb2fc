//! Loading and saving the serialized truck collection

use std::collections::HashSet;

use tracing::{debug, warn};
use truckmap_types::{StorageError, Truck};

use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of trucks
pub const COLLECTION_KEY: &str = "trucks";

/// Read the collection. Absent, unreadable or unparsable data yields an empty collection.
pub fn load_collection(storage: &dyn KeyValueStore) -> Vec<Truck> {
    let raw = match storage.get(COLLECTION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored collection, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "storage unreadable, starting empty");
            return Vec::new();
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "stored collection is corrupt, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let trucks: Vec<Truck> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Truck>(record) {
            Ok(truck) => Some(truck),
            Err(e) => {
                warn!(index, error = %e, "dropping unreadable truck record");
                None
            }
        })
        .filter(|truck| {
            if !truck.is_well_formed() {
                warn!(id = %truck.id, "dropping malformed truck record");
                return false;
            }
            if !seen.insert(truck.id.clone()) {
                warn!(id = %truck.id, "dropping duplicate truck id");
                return false;
            }
            true
        })
        .collect();

    debug!(count = trucks.len(), "loaded collection");
    trucks
}

/// Serialize and write the collection under [`COLLECTION_KEY`]
pub fn save_collection(storage: &mut dyn KeyValueStore, trucks: &[Truck]) -> Result<(), StorageError> {
    let content =
        serde_json::to_string(trucks).map_err(|e| StorageError::Unavailable(e.to_string()))?;
    storage.set(COLLECTION_KEY, &content)
}
