//! In-memory truck collection mirrored to storage on every mutation

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use truckmap_types::{NewTruck, StorageError, Truck};

use crate::collection::{load_collection, save_collection};
use crate::storage::KeyValueStore;

/// Result of a mutation: the value, plus a warning if the save failed.
///
/// A failed save never rolls back the in-memory change.
#[derive(Debug)]
pub struct Saved<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> Saved<T> {
    fn new(value: T, warning: Option<StorageError>) -> Self {
        Self { value, warning }
    }
}

/// The single source of truth for trucks
pub struct TruckStore {
    storage: Box<dyn KeyValueStore>,
    trucks: Vec<Truck>,
}

impl TruckStore {
    /// Load the collection from storage. Never fails; bad data means an empty store.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let trucks = load_collection(&*storage);
        Self { storage, trucks }
    }

    fn save(&mut self) -> Option<StorageError> {
        match save_collection(&mut *self.storage, &self.trucks) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "failed to save trucks; changes kept in memory only");
                Some(e)
            }
        }
    }

    /// Append a new truck stamped with the current time
    pub fn create(&mut self, fields: NewTruck) -> Saved<Truck> {
        self.create_at(fields, Utc::now())
    }

    /// Append a new truck with an explicit creation time
    pub fn create_at(&mut self, fields: NewTruck, created_at: DateTime<Utc>) -> Saved<Truck> {
        let truck = Truck::from_new(fields, created_at);
        info!(id = %truck.id, name = %truck.name, "truck created");
        self.trucks.push(truck.clone());
        let warning = self.save();
        Saved::new(truck, warning)
    }

    /// Remove the truck with `id`. Absent ids are a no-op and skip the save.
    pub fn delete(&mut self, id: &str) -> Saved<Option<Truck>> {
        let Some(index) = self.trucks.iter().position(|t| t.id == id) else {
            return Saved::new(None, None);
        };
        let removed = self.trucks.remove(index);
        info!(id = %removed.id, name = %removed.name, "truck deleted");
        let warning = self.save();
        Saved::new(Some(removed), warning)
    }

    pub fn find(&self, id: &str) -> Option<&Truck> {
        self.trucks.iter().find(|t| t.id == id)
    }

    /// All trucks in insertion order
    pub fn all(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }
}
