//! Persistent store for reported trucks

pub mod collection;
pub mod storage;
pub mod trucks;

pub use collection::{load_collection, save_collection, COLLECTION_KEY};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use trucks::{Saved, TruckStore};
