//! Error types for truckmap

use thiserror::Error;

/// Key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Photo ingestion errors
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Geolocation lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported in this environment")]
    Unsupported,

    #[error("Geolocation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Geolocation failed: {0}")]
    Failed(String),
}

/// Field-level validation failures for the add form.
///
/// Both checks always run, so both flags can be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct ValidationErrors {
    pub name: bool,
    pub location: bool,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        !self.name && !self.location
    }

    fn describe(&self) -> &'static str {
        match (self.name, self.location) {
            (true, true) => "Name and location are required",
            (true, false) => "Name is required",
            (false, true) => "Location is required",
            (false, false) => "No validation errors",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Truck not found: {0}")]
    TruckNotFound(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, Error>;
