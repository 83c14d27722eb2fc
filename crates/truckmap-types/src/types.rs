//! Truck record and related value types

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Finite and inside the valid latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Star rating, 0 (unrated) through 5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;
    pub const UNRATED: Rating = Rating(0);

    /// Values above [`Rating::MAX`] are clamped
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_unrated(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A reported truck, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    /// Opaque unique identifier (UUID v4)
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub rating: Rating,
    /// Image data URLs, in upload order
    #[serde(default)]
    pub photos: Vec<String>,
    /// Epoch milliseconds
    pub created_at: i64,
}

impl Truck {
    /// Build a committed record from validated fields
    pub fn from_new(fields: NewTruck, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: fields.name,
            description: fields.description,
            lat: fields.coordinate.lat,
            lng: fields.coordinate.lng,
            rating: fields.rating,
            photos: fields.photos,
            created_at: created_at.timestamp_millis(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Creation time in the local timezone
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.created_at).single()
    }

    pub fn first_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// Whether the record satisfies the collection invariants
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty() && self.coordinate().is_finite()
    }
}

/// Fields for a truck that has not been committed yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTruck {
    pub name: String,
    pub description: String,
    pub coordinate: Coordinate,
    pub rating: Rating,
    pub photos: Vec<String>,
}

impl NewTruck {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            coordinate,
            rating: Rating::UNRATED,
            photos: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = photos;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamps() {
        assert_eq!(Rating::new(9).value(), 5);
        assert!(Rating::new(0).is_unrated());
    }

    #[test]
    fn test_truck_json_field_names() {
        let truck = Truck::from_new(
            NewTruck::new("Al's Tacos", Coordinate::new(34.05, -118.24)).with_rating(Rating::new(3)),
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        );
        let value = serde_json::to_value(&truck).unwrap();
        assert_eq!(value["name"], "Al's Tacos");
        assert_eq!(value["rating"], 3);
        assert_eq!(value["createdAt"], 1_700_000_000_000i64);
        assert_eq!(value["lng"], -118.24);
    }

    #[test]
    fn test_truck_missing_optional_fields() {
        let json = r#"{"id":"a","name":"X","lat":1.5,"lng":2.5,"createdAt":5}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();
        assert_eq!(truck.description, "");
        assert!(truck.rating.is_unrated());
        assert!(truck.photos.is_empty());
        assert!(truck.is_well_formed());
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(34.05, -118.24).is_valid());
        assert!(!Coordinate::new(95.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
    }
}
