//! Detail panel derivation

use chrono::{Local, TimeZone};
use truckmap_types::{Rating, Truck};

use super::list_view::{EMPTY_STAR, FILLED_STAR};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    /// Filled then unfilled stars, always five glyphs
    pub stars: String,
    pub description: &'a str,
    pub photos: &'a [String],
    pub coordinate: String,
    pub date: String,
}

pub fn full_stars(rating: Rating) -> String {
    let filled = rating.value() as usize;
    (0..Rating::MAX as usize)
        .map(|i| if i < filled { FILLED_STAR } else { EMPTY_STAR })
        .collect()
}

/// Long date, e.g. "Monday, March 4, 2024 at 13:05"
pub fn format_full_date(created_at_ms: i64) -> String {
    Local
        .timestamp_millis_opt(created_at_ms)
        .single()
        .map(|dt| dt.format("%A, %B %-d, %Y at %H:%M").to_string())
        .unwrap_or_default()
}

pub fn build_detail_view(truck: &Truck) -> DetailView<'_> {
    DetailView {
        id: &truck.id,
        name: &truck.name,
        stars: full_stars(truck.rating),
        description: &truck.description,
        photos: &truck.photos,
        coordinate: truck.coordinate().to_string(),
        date: format_full_date(truck.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_stars() {
        assert_eq!(full_stars(Rating::new(2)), "★★☆☆☆");
        assert_eq!(full_stars(Rating::UNRATED), "☆☆☆☆☆");
    }

    #[test]
    fn test_detail_view_fields() {
        let truck = Truck {
            id: "x".to_string(),
            name: "Tacos".to_string(),
            description: "Late night".to_string(),
            lat: 34.05,
            lng: -118.24,
            rating: Rating::new(5),
            photos: vec!["p".to_string()],
            created_at: 1_700_000_000_000,
        };
        let view = build_detail_view(&truck);
        assert_eq!(view.stars, "★★★★★");
        assert_eq!(view.coordinate, "34.05000, -118.24000");
        assert_eq!(view.photos.len(), 1);
        assert!(view.date.contains(" at "));
    }
}
