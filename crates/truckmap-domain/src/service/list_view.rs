//! Sidebar list derivation: filter, sort and card formatting

use chrono::{Local, TimeZone};
use truckmap_types::{Rating, Truck};

/// Maximum description excerpt length, in characters
pub const EXCERPT_LEN: usize = 90;

/// Shown in place of a thumbnail for trucks without photos
pub const PLACEHOLDER_GLYPH: &str = "🚚";

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Why the list has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty
    NoTrucks,
    /// The search filtered everything out
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoTrucks => "No trucks yet. Add the first one!",
            EmptyState::NoMatches => "No trucks match your search.",
        }
    }
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    /// First photo, if any; render [`PLACEHOLDER_GLYPH`] otherwise
    pub thumbnail: Option<&'a str>,
    /// One glyph per rating point, empty when unrated
    pub rating_glyphs: String,
    pub excerpt: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub count_label: String,
    pub cards: Vec<CardView<'a>>,
    pub empty: Option<EmptyState>,
}

/// Trucks whose name or description contains the trimmed query (case-insensitive),
/// newest first. Equal timestamps keep their collection order.
pub fn filter_trucks<'a>(trucks: &'a [Truck], query: &str) -> Vec<&'a Truck> {
    let needle = query.trim().to_lowercase();
    let mut filtered: Vec<&Truck> = trucks
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.name.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect();
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

pub fn rating_glyphs(rating: Rating) -> String {
    std::iter::repeat(FILLED_STAR)
        .take(rating.value() as usize)
        .collect()
}

/// Truncate to `max` characters, appending an ellipsis when anything was cut
pub fn excerpt(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 truck".to_string()
    } else {
        format!("{} trucks", count)
    }
}

/// Short date for list cards, e.g. "Mar 4, 2024"
pub fn format_card_date(created_at_ms: i64) -> String {
    Local
        .timestamp_millis_opt(created_at_ms)
        .single()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

pub fn build_list_view<'a>(trucks: &'a [Truck], query: &str) -> ListView<'a> {
    let filtered = filter_trucks(trucks, query);

    let empty = match (filtered.is_empty(), trucks.is_empty()) {
        (false, _) => None,
        (true, true) => Some(EmptyState::NoTrucks),
        (true, false) => Some(EmptyState::NoMatches),
    };

    let count = filtered.len();
    let cards = filtered
        .into_iter()
        .map(|t| CardView {
            id: &t.id,
            name: &t.name,
            thumbnail: t.first_photo(),
            rating_glyphs: rating_glyphs(t.rating),
            excerpt: excerpt(&t.description, EXCERPT_LEN),
            date: format_card_date(t.created_at),
        })
        .collect();

    ListView {
        count_label: count_label(count),
        cards,
        empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(id: &str, name: &str, description: &str, created_at: i64) -> Truck {
        Truck {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            lat: 34.05,
            lng: -118.24,
            rating: Rating::UNRATED,
            photos: Vec::new(),
            created_at,
        }
    }

    fn ids(trucks: &[&Truck]) -> Vec<String> {
        trucks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let trucks = vec![
            truck("t1", "One", "", 100),
            truck("t3", "Three", "", 300),
            truck("t2", "Two", "", 200),
        ];
        assert_eq!(ids(&filter_trucks(&trucks, "")), vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let trucks = vec![truck("a", "A", "", 5), truck("b", "B", "", 5)];
        assert_eq!(ids(&filter_trucks(&trucks, "")), vec!["a", "b"]);
    }

    #[test]
    fn test_search_case_insensitive_on_name_or_description() {
        let trucks = vec![
            truck("a", "Al's TACOS", "", 1),
            truck("b", "Burger Bus", "Smash tacos on Fridays", 2),
            truck("c", "Coffee Cart", "Espresso", 3),
        ];
        assert_eq!(ids(&filter_trucks(&trucks, "  tacos ")), vec!["b", "a"]);
        assert_eq!(filter_trucks(&trucks, "   ").len(), 3);
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let long = "x".repeat(120);
        let cut = excerpt(&long, EXCERPT_LEN);
        assert_eq!(cut.chars().count(), EXCERPT_LEN + 1);
        assert!(cut.ends_with('…'));

        let exact = "y".repeat(EXCERPT_LEN);
        assert_eq!(excerpt(&exact, EXCERPT_LEN), exact);
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(95);
        assert_eq!(excerpt(&text, EXCERPT_LEN).chars().count(), EXCERPT_LEN + 1);
    }

    #[test]
    fn test_rating_glyphs() {
        assert_eq!(rating_glyphs(Rating::new(3)), "★★★");
        assert_eq!(rating_glyphs(Rating::UNRATED), "");
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let none: Vec<Truck> = Vec::new();
        let view = build_list_view(&none, "");
        assert_eq!(view.empty, Some(EmptyState::NoTrucks));
        assert_eq!(view.count_label, "0 trucks");

        let trucks = vec![truck("a", "Tacos", "", 1)];
        let view = build_list_view(&trucks, "pizza");
        assert_eq!(view.empty, Some(EmptyState::NoMatches));
        assert_ne!(EmptyState::NoTrucks.message(), EmptyState::NoMatches.message());
    }

    #[test]
    fn test_card_contents() {
        let mut t = truck("a", "Tacos", "Great", 1_700_000_000_000);
        t.photos = vec!["data:first".to_string(), "data:second".to_string()];
        t.rating = Rating::new(2);
        let trucks = vec![t];

        let view = build_list_view(&trucks, "");
        assert_eq!(view.count_label, "1 truck");
        let card = &view.cards[0];
        assert_eq!(card.thumbnail, Some("data:first"));
        assert_eq!(card.rating_glyphs, "★★");
        assert_eq!(card.excerpt, "Great");
        assert!(!card.date.is_empty());
    }
}
