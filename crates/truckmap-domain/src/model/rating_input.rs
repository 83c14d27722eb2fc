//! Star rating control state

use truckmap_types::Rating;

/// Pending rating plus an optional hover preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingInput {
    pending: Rating,
    hover: Option<Rating>,
}

impl RatingInput {
    /// Clicking the current value clears it; any other value replaces it
    pub fn click(&mut self, value: u8) {
        let value = Rating::new(value);
        self.pending = if self.pending == value {
            Rating::UNRATED
        } else {
            value
        };
    }

    pub fn hover(&mut self, value: u8) {
        self.hover = Some(Rating::new(value));
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Committed value, ignoring hover
    pub fn pending(&self) -> Rating {
        self.pending
    }

    /// What the control shows right now
    pub fn displayed(&self) -> Rating {
        self.hover.unwrap_or(self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_same_value_toggles_off() {
        let mut input = RatingInput::default();
        input.click(3);
        assert_eq!(input.pending().value(), 3);
        input.click(3);
        assert_eq!(input.pending(), Rating::UNRATED);
    }

    #[test]
    fn test_click_other_value_replaces() {
        let mut input = RatingInput::default();
        input.click(3);
        input.click(5);
        assert_eq!(input.pending().value(), 5);
    }

    #[test]
    fn test_hover_previews_then_restores() {
        let mut input = RatingInput::default();
        input.click(2);
        input.hover(4);
        assert_eq!(input.displayed().value(), 4);
        assert_eq!(input.pending().value(), 2);
        input.leave();
        assert_eq!(input.displayed().value(), 2);
    }
}
