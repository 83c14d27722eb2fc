//! Uncommitted add-form state

use truckmap_types::{Coordinate, NewTruck, ValidationErrors};

use super::rating_input::RatingInput;

/// Identity of one opening of the add form.
///
/// Asynchronous work started for a draft carries its session so results that
/// arrive after the draft is gone can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn first() -> Self {
        SessionId(1)
    }

    pub fn next(self) -> Self {
        SessionId(self.0.wrapping_add(1))
    }
}

/// Parse a typed coordinate component. Blank, unparsable, non-finite and zero all count as unset.
pub fn parse_coordinate_field(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value != 0.0).then_some(value)
}

/// Text inputs, pending rating and pending photos of the add form
#[derive(Debug, Clone)]
pub struct Draft {
    session: SessionId,
    pub name: String,
    pub description: String,
    pub lat: String,
    pub lng: String,
    rating: RatingInput,
    photos: Vec<String>,
    errors: ValidationErrors,
}

impl Draft {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            name: String::new(),
            description: String::new(),
            lat: String::new(),
            lng: String::new(),
            rating: RatingInput::default(),
            photos: Vec::new(),
            errors: ValidationErrors::default(),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Fill both coordinate inputs and clear any location error
    pub fn set_location(&mut self, at: Coordinate) {
        self.lat = format!("{:.6}", at.lat);
        self.lng = format!("{:.6}", at.lng);
        self.errors.location = false;
    }

    /// The typed location, if both components are set and in range
    pub fn location(&self) -> Option<Coordinate> {
        let lat = parse_coordinate_field(&self.lat)?;
        let lng = parse_coordinate_field(&self.lng)?;
        let at = Coordinate::new(lat, lng);
        at.is_valid().then_some(at)
    }

    pub fn rating(&self) -> &RatingInput {
        &self.rating
    }

    pub fn rating_mut(&mut self) -> &mut RatingInput {
        &mut self.rating
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn add_photo(&mut self, data_url: String) {
        self.photos.push(data_url);
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn errors(&self) -> ValidationErrors {
        self.errors
    }

    /// Run every check, record the field errors, and build the new truck if all pass
    pub fn validate(&mut self) -> Result<NewTruck, ValidationErrors> {
        let name = self.name.trim();
        let location = self.location();

        self.errors = ValidationErrors {
            name: name.is_empty(),
            location: location.is_none(),
        };

        match location {
            Some(at) if self.errors.is_empty() => Ok(NewTruck::new(name, at)
                .with_description(self.description.trim())
                .with_rating(self.rating.pending())
                .with_photos(self.photos.clone())),
            _ => Err(self.errors),
        }
    }
}
