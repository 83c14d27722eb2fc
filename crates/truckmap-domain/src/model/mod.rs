//! Transient interaction state

pub mod draft;
pub mod notification;
pub mod pin_drop;
pub mod rating_input;

pub use draft::{parse_coordinate_field, Draft, SessionId};
pub use notification::{Level, Notification, Notifier};
pub use pin_drop::PinDrop;
pub use rating_input::RatingInput;
