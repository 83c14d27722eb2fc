//! Domain state and pure view derivations, free of any display surface

pub mod model;
pub mod service;
