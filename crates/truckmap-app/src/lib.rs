//! Application layer - config, logging, map binding, event wiring, export

pub mod config;
pub mod context;
pub mod export;
pub mod geolocation;
pub mod logging;
pub mod map;
pub mod repository;
pub mod tasks;

pub use config::Config;
pub use context::{AppContext, Event, FocusField, Lightbox, Ticket};
pub use export::{export_trucks, ExportType};
pub use geolocation::{source_from_config, GeolocationSource};
pub use logging::{init_logging, Verbosity};
pub use map::{HeadlessMap, MapBinding, MapWidget, PinRequest};
pub use repository::{open_store, open_store_at};
pub use tasks::TaskRunner;
