//! Current-position lookups

use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;
use truckmap_types::{Coordinate, GeolocationError};

use crate::config::Config;

/// Something that can report where the user is
pub trait GeolocationSource: Send + Sync {
    fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Always reports the same position (the configured home location)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl GeolocationSource for FixedLocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

/// The environment has no position sensor
#[derive(Debug, Clone, Copy)]
pub struct Unsupported;

impl GeolocationSource for Unsupported {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

pub fn source_from_config(config: &Config) -> Arc<dyn GeolocationSource> {
    match config.home_location {
        Some(home) if home.is_valid() => Arc::new(FixedLocation(home)),
        _ => Arc::new(Unsupported),
    }
}

/// Query `source`, giving up after `timeout`.
///
/// A lookup that outlives the timeout keeps running on its own thread; its
/// answer is dropped.
pub fn locate_with_timeout(
    source: Arc<dyn GeolocationSource>,
    timeout: Duration,
) -> Result<Coordinate, GeolocationError> {
    let (tx, rx) = channel();
    thread::spawn(move || {
        let _ = tx.send(source.current_position());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            debug!(?timeout, "geolocation timed out");
            Err(GeolocationError::Timeout(timeout.as_secs()))
        }
        Err(RecvTimeoutError::Disconnected) => Err(GeolocationError::Failed(
            "position lookup ended without an answer".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slow;

    impl GeolocationSource for Slow {
        fn current_position(&self) -> Result<Coordinate, GeolocationError> {
            thread::sleep(Duration::from_millis(500));
            Ok(Coordinate::new(1.0, 1.0))
        }
    }

    #[test]
    fn test_fixed_location_resolves() {
        let at = Coordinate::new(34.05, -118.24);
        let result = locate_with_timeout(Arc::new(FixedLocation(at)), Duration::from_secs(1));
        assert_eq!(result, Ok(at));
    }

    #[test]
    fn test_unsupported_is_reported() {
        let result = locate_with_timeout(Arc::new(Unsupported), Duration::from_secs(1));
        assert_eq!(result, Err(GeolocationError::Unsupported));
    }

    #[test]
    fn test_slow_source_times_out() {
        let result = locate_with_timeout(Arc::new(Slow), Duration::from_millis(20));
        assert_eq!(result, Err(GeolocationError::Timeout(0)));
    }

    #[test]
    fn test_source_from_config() {
        let config = Config::default();
        assert_eq!(
            source_from_config(&config).current_position(),
            Err(GeolocationError::Unsupported)
        );

        let config = Config {
            home_location: Some(Coordinate::new(10.0, 20.0)),
            ..Config::default()
        };
        assert_eq!(
            source_from_config(&config).current_position(),
            Ok(Coordinate::new(10.0, 20.0))
        );
    }
}
