//! One-shot location picking mode

use tracing::debug;
use truckmap_types::Coordinate;

/// Pin-drop state machine.
///
/// `T` is the pending continuation: whatever the requester needs to route the
/// picked coordinate back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinDrop<T> {
    Idle,
    Armed(T),
}

impl<T> Default for PinDrop<T> {
    fn default() -> Self {
        PinDrop::Idle
    }
}

impl<T> PinDrop<T> {
    pub fn is_armed(&self) -> bool {
        matches!(self, PinDrop::Armed(_))
    }

    /// Arm the mode. A continuation that was already armed is superseded and returned.
    pub fn arm(&mut self, continuation: T) -> Option<T> {
        let previous = self.take();
        if previous.is_some() {
            debug!("pin-drop re-armed, previous request superseded");
        }
        *self = PinDrop::Armed(continuation);
        previous
    }

    /// Feed a map click. Returns the continuation with the coordinate if armed,
    /// and disarms.
    pub fn fire(&mut self, at: Coordinate) -> Option<(T, Coordinate)> {
        self.take().map(|continuation| (continuation, at))
    }

    /// Disarm without firing
    pub fn cancel(&mut self) -> Option<T> {
        self.take()
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, PinDrop::Idle) {
            PinDrop::Idle => None,
            PinDrop::Armed(continuation) => Some(continuation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_is_one_shot() {
        let mut pin = PinDrop::default();
        pin.arm("form");
        let at = Coordinate::new(1.0, 2.0);

        assert_eq!(pin.fire(at), Some(("form", at)));
        assert!(!pin.is_armed());
        assert_eq!(pin.fire(at), None);
    }

    #[test]
    fn test_rearm_returns_superseded() {
        let mut pin = PinDrop::default();
        assert_eq!(pin.arm(1), None);
        assert_eq!(pin.arm(2), Some(1));
        assert_eq!(pin.fire(Coordinate::new(0.5, 0.5)).map(|(c, _)| c), Some(2));
    }

    #[test]
    fn test_cancel_does_not_fire() {
        let mut pin = PinDrop::default();
        pin.arm(7);
        assert_eq!(pin.cancel(), Some(7));
        assert_eq!(pin.fire(Coordinate::new(0.0, 0.0)), None);
    }
}
