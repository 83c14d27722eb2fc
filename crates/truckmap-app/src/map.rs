//! Map binding: one marker per truck, pin-drop mode, and view navigation

use std::collections::HashMap;

use tracing::debug;
use truckmap_domain::model::{PinDrop, SessionId};
use truckmap_types::{Coordinate, Truck};

/// The primitives the catalog needs from a map widget
pub trait MapWidget {
    /// Exclusively owned marker handle
    type Marker;

    fn add_marker(&mut self, id: &str, at: Coordinate) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Move (and animate, where supported) the view
    fn set_view(&mut self, center: Coordinate, zoom: f64);

    /// Show or hide the crosshair cursor used while picking a location
    fn set_pin_cursor(&mut self, armed: bool);
}

/// Who is waiting for a pin-drop click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRequest(pub SessionId);

pub const PIN_HINT: &str = "Click on the map to place the truck";

/// Owns the widget and keeps its markers in 1:1 correspondence with truck ids
pub struct MapBinding<W: MapWidget> {
    widget: W,
    markers: HashMap<String, W::Marker>,
    pin: PinDrop<PinRequest>,
}

impl<W: MapWidget> MapBinding<W> {
    pub fn new(mut widget: W, center: Coordinate, zoom: f64) -> Self {
        widget.set_view(center, zoom);
        Self {
            widget,
            markers: HashMap::new(),
            pin: PinDrop::default(),
        }
    }

    /// Create markers for trucks loaded at startup
    pub fn sync<'a>(&mut self, trucks: impl IntoIterator<Item = &'a Truck>) {
        for truck in trucks {
            self.add_marker(truck);
        }
    }

    /// Add the marker for `truck`, replacing a stale one with the same id
    pub fn add_marker(&mut self, truck: &Truck) {
        let marker = self.widget.add_marker(&truck.id, truck.coordinate());
        if let Some(old) = self.markers.insert(truck.id.clone(), marker) {
            self.widget.remove_marker(old);
        }
    }

    /// Remove and forget the marker for `id`. No-op if absent.
    pub fn remove_marker(&mut self, id: &str) {
        if let Some(marker) = self.markers.remove(id) {
            self.widget.remove_marker(marker);
        }
    }

    pub fn has_marker(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn recenter(&mut self, center: Coordinate, zoom: f64) {
        debug!(%center, zoom, "recenter map");
        self.widget.set_view(center, zoom);
    }

    /// Arm pin-drop. Returns the request this one superseded, if any.
    pub fn enter_pin_drop(&mut self, request: PinRequest) -> Option<PinRequest> {
        let superseded = self.pin.arm(request);
        self.widget.set_pin_cursor(true);
        superseded
    }

    /// Disarm without delivering a coordinate
    pub fn exit_pin_drop(&mut self) -> Option<PinRequest> {
        let cancelled = self.pin.cancel();
        self.widget.set_pin_cursor(false);
        cancelled
    }

    pub fn is_pin_drop_armed(&self) -> bool {
        self.pin.is_armed()
    }

    pub fn pin_hint(&self) -> Option<&'static str> {
        self.pin.is_armed().then_some(PIN_HINT)
    }

    /// Route a map click: delivers it to the armed request, if any
    pub fn handle_click(&mut self, at: Coordinate) -> Option<(PinRequest, Coordinate)> {
        let fired = self.pin.fire(at);
        if fired.is_some() {
            self.widget.set_pin_cursor(false);
        }
        fired
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }
}

/// A map with no display surface. Records markers, view and cursor state.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    next_marker: u64,
    markers: HashMap<u64, (String, Coordinate)>,
    view: Option<(Coordinate, f64)>,
    pin_cursor: bool,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.markers.values().map(|(id, _)| id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn view(&self) -> Option<(Coordinate, f64)> {
        self.view
    }

    pub fn pin_cursor(&self) -> bool {
        self.pin_cursor
    }
}

impl MapWidget for HeadlessMap {
    type Marker = u64;

    fn add_marker(&mut self, id: &str, at: Coordinate) -> u64 {
        self.next_marker += 1;
        self.markers.insert(self.next_marker, (id.to_string(), at));
        self.next_marker
    }

    fn remove_marker(&mut self, marker: u64) {
        self.markers.remove(&marker);
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.view = Some((center, zoom));
    }

    fn set_pin_cursor(&mut self, armed: bool) {
        self.pin_cursor = armed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckmap_types::Rating;

    fn truck(id: &str) -> Truck {
        Truck {
            id: id.to_string(),
            name: "Tacos".to_string(),
            description: String::new(),
            lat: 34.05,
            lng: -118.24,
            rating: Rating::UNRATED,
            photos: Vec::new(),
            created_at: 0,
        }
    }

    fn binding() -> MapBinding<HeadlessMap> {
        MapBinding::new(HeadlessMap::new(), Coordinate::new(34.0, -118.0), 11.0)
    }

    #[test]
    fn test_new_sets_default_view() {
        let map = binding();
        assert_eq!(map.widget().view(), Some((Coordinate::new(34.0, -118.0), 11.0)));
    }

    #[test]
    fn test_markers_follow_trucks() {
        let mut map = binding();
        let trucks = vec![truck("a"), truck("b")];
        map.sync(&trucks);
        assert_eq!(map.marker_count(), 2);
        assert_eq!(map.widget().marker_ids(), vec!["a", "b"]);

        map.remove_marker("a");
        assert!(!map.has_marker("a"));
        assert_eq!(map.widget().marker_ids(), vec!["b"]);

        map.remove_marker("missing");
        assert_eq!(map.marker_count(), 1);
    }

    #[test]
    fn test_re_adding_same_id_keeps_one_marker() {
        let mut map = binding();
        map.add_marker(&truck("a"));
        map.add_marker(&truck("a"));
        assert_eq!(map.widget().marker_ids(), vec!["a"]);
    }

    #[test]
    fn test_pin_drop_click_fires_once() {
        let mut map = binding();
        let request = PinRequest(SessionId::first());
        assert_eq!(map.enter_pin_drop(request), None);
        assert!(map.widget().pin_cursor());
        assert_eq!(map.pin_hint(), Some(PIN_HINT));

        let at = Coordinate::new(1.0, 2.0);
        assert_eq!(map.handle_click(at), Some((request, at)));
        assert!(!map.widget().pin_cursor());
        assert_eq!(map.handle_click(at), None);
    }

    #[test]
    fn test_pin_drop_rearm_and_exit() {
        let mut map = binding();
        let first = PinRequest(SessionId::first());
        let second = PinRequest(SessionId::first().next());
        map.enter_pin_drop(first);
        assert_eq!(map.enter_pin_drop(second), Some(first));
        assert_eq!(map.exit_pin_drop(), Some(second));
        assert!(!map.is_pin_drop_armed());
        assert_eq!(map.handle_click(Coordinate::new(1.0, 1.0)), None);
    }
}
