//! Painted map widget
//!
//! A Web Mercator viewport drawn with the egui painter: a graticule, one pin
//! per truck, drag to pan and scroll to zoom. View changes requested through
//! [`MapWidget::set_view`] are eased in over a few frames.

use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use truckmap_app::MapWidget;
use truckmap_domain::service::projection::{clamp_zoom, project, unproject, world_size, MAX_LATITUDE};
use truckmap_types::Coordinate;

const MARKER_RADIUS: f32 = 8.0;
/// Pointer distance within which a click hits a marker
const MARKER_HIT: f32 = 12.0;
const EASE: f64 = 0.25;
const ZOOM_PER_SCROLL_POINT: f64 = 1.0 / 120.0;
const MIN_GRID_SPACING: f64 = 80.0;
const GRID_STEPS: [f64; 14] = [
    30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002, 0.001,
];

const WATER: Color32 = Color32::from_rgb(214, 228, 236);
const GRID: Color32 = Color32::from_rgb(180, 198, 210);
const PIN: Color32 = Color32::from_rgb(217, 72, 47);

/// What happened on the canvas this frame
#[derive(Debug, Default)]
pub struct CanvasResponse {
    /// Click on empty map (or anywhere while picking a location)
    pub clicked: Option<Coordinate>,
    pub marker_clicked: Option<String>,
    pub hovered_marker: Option<String>,
}

pub struct MapCanvas {
    center: Coordinate,
    zoom: f64,
    target: Option<(Coordinate, f64)>,
    next_marker: u64,
    markers: HashMap<u64, (String, Coordinate)>,
    pin_cursor: bool,
}

impl MapCanvas {
    pub fn new() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            zoom: 2.0,
            target: None,
            next_marker: 0,
            markers: HashMap::new(),
            pin_cursor: false,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn ui(&mut self, ui: &mut Ui) -> CanvasResponse {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        let mut out = CanvasResponse::default();

        if self.step_animation() {
            ui.ctx().request_repaint();
        }

        if response.dragged() {
            self.target = None;
            self.pan(response.drag_delta());
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
            if scroll != 0.0 {
                self.target = None;
                let anchor = ui.input(|i| i.pointer.hover_pos()).unwrap_or(rect.center());
                self.zoom_around(rect, anchor, scroll * ZOOM_PER_SCROLL_POINT);
            }
        }

        painter.rect_filled(rect, 0.0, WATER);
        self.paint_graticule(&painter, rect);

        let pointer = response.hover_pos();
        for (id, at) in self.markers.values() {
            let pos = to_screen(self.center, self.zoom, rect, *at);
            if !rect.expand(MARKER_RADIUS).contains(pos) {
                continue;
            }
            let hot = pointer.is_some_and(|p| p.distance(pos) <= MARKER_HIT);
            if hot {
                out.hovered_marker = Some(id.clone());
            }
            paint_pin(&painter, pos, hot);
        }

        painter.text(
            rect.right_bottom() + Vec2::new(-8.0, -6.0),
            Align2::RIGHT_BOTTOM,
            format!("{}  z{:.1}", self.center, self.zoom),
            FontId::monospace(11.0),
            Color32::from_gray(90),
        );

        if self.pin_cursor && response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        } else if out.hovered_marker.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match (&out.hovered_marker, self.pin_cursor) {
                    (Some(id), false) => out.marker_clicked = Some(id.clone()),
                    _ => out.clicked = Some(from_screen(self.center, self.zoom, rect, pos)),
                }
            }
        }

        out
    }

    /// Move one easing step toward the requested view. Returns true while moving.
    fn step_animation(&mut self) -> bool {
        let Some((target, zoom)) = self.target else {
            return false;
        };
        let lat = self.center.lat + (target.lat - self.center.lat) * EASE;
        let lng = self.center.lng + (target.lng - self.center.lng) * EASE;
        self.zoom += (zoom - self.zoom) * EASE;
        self.center = Coordinate::new(lat, lng);

        let (tx, ty) = project(target, zoom);
        let (cx, cy) = project(self.center, zoom);
        if (tx - cx).hypot(ty - cy) < 0.5 && (zoom - self.zoom).abs() < 0.01 {
            self.center = target;
            self.zoom = zoom;
            self.target = None;
        }
        true
    }

    fn pan(&mut self, delta: Vec2) {
        let (x, y) = project(self.center, self.zoom);
        self.center = unproject(x - delta.x as f64, y - delta.y as f64, self.zoom);
    }

    /// Zoom keeping the coordinate under `anchor` fixed on screen
    fn zoom_around(&mut self, rect: Rect, anchor: Pos2, by: f64) {
        let fixed = from_screen(self.center, self.zoom, rect, anchor);
        self.zoom = clamp_zoom(self.zoom + by);
        let (fx, fy) = project(fixed, self.zoom);
        let offset = anchor - rect.center();
        self.center = unproject(fx - offset.x as f64, fy - offset.y as f64, self.zoom);
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: Rect) {
        let size = world_size(self.zoom);
        let px_per_degree = size / 360.0;
        let step = GRID_STEPS
            .iter()
            .rev()
            .copied()
            .find(|s| s * px_per_degree >= MIN_GRID_SPACING)
            .unwrap_or(GRID_STEPS[0]);

        let (cx, cy) = project(self.center, self.zoom);
        let half = rect.size() / 2.0;
        let stroke = Stroke::new(1.0, GRID);

        let west = (cx - half.x as f64) / size * 360.0 - 180.0;
        let east = (cx + half.x as f64) / size * 360.0 - 180.0;
        let mut lng = (west / step).ceil() * step;
        while lng <= east {
            let x = rect.center().x + ((lng + 180.0) / 360.0 * size - cx) as f32;
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            lng += step;
        }

        let north = unproject(cx, cy - half.y as f64, self.zoom).lat;
        let south = unproject(cx, cy + half.y as f64, self.zoom).lat;
        let mut lat = (south / step).ceil() * step;
        while lat <= north.min(MAX_LATITUDE) {
            let (_, wy) = project(Coordinate::new(lat, 0.0), self.zoom);
            let y = rect.center().y + (wy - cy) as f32;
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            lat += step;
        }
    }
}

impl MapWidget for MapCanvas {
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
        self.target = Some((center, clamp_zoom(zoom)));
    }

    fn set_pin_cursor(&mut self, armed: bool) {
        self.pin_cursor = armed;
    }
}

fn paint_pin(painter: &egui::Painter, pos: Pos2, hot: bool) {
    let radius = if hot { MARKER_RADIUS + 2.0 } else { MARKER_RADIUS };
    let head = pos - Vec2::new(0.0, radius * 1.6);
    painter.line_segment([pos, head], Stroke::new(2.0, PIN));
    painter.circle_filled(head, radius, PIN);
    painter.circle_stroke(head, radius, Stroke::new(1.5, Color32::WHITE));
    painter.circle_filled(pos, 2.0, Color32::from_black_alpha(120));
}

pub fn to_screen(center: Coordinate, zoom: f64, rect: Rect, at: Coordinate) -> Pos2 {
    let (cx, cy) = project(center, zoom);
    let (x, y) = project(at, zoom);
    rect.center() + Vec2::new((x - cx) as f32, (y - cy) as f32)
}

pub fn from_screen(center: Coordinate, zoom: f64, rect: Rect, pos: Pos2) -> Coordinate {
    let (cx, cy) = project(center, zoom);
    let offset = pos - rect.center();
    unproject(cx + offset.x as f64, cy + offset.y as f64, zoom)
}
