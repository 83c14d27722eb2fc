//! Detail window and full-screen photo viewer

use eframe::egui::{self, Color32, RichText, Sense, Vec2};
use truckmap_app::{AppContext, Event};

use crate::app::Action;
use crate::form_panel;
use crate::map_canvas::MapCanvas;
use crate::textures::{cover_uv, fit_size, TextureCache};

const THUMB: f32 = 96.0;

pub fn show(
    ctx: &egui::Context,
    app: &AppContext<MapCanvas>,
    textures: &mut TextureCache,
    actions: &mut Vec<Action>,
) {
    let Some(view) = app.detail_view() else {
        return;
    };
    let confirming = app.is_confirming_delete();

    let mut open = true;
    egui::Window::new(RichText::new(view.name).strong())
        .id(egui::Id::new("truck_detail"))
        .open(&mut open)
        .collapsible(false)
        .default_width(380.0)
        .anchor(egui::Align2::RIGHT_TOP, anchor_offset(app.draft().is_some()))
        .show(ctx, |ui| {
            ui.label(RichText::new(&view.stars).size(18.0).color(Color32::from_rgb(230, 170, 30)));
            ui.label(RichText::new(&view.date).small().color(Color32::GRAY));
            ui.label(RichText::new(&view.coordinate).monospace().small());

            if !view.description.is_empty() {
                ui.add_space(6.0);
                ui.label(view.description);
            }

            if !view.photos.is_empty() {
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    for (index, url) in view.photos.iter().enumerate() {
                        let Some(texture) = textures.get(ui.ctx(), url) else {
                            continue;
                        };
                        let thumb = ui.add(
                            egui::Image::new((texture.id(), Vec2::splat(THUMB)))
                                .uv(cover_uv(&texture))
                                .corner_radius(4.0)
                                .sense(Sense::click()),
                        );
                        if thumb.on_hover_cursor(egui::CursorIcon::ZoomIn).clicked() {
                            actions.push(Action::Event(Event::OpenLightbox(index)));
                        }
                    }
                });
            }

            ui.add_space(10.0);
            ui.separator();

            if confirming {
                ui.label(format!("Delete \"{}\"? This cannot be undone.", view.name));
                ui.horizontal(|ui| {
                    let delete = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                        .fill(Color32::from_rgb(190, 50, 40));
                    if ui.add(delete).clicked() {
                        actions.push(Action::Event(Event::ConfirmDelete));
                    }
                    if ui.button("Keep").clicked() {
                        actions.push(Action::Event(Event::CancelDelete));
                    }
                });
            } else {
                ui.horizontal(|ui| {
                    if ui.button("Show on map").clicked() {
                        actions.push(Action::Event(Event::ShowOnMap));
                    }
                    if ui.button("Delete…").clicked() {
                        actions.push(Action::Event(Event::RequestDelete));
                    }
                });
            }
        });

    if !open {
        actions.push(Action::Event(Event::CloseDetail));
    }
}

/// Sits beside the add form when both are open
fn anchor_offset(form_open: bool) -> [f32; 2] {
    let margin = form_panel::MARGIN;
    if form_open {
        [-(margin + form_panel::WIDTH + 2.0 * margin), margin]
    } else {
        [-margin, margin]
    }
}

pub fn show_lightbox(
    ctx: &egui::Context,
    app: &AppContext<MapCanvas>,
    textures: &mut TextureCache,
    actions: &mut Vec<Action>,
) {
    let Some(url) = app.lightbox().photo() else {
        return;
    };
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("lightbox"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (backdrop, painter) = ui.allocate_painter(screen.size(), Sense::click());
            painter.rect_filled(screen, 0.0, Color32::from_black_alpha(220));

            if let Some(texture) = textures.get(ctx, url) {
                let size = fit_size(&texture, screen.size() * 0.9);
                let rect = egui::Rect::from_center_size(screen.center(), size);
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            painter.text(
                screen.right_top() + Vec2::new(-20.0, 16.0),
                egui::Align2::RIGHT_TOP,
                "✕",
                egui::FontId::proportional(24.0),
                Color32::WHITE,
            );

            if backdrop.clicked() {
                actions.push(Action::Event(Event::CloseLightbox));
            }
        });
}
