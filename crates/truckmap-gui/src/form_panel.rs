//! Add-truck form window

use eframe::egui::{self, Color32, RichText, Sense, Ui, Vec2};
use truckmap_app::{AppContext, Event, FocusField};
use truckmap_domain::model::RatingInput;
use truckmap_domain::service::list_view::{EMPTY_STAR, FILLED_STAR};
use truckmap_types::Rating;

use crate::app::Action;
use crate::map_canvas::MapCanvas;
use crate::textures::{cover_uv, TextureCache};

/// Window width, also used to keep the detail window clear of it
pub const WIDTH: f32 = 360.0;
pub const MARGIN: f32 = 12.0;
const THUMB: f32 = 64.0;
const STAR_COLOR: Color32 = Color32::from_rgb(230, 170, 30);

pub fn show(
    ctx: &egui::Context,
    app: &mut AppContext<MapCanvas>,
    textures: &mut TextureCache,
    actions: &mut Vec<Action>,
) {
    let focus = app.take_focus_request();
    let Some(draft) = app.draft_mut() else {
        return;
    };

    let mut open = true;
    egui::Window::new("Add truck")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(WIDTH)
        .anchor(egui::Align2::RIGHT_TOP, [-MARGIN, MARGIN])
        .show(ctx, |ui| {
            let errors = draft.errors();

            ui.label("Name");
            let name = ui.add(
                egui::TextEdit::singleline(&mut draft.name)
                    .hint_text("e.g. Al's Tacos")
                    .desired_width(f32::INFINITY),
            );
            if focus == Some(FocusField::Name) {
                name.request_focus();
            }
            if errors.name {
                error_label(ui, "Please enter a name");
            }

            ui.add_space(6.0);
            ui.label("Description");
            ui.add(
                egui::TextEdit::multiline(&mut draft.description)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(6.0);
            ui.label("Location");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut draft.lat).hint_text("lat").desired_width(90.0));
                ui.add(egui::TextEdit::singleline(&mut draft.lng).hint_text("lng").desired_width(90.0));
                if ui.button("📍 Pick on map").clicked() {
                    actions.push(Action::Event(Event::PickLocation));
                }
                if ui.button("◎").on_hover_text("Use my location").clicked() {
                    actions.push(Action::Locate);
                }
            });
            if errors.location {
                error_label(ui, "Please set a location");
            }

            ui.add_space(6.0);
            ui.label("Rating");
            rating_input(ui, *draft.rating(), actions);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Photos");
                if ui.button("Add photos…").clicked() {
                    actions.push(Action::PickPhotos);
                }
            });
            ui.horizontal_wrapped(|ui| {
                for (index, url) in draft.photos().iter().enumerate() {
                    let Some(texture) = textures.get(ui.ctx(), url) else {
                        continue;
                    };
                    let thumb = ui.add(
                        egui::Image::new((texture.id(), Vec2::splat(THUMB)))
                            .uv(cover_uv(&texture))
                            .corner_radius(4.0)
                            .sense(Sense::click()),
                    );
                    if thumb.on_hover_text("Click to remove").clicked() {
                        actions.push(Action::Event(Event::RemoveDraftPhoto(index)));
                    }
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(RichText::new("Save").strong()).clicked() {
                    actions.push(Action::Event(Event::SubmitForm));
                }
                if ui.button("Cancel").clicked() {
                    actions.push(Action::Event(Event::CancelForm));
                }
            });
        });

    if !open {
        actions.push(Action::Event(Event::CancelForm));
    }
}

fn error_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).small().color(Color32::from_rgb(200, 40, 40)));
}

/// Five clickable stars previewing the hovered value
fn rating_input(ui: &mut Ui, input: RatingInput, actions: &mut Vec<Action>) {
    let displayed = input.displayed();
    let mut hovered = None;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for value in 1..=Rating::MAX {
            let glyph = if value <= displayed.value() { FILLED_STAR } else { EMPTY_STAR };
            let star = ui.add(
                egui::Label::new(RichText::new(glyph.to_string()).size(22.0).color(STAR_COLOR))
                    .sense(Sense::click()),
            );
            if star.hovered() {
                hovered = Some(value);
            }
            if star.clicked() {
                actions.push(Action::Event(Event::RatingClicked(value)));
            }
        }
    });

    match hovered {
        Some(value) if value != displayed.value() => {
            actions.push(Action::Event(Event::RatingHovered(value)));
        }
        None if displayed != input.pending() => actions.push(Action::Event(Event::RatingLeft)),
        _ => {}
    }
}
