//! Search box, count label and truck cards

use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui, Vec2};
use truckmap_app::{AppContext, Event};
use truckmap_domain::service::list_view::PLACEHOLDER_GLYPH;
use truckmap_domain::service::CardView;

use crate::app::Action;
use crate::map_canvas::MapCanvas;
use crate::textures::{cover_uv, TextureCache};

const THUMB: f32 = 56.0;

#[derive(Default)]
pub struct SidebarPanel {
    search: String,
}

impl SidebarPanel {
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        app: &AppContext<MapCanvas>,
        textures: &mut TextureCache,
        actions: &mut Vec<Action>,
    ) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading("Truckmap");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let adding = app.draft().is_some();
                if ui.add_enabled(!adding, egui::Button::new("＋ Add truck")).clicked() {
                    actions.push(Action::Event(Event::OpenForm));
                }
                if ui.button("◎").on_hover_text("Center on my location").clicked() {
                    actions.push(Action::Locate);
                }
            });
        });
        ui.add_space(4.0);

        let search = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search trucks…")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            actions.push(Action::Event(Event::SearchChanged(self.search.clone())));
        }

        let view = app.list_view();
        ui.add_space(4.0);
        ui.label(RichText::new(&view.count_label).small().color(Color32::GRAY));
        ui.separator();

        if let Some(empty) = view.empty {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(empty.message()).color(Color32::GRAY));
            });
            return;
        }

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for card in &view.cards {
                if render_card(ui, card, textures) {
                    actions.push(Action::Event(Event::CardSelected(card.id.to_string())));
                }
                ui.add_space(4.0);
            }
        });
    }
}

/// Returns true when the card was clicked
fn render_card(ui: &mut Ui, card: &CardView<'_>, textures: &mut TextureCache) -> bool {
    let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let texture = card.thumbnail.and_then(|url| textures.get(ui.ctx(), url));
            match texture {
                Some(texture) => {
                    ui.add(
                        egui::Image::new((texture.id(), Vec2::splat(THUMB)))
                            .uv(cover_uv(&texture))
                            .corner_radius(4.0),
                    );
                }
                None => {
                    ui.add_sized(Vec2::splat(THUMB), egui::Label::new(RichText::new(PLACEHOLDER_GLYPH).size(28.0)));
                }
            }

            ui.vertical(|ui| {
                ui.label(RichText::new(card.name).strong());
                if !card.rating_glyphs.is_empty() {
                    ui.label(RichText::new(&card.rating_glyphs).color(Color32::from_rgb(230, 170, 30)));
                }
                if !card.excerpt.is_empty() {
                    ui.label(RichText::new(&card.excerpt).small());
                }
                ui.label(RichText::new(&card.date).small().color(Color32::GRAY));
            });
        });
    });

    frame
        .response
        .interact(Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}
