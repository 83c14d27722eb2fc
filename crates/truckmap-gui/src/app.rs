//! Main application structure

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, RichText};
use tracing::{error, warn};
use truckmap_app::{
    open_store, open_store_at, source_from_config, AppContext, Config, Event, GeolocationSource,
    TaskRunner,
};
use truckmap_domain::model::Level;
use truckmap_store::{MemoryStorage, TruckStore};

use crate::detail_panel;
use crate::form_panel;
use crate::map_canvas::MapCanvas;
use crate::sidebar_panel::SidebarPanel;
use crate::textures::TextureCache;

/// Something a panel wants done after drawing
pub enum Action {
    Event(Event),
    /// Start a geolocation lookup
    Locate,
    /// Open the file dialog and ingest the chosen photos
    PickPhotos,
}

pub struct TruckmapApp {
    config: Config,
    context: AppContext<MapCanvas>,
    tasks: TaskRunner,
    geolocation: Arc<dyn GeolocationSource>,
    sidebar: SidebarPanel,
    textures: TextureCache,
    /// Photo revision the texture cache was last pruned at
    pruned_at: u64,
}

impl TruckmapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.3;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            Config::default()
        });

        let store = open_store(&config)
            .or_else(|e| {
                warn!(error = %e, "data directory unavailable, trying temp directory");
                open_store_at(&std::env::temp_dir().join("truckmap"), config.storage_quota_bytes)
            })
            .unwrap_or_else(|e| {
                error!(error = %e, "no writable storage, changes will not persist");
                TruckStore::load(Box::new(MemoryStorage::new()))
            });

        let repaint = cc.egui_ctx.clone();
        let tasks = TaskRunner::new().with_waker(Arc::new(move || repaint.request_repaint()));

        Self {
            geolocation: source_from_config(&config),
            context: AppContext::new(&config, store, MapCanvas::new()),
            config,
            tasks,
            sidebar: SidebarPanel::default(),
            textures: TextureCache::default(),
            pruned_at: 0,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Event(event) => self.context.handle(event),
            Action::Locate => {
                let ticket = self.context.request_location();
                self.tasks.spawn_geolocation(
                    ticket,
                    self.geolocation.clone(),
                    self.config.geolocation_timeout(),
                );
            }
            Action::PickPhotos => {
                let Some(ticket) = self.context.request_photos() else {
                    return;
                };
                if let Some(paths) = rfd::FileDialog::new().set_title("Add photos").pick_files() {
                    self.tasks
                        .spawn_photo_batch(ticket, paths, self.config.photo_config());
                }
            }
        }
    }

    fn prune_textures(&mut self) {
        if self.context.photo_revision() == self.pruned_at {
            return;
        }
        self.pruned_at = self.context.photo_revision();
        self.textures.retain(self.context.live_photos());
    }

    fn render_map(&mut self, ui: &mut egui::Ui) -> Vec<Action> {
        let mut actions = Vec::new();
        let hint = self.context.map().pin_hint();
        let response = self.context.map_mut().widget_mut().ui(ui);

        if let Some(at) = response.clicked {
            actions.push(Action::Event(Event::MapClicked(at)));
        }
        if let Some(id) = response.marker_clicked {
            actions.push(Action::Event(Event::MarkerClicked(id)));
        }
        if let Some(id) = response.hovered_marker {
            if let Some(truck) = self.context.store().find(&id) {
                let rect = ui.max_rect();
                ui.painter().text(
                    rect.left_top() + egui::vec2(12.0, 12.0),
                    egui::Align2::LEFT_TOP,
                    &truck.name,
                    egui::FontId::proportional(15.0),
                    Color32::from_gray(40),
                );
            }
        }

        if let Some(hint) = hint {
            let rect = ui.max_rect();
            egui::Area::new(egui::Id::new("pin_hint"))
                .fixed_pos(rect.center_top() + egui::vec2(-130.0, 12.0))
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new(hint).strong());
                    });
                });
        }

        actions
    }

    fn render_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.context.notification(Instant::now()) else {
            return;
        };
        let color = match notification.level {
            Level::Info => Color32::from_rgb(60, 60, 70),
            Level::Success => Color32::from_rgb(40, 120, 60),
            Level::Warning => Color32::from_rgb(170, 90, 20),
        };
        let message = notification.message.clone();

        egui::Area::new(egui::Id::new("notification"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).fill(color).show(ui, |ui| {
                    ui.label(RichText::new(message).color(Color32::WHITE));
                });
            });

        // Wake up again to expire it
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl eframe::App for TruckmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.tasks.poll() {
            self.context.handle(event);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.context.handle(Event::Escape);
        }
        self.prune_textures();

        let mut actions = Vec::new();

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                self.sidebar
                    .ui(ui, &self.context, &mut self.textures, &mut actions);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                actions.extend(self.render_map(ui));
            });

        form_panel::show(ctx, &mut self.context, &mut self.textures, &mut actions);
        detail_panel::show(ctx, &self.context, &mut self.textures, &mut actions);
        detail_panel::show_lightbox(ctx, &self.context, &mut self.textures, &mut actions);
        self.render_notification(ctx);

        for action in actions {
            self.apply(action);
        }
    }
}
