//! Decoded photo textures, keyed by data URL

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use eframe::egui::{self, ColorImage, TextureHandle, Vec2};
use truckmap_vision::decode_data_url;

/// Caches one texture per distinct photo. Photos that fail to decode are
/// remembered as `None` so they are not retried every frame.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<u64, Option<TextureHandle>>,
}

impl TextureCache {
    pub fn get(&mut self, ctx: &egui::Context, data_url: &str) -> Option<TextureHandle> {
        let key = key_of(data_url);
        self.textures
            .entry(key)
            .or_insert_with(|| load(ctx, key, data_url))
            .clone()
    }

    /// Drop textures for photos no longer in `live`
    pub fn retain<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) {
        let keep: std::collections::HashSet<u64> = live.into_iter().map(key_of).collect();
        self.textures.retain(|key, _| keep.contains(key));
    }
}

fn key_of(data_url: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    data_url.hash(&mut hasher);
    hasher.finish()
}

fn load(ctx: &egui::Context, key: u64, data_url: &str) -> Option<TextureHandle> {
    let bytes = decode_data_url(data_url)?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();

    let color_image = ColorImage::from_rgba_unmultiplied(size, &pixels);
    Some(ctx.load_texture(
        format!("photo_{:x}", key),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

/// Scale `texture` to fit within `max`, preserving aspect ratio
pub fn fit_size(texture: &TextureHandle, max: Vec2) -> Vec2 {
    let original = texture.size_vec2();
    let scale = (max.x / original.x).min(max.y / original.y);
    original * scale
}

/// UV rect cropping `texture` to its centered square, for thumbnails
pub fn cover_uv(texture: &TextureHandle) -> egui::Rect {
    let size = texture.size_vec2();
    if size.x > size.y {
        let inset = (1.0 - size.y / size.x) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let inset = (1.0 - size.x / size.y) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    }
}
