//! Decode, resize and re-encode selected photos

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::{debug, warn};
use truckmap_types::{Coordinate, PhotoError};

use crate::exif_reader::gps_location;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Output limits for stored photos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoConfig {
    /// Longest allowed edge in pixels
    pub max_edge: u32,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_edge: 800,
            quality: 70,
        }
    }
}

/// A file picked by the user, read into memory
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn read(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            bytes: std::fs::read(path)?,
        })
    }
}

/// A photo ready to be appended to a draft
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedPhoto {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    /// GPS position from EXIF, if the source carried one
    pub location: Option<Coordinate>,
}

/// Whether the file looks like an image, by content first and extension second
pub fn is_image(file: &SelectedFile) -> bool {
    if image::guess_format(&file.bytes).is_ok() {
        return true;
    }
    Path::new(&file.name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Scale `(width, height)` so the longer edge is at most `max_edge`.
/// Never upscales; each side stays at least one pixel.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let max_edge = max_edge.max(1);
    let longer = width.max(height);
    if longer <= max_edge || longer == 0 {
        return (width, height);
    }
    let scale = max_edge as f64 / longer as f64;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_edge);
    (scaled(width), scaled(height))
}

/// Process one file. `Ok(None)` means it was not an image and is skipped.
pub fn ingest(file: &SelectedFile, config: PhotoConfig) -> Result<Option<IngestedPhoto>, PhotoError> {
    if !is_image(file) {
        debug!(name = %file.name, "skipping non-image file");
        return Ok(None);
    }

    let img = image::load_from_memory(&file.bytes).map_err(PhotoError::Decode)?;
    let (width, height) = fit_within(img.width(), img.height(), config.max_edge);
    let resized = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let rgb = resized.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, config.quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(PhotoError::Encode)?;

    debug!(
        name = %file.name,
        width,
        height,
        bytes = buf.len(),
        "photo ingested"
    );

    Ok(Some(IngestedPhoto {
        data_url: format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&buf)),
        width,
        height,
        location: gps_location(&file.bytes),
    }))
}

/// Ingest files one at a time, in order, reading each only when its turn comes.
/// Unreadable and undecodable files are logged and skipped.
pub fn ingest_paths(
    paths: Vec<PathBuf>,
    config: PhotoConfig,
) -> impl Iterator<Item = IngestedPhoto> {
    paths.into_iter().filter_map(move |path| {
        let file = match SelectedFile::read(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read selected file");
                return None;
            }
        };
        match ingest(&file, config) {
            Ok(photo) => photo,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot process photo");
                None
            }
        }
    })
}

/// Bytes of a base64 data URL (or bare base64 string)
pub fn decode_data_url(data: &str) -> Option<Vec<u8>> {
    let payload = match data.split_once(',') {
        Some((_, payload)) => payload,
        None => data,
    };
    STANDARD.decode(payload).ok()
}
