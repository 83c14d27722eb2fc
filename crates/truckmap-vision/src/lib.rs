//! Photo ingestion for truck entries
//!
//! Selected files are sniffed, decoded, shrunk so the longer edge fits a fixed
//! maximum and re-encoded as JPEG data URLs. Storage cost per photo is bounded
//! regardless of the source resolution.

pub mod exif_reader;
pub mod photo;

pub use exif_reader::gps_location;
pub use photo::{
    decode_data_url, fit_within, ingest, ingest_paths, is_image, IngestedPhoto, PhotoConfig,
    SelectedFile,
};
