//! Writing the collection out as JSON, CSV or an Excel workbook

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use tracing::info;
use truckmap_domain::service::list_view::format_card_date;
use truckmap_types::{Error, Result, Truck};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportType {
    #[default]
    Json,
    Csv,
    Xlsx,
}

impl ExportType {
    /// Guess from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportType::Json => write!(f, "json"),
            ExportType::Csv => write!(f, "csv"),
            ExportType::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// One flat row per truck. Photos are counted, not embedded.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    lat: f64,
    lng: f64,
    rating: u8,
    photos: usize,
    created: String,
}

impl<'a> From<&'a Truck> for ExportRow<'a> {
    fn from(truck: &'a Truck) -> Self {
        Self {
            id: &truck.id,
            name: &truck.name,
            description: &truck.description,
            lat: truck.lat,
            lng: truck.lng,
            rating: truck.rating.value(),
            photos: truck.photos.len(),
            created: format_card_date(truck.created_at),
        }
    }
}

const HEADERS: [&str; 8] = ["ID", "Name", "Description", "Latitude", "Longitude", "Rating", "Photos", "Created"];

pub fn export_trucks(trucks: &[Truck], kind: ExportType, output_path: &Path) -> Result<()> {
    match kind {
        ExportType::Json => export_json(trucks, output_path)?,
        ExportType::Csv => export_csv(trucks, output_path)?,
        ExportType::Xlsx => export_xlsx(trucks, output_path)?,
    }
    info!(path = %output_path.display(), count = trucks.len(), %kind, "exported trucks");
    Ok(())
}

/// Same format the store persists, photos included
fn export_json(trucks: &[Truck], output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, trucks)?;
    writer.flush()?;
    Ok(())
}

fn export_csv(trucks: &[Truck], output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .map_err(|e| Error::Export(e.to_string()))?;
    writer
        .write_record(HEADERS)
        .map_err(|e| Error::Export(e.to_string()))?;
    for truck in trucks {
        writer
            .serialize(ExportRow::from(truck))
            .map_err(|e| Error::Export(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn export_xlsx(trucks: &[Truck], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_trucks_sheet(sheet, trucks)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Export(e.to_string()))?;
    Ok(())
}

fn write_trucks_sheet(sheet: &mut Worksheet, trucks: &[Truck]) -> Result<()> {
    sheet
        .set_name("Trucks")
        .map_err(|e| Error::Export(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    for (i, truck) in trucks.iter().enumerate() {
        let row = (i + 1) as u32;
        let r = ExportRow::from(truck);
        sheet
            .write_string(row, 0, r.id)
            .and_then(|s| s.write_string(row, 1, r.name))
            .and_then(|s| s.write_string(row, 2, r.description))
            .and_then(|s| s.write_number(row, 3, r.lat))
            .and_then(|s| s.write_number(row, 4, r.lng))
            .and_then(|s| s.write_number(row, 5, r.rating as f64))
            .and_then(|s| s.write_number(row, 6, r.photos as f64))
            .and_then(|s| s.write_string(row, 7, &r.created))
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    sheet
        .set_column_width(2, 40)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}
