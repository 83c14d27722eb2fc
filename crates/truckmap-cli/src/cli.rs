//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truckmap_app::ExportType;
use truckmap_types::{Coordinate, OutputFormat};

#[derive(Parser)]
#[command(name = "truckmap")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Keep a local catalog of food trucks on a map")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List trucks, newest first
    List {
        /// Case-insensitive filter on name or description
        query: Option<String>,
    },

    /// Show one truck in full
    Show {
        /// Truck ID
        id: String,
    },

    /// Add a truck
    Add {
        #[arg(long, short = 'n')]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        lat: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lng: Option<String>,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Star rating 0-5
        #[arg(long, short = 'r', default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,

        /// Photo file (repeatable). GPS tags fill in a missing location.
        #[arg(long = "photo", short = 'p')]
        photos: Vec<PathBuf>,
    },

    /// Remove a truck
    Remove {
        /// Truck ID
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export all trucks
    Export {
        /// Output file path
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// File type. Guessed from the extension if not specified.
        #[arg(long = "type", short = 't')]
        kind: Option<ExportType>,
    },

    /// Show or modify configuration
    Config {
        /// Position the "use my location" button reports, as LAT,LNG
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, conflicts_with = "clear_home")]
        set_home: Option<Coordinate>,

        /// Forget the home position
        #[arg(long)]
        clear_home: bool,

        /// Default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset configuration to defaults
        #[arg(long, conflicts_with_all = ["set_home", "clear_home", "set_output"])]
        reset: bool,
    },
}

fn parse_coordinate(text: &str) -> Result<Coordinate, String> {
    let (lat, lng) = text
        .split_once(',')
        .ok_or_else(|| "expected LAT,LNG".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude: {}", lat.trim()))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude: {}", lng.trim()))?;
    let at = Coordinate::new(lat, lng);
    if at.is_valid() {
        Ok(at)
    } else {
        Err(format!("out of range: {}", text))
    }
}
