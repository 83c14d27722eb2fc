//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_list, output_truck, truncate};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;
use truckmap_app::{
    export_trucks, init_logging, open_store, AppContext, Config, Event, ExportType, HeadlessMap,
    Verbosity,
};
use truckmap_domain::model::Level;
use truckmap_domain::service::{build_list_view, filter_trucks};
use truckmap_types::{Coordinate, Error, OutputFormat, Result};
use truckmap_vision::{ingest, IngestedPhoto, SelectedFile};

pub fn execute(cli: Cli) -> Result<()> {
    init_logging(if cli.verbose { Verbosity::Verbose } else { Verbosity::Normal });

    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::List { query } => cmd_list(&config, query.as_deref().unwrap_or(""), output_format),
        Commands::Show { id } => cmd_show(&config, &id, output_format),
        Commands::Add {
            name,
            lat,
            lng,
            description,
            rating,
            photos,
        } => {
            let input = AddInput {
                name,
                description,
                lat: lat.unwrap_or_default(),
                lng: lng.unwrap_or_default(),
                rating,
                photos,
            };
            cmd_add(&config, input, output_format)
        }
        Commands::Remove { id, yes } => cmd_remove(&config, &id, yes),
        Commands::Export { output, kind } => cmd_export(&config, &output, kind),
        Commands::Config {
            set_home,
            clear_home,
            set_output,
            reset,
        } => {
            let changes = ConfigChanges {
                home: if clear_home { Some(None) } else { set_home.map(Some) },
                output_format: set_output,
                reset,
            };
            cmd_config(&Config::config_path()?, changes)
        }
    }
}

#[derive(Default)]
struct ConfigChanges {
    /// `Some(None)` clears the home position
    home: Option<Option<Coordinate>>,
    output_format: Option<OutputFormat>,
    reset: bool,
}

fn cmd_config(path: &Path, changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save_to(path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(path)?;
    let mut modified = false;

    if let Some(home) = changes.home {
        config.home_location = home;
        modified = true;
    }
    if let Some(format) = changes.output_format {
        config.output_format = format;
        modified = true;
    }

    if modified {
        config.save_to(path)?;
        println!("Configuration updated");
    }
    println!("{}", config);
    Ok(())
}

fn open_context(config: &Config) -> Result<AppContext<HeadlessMap>> {
    let store = open_store(config)?;
    Ok(AppContext::new(config, store, HeadlessMap::new()))
}

/// Print whatever the last action left in the notification slot
fn report(app: &mut AppContext<HeadlessMap>) {
    if let Some(n) = app.notification(Instant::now()) {
        match n.level {
            Level::Warning => eprintln!("Warning: {}", n.message),
            Level::Info | Level::Success => eprintln!("{}", n.message),
        }
    }
}

fn cmd_list(config: &Config, query: &str, output_format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let view = build_list_view(store.all(), query);
    let trucks = filter_trucks(store.all(), query);
    output_list(output_format, &view, &trucks)
}

fn cmd_show(config: &Config, id: &str, output_format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let truck = store
        .find(id)
        .ok_or_else(|| Error::TruckNotFound(id.to_string()))?;
    output_truck(output_format, truck)
}

struct AddInput {
    name: String,
    description: String,
    lat: String,
    lng: String,
    rating: u8,
    photos: Vec<PathBuf>,
}

fn cmd_add(config: &Config, input: AddInput, output_format: OutputFormat) -> Result<()> {
    let mut app = open_context(config)?;

    app.handle(Event::OpenForm);
    if let Some(draft) = app.draft_mut() {
        draft.name = input.name;
        draft.description = input.description;
        draft.lat = input.lat;
        draft.lng = input.lng;
    }
    if input.rating > 0 {
        app.handle(Event::RatingClicked(input.rating));
    }

    if let Some(ticket) = app.request_photos() {
        for event in ingest_with_progress(&input.photos, config)
            .into_iter()
            .map(|photo| Event::PhotoIngested(ticket, photo))
        {
            app.handle(event);
            report(&mut app);
        }
    }

    app.handle(Event::SubmitForm);
    if let Some(draft) = app.draft() {
        return Err(draft.errors().into());
    }
    report(&mut app);

    match app.store().all().last() {
        Some(truck) => output_truck(output_format, truck),
        None => Ok(()),
    }
}

/// Decode photos sequentially behind a progress bar. Non-images are skipped.
fn ingest_with_progress(paths: &[PathBuf], config: &Config) -> Vec<IngestedPhoto> {
    if paths.is_empty() {
        return Vec::new();
    }

    let pb = ProgressBar::new(paths.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let photo_config = config.photo_config();
    let mut photos = Vec::new();
    for path in paths {
        pb.set_message(truncate(&file_label(path), 30));
        match SelectedFile::read(path).map_err(Error::from).and_then(|file| {
            ingest(&file, photo_config).map_err(Error::from)
        }) {
            Ok(Some(photo)) => photos.push(photo),
            Ok(None) => warn!(path = %path.display(), "not an image, skipped"),
            Err(e) => warn!(path = %path.display(), error = %e, "photo skipped"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    photos
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_remove(config: &Config, id: &str, yes: bool) -> Result<()> {
    let mut app = open_context(config)?;

    app.handle(Event::CardSelected(id.to_string()));
    let name = app
        .selected_truck()
        .map(|t| t.name.clone())
        .ok_or_else(|| Error::TruckNotFound(id.to_string()))?;

    app.handle(Event::RequestDelete);

    // Confirmation
    if !yes {
        println!("Remove \"{}\"? [y/N]", name);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        if !input.trim().eq_ignore_ascii_case("y") {
            app.handle(Event::CancelDelete);
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.handle(Event::ConfirmDelete);
    report(&mut app);
    Ok(())
}

fn cmd_export(config: &Config, output: &Path, kind: Option<ExportType>) -> Result<()> {
    let store = open_store(config)?;
    let kind = kind
        .or_else(|| ExportType::from_path(output))
        .unwrap_or_default();
    export_trucks(store.all(), kind, output)?;
    println!("Exported {} truck(s) to {} ({})", store.len(), output.display(), kind);
    Ok(())
}
