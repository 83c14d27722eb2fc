//! Output formatting module

use truckmap_domain::service::{build_detail_view, ListView};
use truckmap_types::{OutputFormat, Result, Truck};

/// Width of the name column in list tables
const NAME_WIDTH: usize = 28;

pub fn output_list(output_format: OutputFormat, view: &ListView<'_>, trucks: &[&Truck]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(trucks)?);
        return Ok(());
    }

    println!("{}", view.count_label);
    if let Some(empty) = view.empty {
        println!("\n{}", empty.message());
        return Ok(());
    }

    println!();
    println!("{:<36}  {:<width$}  {:<5}  {:<12}", "ID", "Name", "Stars", "Added", width = NAME_WIDTH);
    println!("{}", "-".repeat(36 + NAME_WIDTH + 5 + 12 + 6));
    for card in &view.cards {
        println!(
            "{:<36}  {:<width$}  {:<5}  {:<12}",
            card.id,
            truncate(card.name, NAME_WIDTH),
            card.rating_glyphs,
            card.date,
            width = NAME_WIDTH
        );
        if !card.excerpt.is_empty() {
            println!("{:<36}  {}", "", card.excerpt);
        }
    }

    Ok(())
}

pub fn output_truck(output_format: OutputFormat, truck: &Truck) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(truck)?);
        return Ok(());
    }

    let view = build_detail_view(truck);
    println!("\n{}", view.name);
    println!("{}", "=".repeat(view.name.chars().count().max(8)));
    println!("Rating:      {}", view.stars);
    println!("Location:    {}", view.coordinate);
    println!("Added:       {}", view.date);
    println!("Photos:      {}", view.photos.len());
    println!("ID:          {}", view.id);
    if !view.description.is_empty() {
        println!("\n{}", view.description);
    }

    Ok(())
}

/// Cut to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
