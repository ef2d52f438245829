//! Download flow: resolve every deck list name, save its artwork and write
//! the summary CSV.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::decklist;
use crate::error::{Error, Result};
use crate::images::{choose_image_urls, image_file_name, save_image};
use crate::scryfall::client::{resolve_card, ScryfallClient};
use crate::scryfall::ImageSize;

pub const CSV_HEADER: [&str; 7] = [
    "Nombre original",
    "Nombre Scryfall/impreso",
    "Idioma",
    "Set",
    "Número",
    "Ficheros guardados",
    "Búsqueda",
];

/// Markers written in the strategy column when a name could not be served.
pub const NOT_FOUND_MARKER: &str = "NO_ENCONTRADA";
pub const NO_IMAGE_MARKER: &str = "SIN_IMAGEN";

pub struct DownloadOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub size: ImageSize,
    pub lang: Option<String>,
    pub csv_name: String,
}

pub async fn run_download(client: &ScryfallClient, opts: &DownloadOptions) -> Result<()> {
    let names = decklist::parse_names(&opts.input)?;
    if names.is_empty() {
        return Err(Error::EmptyDeckList);
    }

    fs::create_dir_all(&opts.out_dir)?;
    println!("Cards detected: {}", names.len());

    let pb = ProgressBar::new(names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut rows: Vec<[String; 7]> = Vec::with_capacity(names.len());
    for name in &names {
        pb.println(format!("Looking up: {}", name));
        let Some((card, strategy)) = resolve_card(client, name, opts.lang.as_deref()).await
        else {
            pb.println(format!("  Not found on Scryfall: {}", name));
            rows.push(not_found_row(name));
            pb.inc(1);
            continue;
        };

        let printed_name = card
            .printed_name
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&card.name)
            .to_string();

        let images = choose_image_urls(&card, opts.size);
        if images.is_empty() {
            pb.println(format!("  Card has no image available: {}", printed_name));
            rows.push([
                name.clone(),
                printed_name,
                card.lang.clone(),
                card.set_code.clone(),
                card.collector_number.clone(),
                String::new(),
                NO_IMAGE_MARKER.to_string(),
            ]);
            pb.inc(1);
            continue;
        }

        let mut saved: Vec<String> = Vec::new();
        for (url, suffix) in &images {
            let dest = opts.out_dir.join(image_file_name(&card, suffix, url));
            match client.download_image(url).await {
                Ok(bytes) => match save_image(&dest, &bytes) {
                    Ok(()) => {
                        pb.println(format!("  Saved: {}", dest.display()));
                        saved.push(dest.to_string_lossy().into_owned());
                    }
                    Err(e) => pb.println(format!("  Failed to save {}: {}", dest.display(), e)),
                },
                Err(e) => pb.println(format!("  Failed to download {}: {}", url, e)),
            }
        }
        client.pace().await;

        rows.push([
            name.clone(),
            printed_name,
            card.lang.clone(),
            card.set_code.clone(),
            card.collector_number.clone(),
            saved.join("|"),
            strategy,
        ]);
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    let csv_path = opts.out_dir.join(&opts.csv_name);
    write_summary(&csv_path, &rows)?;
    println!("Summary CSV: {}", csv_path.display());
    Ok(())
}

fn not_found_row(name: &str) -> [String; 7] {
    [
        name.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        NOT_FOUND_MARKER.to_string(),
    ]
}

fn write_summary(path: &Path, rows: &[[String; 7]]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
