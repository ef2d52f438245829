//! Translate flow: resolve every deck list name into its printed name in a
//! target language, write the translation CSV and optionally a translated
//! deck list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::decklist;
use crate::error::{Error, Result};
use crate::scryfall::client::{LookupMode, ScryfallClient};
use crate::scryfall::Card;

pub const CSV_HEADER: [&str; 7] = [
    "original_name",
    "spanish_name",
    "found",
    "set",
    "collector_number",
    "lang",
    "scryfall_uri",
];

pub struct TranslateOptions {
    pub input: PathBuf,
    pub out: PathBuf,
    pub lang: String,
    pub deck_out: Option<PathBuf>,
}

async fn lookup_step(
    client: &ScryfallClient,
    mode: LookupMode,
    name: &str,
    lang: Option<&str>,
) -> Option<Card> {
    match client.fetch_named(mode, name, lang).await {
        Ok(found) => found,
        Err(e) => {
            eprintln!("[{}] Lookup failed: {}", name, e);
            None
        }
    }
}

/// Find the printed name of `name` in `lang`.
///
/// Tries a language-constrained exact lookup, then fuzzy; if neither print
/// matches the target language, resolves the card's identity without a
/// language constraint and searches for its newest print in `lang`. Returns
/// the assembled name (empty when no translation exists) and the card it
/// came from.
pub async fn translate_name(
    client: &ScryfallClient,
    name: &str,
    lang: &str,
) -> (String, Option<Card>) {
    // 1) exact lookup in the target language
    if let Some(card) = lookup_step(client, LookupMode::Exact, name, Some(lang)).await {
        let translated = card.display_name();
        if card.lang == lang && !translated.is_empty() {
            return (translated, Some(card));
        }
    }

    // 2) fuzzy lookup in the target language
    if let Some(card) = lookup_step(client, LookupMode::Fuzzy, name, Some(lang)).await {
        if card.lang == lang {
            let translated = card.display_name();
            if !translated.is_empty() {
                return (translated, Some(card));
            }
        }
    }

    // 3) resolve the identity unconstrained, then search prints in `lang`
    let base = match lookup_step(client, LookupMode::Exact, name, None).await {
        Some(card) => Some(card),
        None => lookup_step(client, LookupMode::Fuzzy, name, None).await,
    };
    if let Some(oracle_id) = base.and_then(|card| card.oracle_id) {
        match client.search_prints_by_identity(&oracle_id, lang).await {
            Ok(Some(print)) => {
                let translated = print.display_name();
                if !translated.is_empty() {
                    return (translated, Some(print));
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("[{}] Print search failed: {}", name, e),
        }
    }

    // 4) no translation available
    (String::new(), None)
}

pub async fn run_translate(client: &ScryfallClient, opts: &TranslateOptions) -> Result<()> {
    let names = decklist::parse_names(&opts.input)?;
    if names.is_empty() {
        return Err(Error::EmptyDeckList);
    }

    let total = names.len();
    let mut rows: Vec<[String; 7]> = Vec::with_capacity(total);
    let mut deck_lines: Vec<String> = Vec::with_capacity(total);

    for (idx, name) in names.iter().enumerate() {
        println!("[{}/{}] {}", idx + 1, total, name);
        let (translated, card) = translate_name(client, name, &opts.lang).await;
        let found = !translated.is_empty();
        let (set_code, collector, lang_used, uri) = match &card {
            Some(card) => (
                card.set_code.clone(),
                card.collector_number.clone(),
                card.lang.clone(),
                card.scryfall_uri.clone().unwrap_or_default(),
            ),
            None => Default::default(),
        };
        rows.push([
            name.clone(),
            translated.clone(),
            if found { "yes" } else { "no" }.to_string(),
            set_code,
            collector,
            lang_used,
            uri,
        ]);
        // unresolved names keep their original text in the deck output
        deck_lines.push(if found { translated } else { name.clone() });
    }

    write_translations(&opts.out, &rows)?;
    println!("CSV written to: {}", opts.out.display());

    if let Some(deck_path) = &opts.deck_out {
        ensure_parent(deck_path)?;
        fs::write(deck_path, deck_lines.join("\n") + "\n")?;
        println!("Translated deck written to: {}", deck_path.display());
    }
    Ok(())
}

fn write_translations(path: &Path, rows: &[[String; 7]]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
