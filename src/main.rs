use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use deckfetch::download::{run_download, DownloadOptions};
use deckfetch::scryfall::client::ScryfallClient;
use deckfetch::scryfall::ImageSize;
use deckfetch::translate::{run_translate, TranslateOptions};

/// Fetch Magic card artwork and translations from the Scryfall API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download card images for every name in a deck list
    Download {
        /// Path to the deck list file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory where images and the summary CSV are saved
        #[arg(short, long, default_value = "cards_images")]
        out: PathBuf,

        /// Scryfall image size to download
        #[arg(short, long, value_enum, default_value_t = ImageSize::Normal)]
        size: ImageSize,

        /// Preferred print language, for example es, en, fr
        #[arg(short, long, default_value = "es")]
        lang: String,

        /// File name of the summary CSV inside the output directory
        #[arg(long, default_value = "download_summary.csv")]
        csv: String,
    },
    /// Translate a deck list into a target language
    Translate {
        /// Path to the deck list file
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the translations CSV
        #[arg(short, long, default_value = "traducciones.csv")]
        out: PathBuf,

        /// Target language code
        #[arg(short, long, default_value = "es")]
        lang: String,

        /// Optional path for the translated deck list (TXT)
        #[arg(long)]
        deck_out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let client = ScryfallClient::new();

    let result = match args.command {
        Commands::Download {
            input,
            out,
            size,
            lang,
            csv,
        } => {
            run_download(
                &client,
                &DownloadOptions {
                    input,
                    out_dir: out,
                    size,
                    lang: Some(lang),
                    csv_name: csv,
                },
            )
            .await
        }
        Commands::Translate {
            input,
            out,
            lang,
            deck_out,
        } => {
            run_translate(
                &client,
                &TranslateOptions {
                    input,
                    out,
                    lang,
                    deck_out,
                },
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
