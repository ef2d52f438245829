//! Artwork selection and image file naming.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::scryfall::{Artwork, Card, ImageSize, ImageUris};

const MAX_SLUG_LEN: usize = 200;

/// Tried in order when the requested size is missing from an image map.
const SIZE_FALLBACK: [ImageSize; 3] = [ImageSize::Png, ImageSize::Large, ImageSize::Normal];

fn pick_from_image_uris(uris: &ImageUris, size: ImageSize) -> Option<&str> {
    std::iter::once(size)
        .chain(SIZE_FALLBACK)
        .find_map(|key| uris.get(key))
}

/// Pick the image URLs to download for a card, as (url, file-name suffix)
/// pairs. Multi-faced cards yield one pair per face that carries images,
/// suffixed `-1`, `-2`, ... An empty result means no usable image.
pub fn choose_image_urls(card: &Card, size: ImageSize) -> Vec<(String, String)> {
    match card.artwork() {
        Artwork::SingleFaced(uris) => pick_from_image_uris(uris, size)
            .map(|url| vec![(url.to_string(), String::new())])
            .unwrap_or_default(),
        Artwork::MultiFaced(faces) => faces
            .iter()
            .enumerate()
            .filter_map(|(idx, face)| {
                let uris = face.image_uris.as_ref()?;
                let url = pick_from_image_uris(uris, size)?;
                Some((url.to_string(), format!("-{}", idx + 1)))
            })
            .collect(),
        Artwork::Missing => Vec::new(),
    }
}

fn ascii_fold(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        _ => return None,
    };
    Some(folded)
}

/// Turn arbitrary text into a safe file name: accents folded to ASCII,
/// anything outside letters, digits, `_-.()` and whitespace dropped,
/// lowercased, whitespace runs collapsed to `_`, length-capped.
pub fn slug(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter_map(ascii_fold)
        .filter(|c| {
            c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '.' | '(' | ')')
        })
        .collect();

    let mut slug = kept
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Deterministic file name for a card image: printed name, language ("xx"
/// when absent), set code and collector number, slugged, plus the per-face
/// suffix and an extension taken from the source URL.
pub fn image_file_name(card: &Card, suffix: &str, url: &str) -> String {
    let printed = card
        .printed_name
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(&card.name);
    let lang = if card.lang.is_empty() { "xx" } else { &card.lang };
    let base = slug(&format!(
        "{}_{}_{}{}",
        printed, lang, card.set_code, card.collector_number
    ));
    let ext = if url.to_ascii_lowercase().contains(".png") {
        ".png"
    } else {
        ".jpg"
    };
    format!("{}{}{}", base, suffix, ext)
}

/// Write image bytes, creating missing parent directories. Overwrites any
/// existing file so re-runs stay deterministic.
pub fn save_image(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, bytes)?;
    Ok(())
}
