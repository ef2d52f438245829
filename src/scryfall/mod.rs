//! Scryfall data model.
//!
//! Only the fields this tool consumes are deserialized; everything else in
//! the API response is ignored.

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

pub mod client;

/// Image sizes offered by Scryfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ImageSize {
    Small,
    Normal,
    Large,
    Png,
    ArtCrop,
    BorderCrop,
}

impl ImageSize {
    pub fn as_key(&self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Normal => "normal",
            ImageSize::Large => "large",
            ImageSize::Png => "png",
            ImageSize::ArtCrop => "art_crop",
            ImageSize::BorderCrop => "border_crop",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

impl ImageUris {
    /// URL for the given size, treating empty strings as absent.
    pub fn get(&self, size: ImageSize) -> Option<&str> {
        let url = match size {
            ImageSize::Small => &self.small,
            ImageSize::Normal => &self.normal,
            ImageSize::Large => &self.large,
            ImageSize::Png => &self.png,
            ImageSize::ArtCrop => &self.art_crop,
            ImageSize::BorderCrop => &self.border_crop,
        };
        url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One printed side of a multi-faced card.
#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    pub name: String,
    pub printed_name: Option<String>,
    pub image_uris: Option<ImageUris>,
}

/// A card object returned by the Scryfall API.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub object: String,
    pub name: String,
    pub printed_name: Option<String>,
    #[serde(default)]
    pub lang: String,
    #[serde(rename = "set", default)]
    pub set_code: String,
    #[serde(default)]
    pub collector_number: String,
    pub oracle_id: Option<String>,
    pub scryfall_uri: Option<String>,
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

/// Where a card's artwork lives: one image map at the top level, one map
/// per face, or nowhere.
pub enum Artwork<'a> {
    SingleFaced(&'a ImageUris),
    MultiFaced(&'a [CardFace]),
    Missing,
}

impl Card {
    /// Top-level images win over per-face images, matching how Scryfall
    /// lays out split cards versus double-faced cards.
    pub fn artwork(&self) -> Artwork<'_> {
        if let Some(uris) = &self.image_uris {
            Artwork::SingleFaced(uris)
        } else if !self.card_faces.is_empty() {
            Artwork::MultiFaced(&self.card_faces)
        } else {
            Artwork::Missing
        }
    }

    /// Printed name in the card's own language.
    ///
    /// Multi-faced cards are joined with " // ", each face falling back to
    /// its canonical name when no printed name exists. Single-faced cards
    /// without a printed name fall back to the canonical card name.
    pub fn display_name(&self) -> String {
        if let Some(printed) = self.printed_name.as_deref().filter(|p| !p.is_empty()) {
            return printed.to_string();
        }
        if !self.card_faces.is_empty() {
            let parts: Vec<&str> = self
                .card_faces
                .iter()
                .map(|face| {
                    face.printed_name
                        .as_deref()
                        .filter(|p| !p.is_empty())
                        .unwrap_or(&face.name)
                })
                .filter(|p| !p.is_empty())
                .collect();
            return parts.join(" // ");
        }
        self.name.clone()
    }
}

/// List envelope returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchList {
    pub object: String,
    #[serde(default)]
    pub data: Vec<Card>,
}
