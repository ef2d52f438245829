//! deckfetch: resolve deck list card names against the Scryfall API,
//! download card artwork and translate printed names.
//!
//! Modules:
//! - `decklist`: deck list line parsing and name normalization
//! - `scryfall`: API data model and the paced HTTP client
//! - `images`: artwork selection and image file naming
//! - `download` / `translate`: the two end-to-end flows
//! - `error`: crate-wide error type

pub mod decklist;
pub mod download;
pub mod error;
pub mod images;
pub mod scryfall;
pub mod translate;

pub use error::{Error, Result};
