//! PokeAPI Module
//!
//! Typed access to the PokeAPI REST service through the expiring cache.
//!
//! # Endpoints
//! - `GET /location-area/` - Paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - A single Pokemon

pub mod client;
pub mod models;

pub use client::PokeClient;
pub use models::{
    LocationArea, LocationAreaPage, NamedResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
