//! Pokedex - An interactive PokeAPI client
//!
//! Pages through location areas, explores them and catches Pokemon. Every
//! request goes through an expiring read-through cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod pokeapi;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use pokeapi::PokeClient;
pub use repl::Dispatcher;
