//! Session state owned by the dispatcher: the pagination cursor and the
//! Pokedex of caught Pokemon. Nothing here outlives the process.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::error::CommandError;
use crate::pokeapi::{LocationAreaPage, Pokemon};

// == Pagination Cursor ==
/// Position in the location-area collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    next: Option<String>,
    previous: Option<String>,
    /// Set once the first page has been fetched
    started: bool,
}

impl PaginationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL for `map`. `Ok(None)` means the first page.
    ///
    /// # Errors
    /// [`CommandError::LastPage`] once the last page has been shown.
    pub fn next_page(&self) -> Result<Option<&str>, CommandError> {
        if !self.started {
            return Ok(None);
        }
        self.next
            .as_deref()
            .map(Some)
            .ok_or(CommandError::LastPage)
    }

    /// URL for `mapb`.
    ///
    /// # Errors
    /// [`CommandError::FirstPage`] when there is no earlier page.
    pub fn previous_page(&self) -> Result<&str, CommandError> {
        self.previous.as_deref().ok_or(CommandError::FirstPage)
    }

    /// Moves the cursor to the page just shown.
    pub fn advance(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

// == Caught Pokemon ==
/// A Pokedex record.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Local>,
}

// == Pokedex ==
/// Caught Pokemon by name, kept in alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch; catching the same name again replaces the record.
    pub fn add(&mut self, name: impl Into<String>, pokemon: Pokemon) {
        self.entries.insert(
            name.into(),
            CaughtPokemon {
                pokemon,
                caught_at: Local::now(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Session ==
/// Everything the REPL remembers between commands.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cursor: PaginationCursor,
    pub pokedex: Pokedex,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
