//! REPL commands
//!
//! The command table and one handler per command. Handlers receive the
//! client and session explicitly and write their output to `out`.

use std::io::Write;

use rand::RngCore;
use tracing::debug;

use super::catch::{attempt_catch, catch_chance};
use super::session::Session;
use crate::error::{ClientError, CommandError};
use crate::pokeapi::{LocationAreaPage, PokeClient};

// == Command Table ==
/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Table order, as listed by `help`.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next 20 map areas",
            Command::MapBack => "Displays the previous 20 map areas",
            Command::Explore => "Displays pokemon in the location area",
            Command::Catch => "Attempt to catch the specified Pokemon",
            Command::Inspect => "Shows the details of a caught Pokemon",
            Command::Pokedex => "Lists every Pokemon you have caught",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|command| command.name() == name)
    }
}

// == Handlers ==

pub fn help(out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in Command::ALL {
        writeln!(out, "{}: {}", command.name(), command.description())?;
    }
    Ok(())
}

pub fn exit(out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "Closing the Pokedex... Goodbye!")?;
    Ok(())
}

/// `map`: shows the next page of location areas.
pub async fn map_next(
    client: &PokeClient,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let url = session.cursor.next_page()?.map(str::to_string);
    let page = client.location_areas(url.as_deref()).await?;
    show_page(session, &page, out)
}

/// `mapb`: shows the previous page of location areas.
pub async fn map_back(
    client: &PokeClient,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let url = session.cursor.previous_page()?.to_string();
    let page = client.location_areas(Some(&url)).await?;
    show_page(session, &page, out)
}

fn show_page(
    session: &mut Session,
    page: &LocationAreaPage,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    session.cursor.advance(page);
    Ok(())
}

/// `explore <area>`: lists the Pokemon encountered in an area.
pub async fn explore(
    client: &PokeClient,
    args: &[String],
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = single_arg(args, "Please provide one location to explore")?;
    writeln!(out, "Exploring {}...", name)?;

    let area = client
        .location_area(name)
        .await
        .map_err(|err| not_found_as(err, || CommandError::UnknownLocation(name.to_string())))?;

    writeln!(out, "Found Pokemon:")?;
    for encounter in &area.pokemon_encounters {
        writeln!(out, " - {}", encounter.pokemon.name)?;
    }
    Ok(())
}

/// `catch <pokemon>`: rolls for the Pokemon and records it on success.
pub async fn catch(
    client: &PokeClient,
    session: &mut Session,
    rng: &mut dyn RngCore,
    args: &[String],
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let name = single_arg(args, "Please provide one Pokemon to catch")?;
    writeln!(out, "Throwing a Pokeball at {}...", name)?;

    let pokemon = client
        .pokemon(name)
        .await
        .map_err(|err| not_found_as(err, || CommandError::UnknownPokemon(name.to_string())))?;

    let base_experience = pokemon.base_experience.unwrap_or(0);
    let chance = catch_chance(base_experience);
    writeln!(out, "Catch chance: {:.0}%", chance * 100.0)?;
    if !attempt_catch(base_experience, rng) {
        debug!(name, base_experience, "catch failed");
        writeln!(out, "{} escaped!", name)?;
        return Ok(());
    }

    writeln!(out, "{} was caught!", name)?;
    writeln!(out, "You may now inspect it with the inspect command.")?;
    session.pokedex.add(name, pokemon);
    Ok(())
}

/// `inspect <pokemon>`: prints a caught Pokemon's details.
pub fn inspect(session: &Session, args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
    let name = single_arg(args, "Please provide one Pokemon to inspect")?;
    let caught = session
        .pokedex
        .get(name)
        .ok_or_else(|| CommandError::NotCaught(name.to_string()))?;
    let pokemon = &caught.pokemon;

    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    writeln!(out, "Caught at: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S"))?;
    Ok(())
}

/// `pokedex`: lists caught Pokemon alphabetically.
pub fn pokedex(session: &Session, out: &mut dyn Write) -> Result<(), CommandError> {
    if session.pokedex.is_empty() {
        writeln!(out, "Your Pokedex is empty. Go catch some Pokemon!")?;
        return Ok(());
    }

    writeln!(out, "Your Pokedex:")?;
    for name in session.pokedex.names() {
        writeln!(out, " - {}", name)?;
    }
    Ok(())
}

fn single_arg<'a>(args: &'a [String], usage: &'static str) -> Result<&'a str, CommandError> {
    match args {
        [only] => Ok(only.as_str()),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn not_found_as(err: ClientError, translate: impl FnOnce() -> CommandError) -> CommandError {
    if err.is_not_found() {
        translate()
    } else {
        err.into()
    }
}
