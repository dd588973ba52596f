//! REPL Module
//!
//! Reads commands line by line, dispatches them against the PokeAPI client,
//! and keeps the session state between commands.

pub mod catch;
pub mod commands;
pub mod input;
pub mod session;

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::CommandError;
use crate::pokeapi::PokeClient;

pub use commands::Command;
pub use input::clean_input;
pub use session::{CaughtPokemon, PaginationCursor, Pokedex, Session};

/// Prompt printed before every read.
pub const PROMPT: &str = "Pokedex > ";

/// Lifecycle of the REPL. `exit` is the only way to terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Running,
    Terminated,
}

// == Dispatcher ==
/// Command dispatcher owning the session.
#[derive(Debug)]
pub struct Dispatcher {
    client: PokeClient,
    session: Session,
    rng: StdRng,
    state: ReplState,
}

impl Dispatcher {
    /// Creates a running dispatcher with an entropy-seeded RNG.
    pub fn new(client: PokeClient, session: Session) -> Self {
        Self {
            client,
            session,
            rng: StdRng::from_entropy(),
            state: ReplState::Running,
        }
    }

    /// Replaces the RNG used for catch rolls.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &PokeClient {
        &self.client
    }

    // == Run ==
    /// Reads and dispatches lines until `exit` or end of input.
    ///
    /// Lines are decoded lossily, so malformed input is reported like any
    /// other unknown command.
    ///
    /// # Errors
    /// Only I/O failures on `input` or `out`. Command errors are printed.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut input = input;
        let mut buf = Vec::new();

        while self.state == ReplState::Running {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                writeln!(out)?;
                break;
            }
            // Invalid UTF-8 becomes U+FFFD and falls through to "Unknown command".
            let line = String::from_utf8_lossy(&buf);
            self.dispatch(&line, out).await?;
        }

        Ok(())
    }

    // == Dispatch ==
    /// Runs one line of input.
    pub async fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> io::Result<()> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(());
        };

        let Some(command) = Command::from_name(name) else {
            return writeln!(out, "Unknown command");
        };

        debug!(command = command.name(), ?args, "dispatching");
        match self.execute(command, args, out).await {
            Ok(()) => Ok(()),
            Err(CommandError::Io(err)) => Err(err),
            Err(err) => writeln!(out, "{}", err),
        }
    }

    async fn execute(
        &mut self,
        command: Command,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match command {
            Command::Help => commands::help(out),
            Command::Exit => {
                self.state = ReplState::Terminated;
                commands::exit(out)
            }
            Command::Map => commands::map_next(&self.client, &mut self.session, out).await,
            Command::MapBack => commands::map_back(&self.client, &mut self.session, out).await,
            Command::Explore => commands::explore(&self.client, args, out).await,
            Command::Catch => {
                commands::catch(&self.client, &mut self.session, &mut self.rng, args, out).await
            }
            Command::Inspect => commands::inspect(&self.session, args, out),
            Command::Pokedex => commands::pokedex(&self.session, out),
        }
    }
}
