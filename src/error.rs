//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing the expiring cache.
///
/// Lookups and stores never fail; a miss is a normal outcome.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The reaper needs a tokio runtime to run on
    #[error("no async runtime available to host the cache reaper")]
    NoRuntime,
}

// == Client Error Enum ==
/// Errors returned by the PokeAPI client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, connection refused, timeout)
    #[error("error fetching endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be configured
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// A response arrived with a status of 300 or above
    #[error("response failed with status code: {status} and body: {body}")]
    Status { status: u16, body: String },

    /// The endpoint answered 404
    #[error("resource not found: {url}")]
    NotFound { url: String, body: String },

    /// A cached or fresh body could not be parsed
    #[error("error decoding response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns true when the remote service answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// == Command Error Enum ==
/// Errors surfaced by REPL commands. None of them are fatal.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing command output failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong number of arguments
    #[error("{0}")]
    Usage(&'static str),

    #[error("you're on the first page")]
    FirstPage,

    #[error("you're on the last page")]
    LastPage,

    #[error("no location area named {0}")]
    UnknownLocation(String),

    #[error("no pokemon named {0}")]
    UnknownPokemon(String),

    #[error("you have not caught {0}")]
    NotCaught(String),
}

// == Result Type Alias ==
/// Convenience Result type for client calls.
pub type Result<T> = std::result::Result<T, ClientError>;
