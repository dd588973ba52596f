//! Background Tasks Module
//!
//! Contains the tasks that run alongside the REPL.
//!
//! # Tasks
//! - Reaper: removes expired cache entries once per cache TTL

mod reaper;

pub use reaper::{spawn_reaper, ReaperHandle};
