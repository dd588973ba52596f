//! Pokedex - An interactive PokeAPI client
//!
//! Pages through location areas, explores them and catches Pokemon. Every
//! request goes through an expiring read-through cache.

use std::io;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::Session;
use pokedex::{Cache, Config, Dispatcher, PokeClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the expiring cache, which starts its reaper
/// 4. Build the PokeAPI client and the dispatcher
/// 5. Run the REPL on stdin/stdout until `exit` or end of input
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: api_base_url={}, cache_ttl={}ms, request_timeout={}s",
        config.api_base_url, config.cache_ttl_ms, config.request_timeout_secs
    );

    let cache = Arc::new(Cache::new(config.cache_ttl()).context("failed to create cache")?);
    let client = PokeClient::new(&config, cache.clone()).context("failed to build HTTP client")?;
    let mut dispatcher = Dispatcher::new(client, Session::new());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    dispatcher
        .run(stdin, &mut stdout)
        .await
        .context("terminal I/O failed")?;

    let stats = cache.stats().await;
    debug!(
        "Cache stats: hits={}, misses={}, stores={}, reaped={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.stores,
        stats.reaped,
        stats.hit_rate()
    );
    cache.shutdown();

    Ok(())
}
