//! Cache Reaper Task
//!
//! Background task that periodically removes cache entries older than the
//! cache TTL.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Shortest sweep period; tokio intervals reject a zero period.
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

// == Reaper Handle ==
/// Cancellation handle for a running reaper.
#[derive(Debug)]
pub struct ReaperHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl ReaperHandle {
    /// Asks the reaper to stop. It exits at its next await point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the task has returned.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Spawns the reaper for `store` on `runtime`.
///
/// The first sweep happens one `ttl` after the call and then every `ttl`.
/// Each sweep takes the store lock once and drops every entry older than
/// `ttl`, so an entry lives between `ttl` and `2 × ttl`.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let reaper = spawn_reaper(&Handle::current(), store.clone(), Duration::from_secs(5));
/// // Later:
/// reaper.cancel();
/// ```
pub fn spawn_reaper(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
) -> ReaperHandle {
    let token = CancellationToken::new();
    let cancelled = token.clone();
    let period = ttl.max(MIN_SWEEP_PERIOD);

    let join = runtime.spawn(async move {
        info!("Starting cache reaper with interval of {:?}", period);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = store.lock().await.reap(ttl);

                    if removed > 0 {
                        info!("Cache reaper: removed {} expired entries", removed);
                    } else {
                        debug!("Cache reaper: no expired entries found");
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    });

    ReaperHandle { token, join }
}
