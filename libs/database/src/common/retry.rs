//! Backoff for reaching the database at startup.
//!
//! In containers the API often boots before PostgreSQL accepts connections.
//! `connect_from_config_with_retry` wraps the first connect in
//! [`retry_with_backoff`] so a slow database delays startup instead of
//! failing it.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// How long startup keeps knocking before giving up
///
/// The default schedule waits 200, 400, 800, 1600 and 3200ms (each scaled by
/// jitter), roughly six seconds in total.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    /// Ceiling for a single wait
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Scale each wait by a random factor in [0.5, 1.0] so replicas
    /// restarted together do not reconnect in lockstep
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Un-jittered waits between attempts, one per retry
    pub fn schedule(&self) -> impl Iterator<Item = u64> + '_ {
        let mut next = self.initial_delay_ms.min(self.max_delay_ms);
        (0..self.max_retries).map(move |_| {
            let current = next;
            next = ((next as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms);
            current
        })
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or the schedule in `config` runs out
///
/// Returns the last error when every attempt failed.
///
/// ```ignore
/// use database::common::{RetryConfig, retry_with_backoff};
///
/// let db = retry_with_backoff(
///     || database::sql::connect(&url),
///     RetryConfig::new().with_max_retries(10),
/// )
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let total = config.max_retries + 1;
    let mut waits = config.schedule();
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "Database reachable after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(wait) = waits.next() else {
            warn!(attempts = total, error = %error, "Giving up on database");
            return Err(error);
        };
        let wait = if config.use_jitter { apply_jitter(wait) } else { wait };

        warn!(
            attempt,
            total,
            retry_in_ms = wait,
            error = %error,
            "Database not reachable yet"
        );
        tokio::time::sleep(Duration::from_millis(wait)).await;
        attempt += 1;
    }
}

fn apply_jitter(delay: u64) -> u64 {
    let factor: f64 = rand::thread_rng().gen_range(0.5..=1.0);
    (delay as f64 * factor) as u64
}
