//! Retry utilities: lock-contention backoff and transient error classification.
//!
//! SQLite reports contention as `SQLITE_BUSY`/`SQLITE_LOCKED` instead of
//! blocking. Each storage step is wrapped in [`retry_on_locked`], which
//! re-runs just that step on a fixed delay until it succeeds, fails for a
//! non-lock reason, or the retry budget runs out.

use std::fmt::Display;
use std::time::Duration;

use backon::{BackoffBuilder, ConstantBuilder};
use futures::future::BoxFuture;
use tracing::{error, warn};

use crate::interfaces::StorageError;

/// SQLite primary result code for a busy database file.
const SQLITE_BUSY: i32 = 5;
/// SQLite primary result code for a locked table.
const SQLITE_LOCKED: i32 = 6;

/// Configuration for lock-retry behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial attempt (0 = initial attempt only).
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryConfig {
    /// Constant-delay backoff yielding at most `max_retries` delays.
    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.max_retries as usize)
    }
}

/// Errors that may succeed if the same step is attempted again.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for sqlx::Error {
    fn is_transient(&self) -> bool {
        match self {
            sqlx::Error::Database(db) => {
                db.code().is_some_and(|code| is_lock_code(&code)) || is_lock_message(db.message())
            }
            _ => false,
        }
    }
}

impl Transient for StorageError {
    fn is_transient(&self) -> bool {
        match self {
            StorageError::Database(e) => e.is_transient(),
            StorageError::Locked => true,
            _ => false,
        }
    }
}

/// Whether a SQLite result code (primary or extended) is BUSY or LOCKED.
pub fn is_lock_code(code: &str) -> bool {
    code.parse::<i32>()
        .map(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
        .unwrap_or(false)
}

/// Whether a driver message describes lock contention.
pub fn is_lock_message(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("locked") || message.contains("busy")
}

/// Run `step` against `ctx`, retrying while it fails with a transient error.
///
/// Only the single step is retried; callers compose multi-step sequences
/// (begin, write, commit) out of separately retried steps. Each retry logs a
/// warning carrying the attempt number and the budget.
pub async fn retry_on_locked<C, T, E, F>(
    config: &RetryConfig,
    operation: &str,
    ctx: &mut C,
    mut step: F,
) -> Result<T, E>
where
    C: ?Sized + Send,
    E: Transient + Display,
    F: for<'c> FnMut(&'c mut C) -> BoxFuture<'c, Result<T, E>>,
{
    let mut delays = config.backoff().build();
    let mut attempt = 0u32;

    loop {
        match step(&mut *ctx).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => match delays.next() {
                Some(delay) => {
                    attempt += 1;
                    warn!(
                        operation,
                        error = %e,
                        "database is locked, retrying {}/{}",
                        attempt,
                        config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    error!(
                        operation,
                        error = %e,
                        "database still locked after {} retries",
                        config.max_retries
                    );
                    return Err(e);
                }
            },
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests;
