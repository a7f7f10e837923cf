use super::*;

use futures::FutureExt;

#[derive(Debug)]
struct TestError {
    locked: bool,
}

impl Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.locked {
            f.write_str("database is locked")
        } else {
            f.write_str("no such table: messages")
        }
    }
}

impl Transient for TestError {
    fn is_transient(&self) -> bool {
        self.locked
    }
}

/// Fails `locked_failures` times with a lock error, then succeeds.
#[derive(Default)]
struct Flaky {
    locked_failures: u32,
    calls: u32,
}

impl Flaky {
    fn call(&mut self) -> Result<u32, TestError> {
        self.calls += 1;
        if self.calls <= self.locked_failures {
            Err(TestError { locked: true })
        } else {
            Ok(self.calls)
        }
    }
}

fn fast(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        delay: Duration::from_millis(1),
    }
}

#[test]
fn test_default_config() {
    let config = RetryConfig::default();
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.delay, Duration::from_millis(100));
}

#[test]
fn test_backoff_is_constant_and_bounded() {
    let delays: Vec<_> = fast(3).backoff().build().collect();
    assert_eq!(delays, vec![Duration::from_millis(1); 3]);

    assert_eq!(fast(0).backoff().build().count(), 0);
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let mut flaky = Flaky::default();

    let result = retry_on_locked(&fast(5), "append", &mut flaky, |f| {
        async move { f.call() }.boxed()
    })
    .await;

    assert_eq!(result.unwrap(), 1);
    assert_eq!(flaky.calls, 1);
}

#[tokio::test]
async fn test_retries_until_lock_clears() {
    let mut flaky = Flaky {
        locked_failures: 3,
        ..Default::default()
    };

    let result = retry_on_locked(&fast(5), "append", &mut flaky, |f| {
        async move { f.call() }.boxed()
    })
    .await;

    assert_eq!(result.unwrap(), 4);
    assert_eq!(flaky.calls, 4);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let mut flaky = Flaky {
        locked_failures: u32::MAX,
        ..Default::default()
    };

    let result = retry_on_locked(&fast(5), "commit", &mut flaky, |f| {
        async move { f.call() }.boxed()
    })
    .await;

    assert!(result.unwrap_err().locked);
    // Initial attempt plus five retries.
    assert_eq!(flaky.calls, 6);
}

#[tokio::test]
async fn test_zero_retries_means_single_attempt() {
    let mut flaky = Flaky {
        locked_failures: 1,
        ..Default::default()
    };

    let result = retry_on_locked(&fast(0), "begin", &mut flaky, |f| {
        async move { f.call() }.boxed()
    })
    .await;

    assert!(result.is_err());
    assert_eq!(flaky.calls, 1);
}

#[tokio::test]
async fn test_non_transient_error_is_not_retried() {
    let mut calls = 0u32;

    let result: Result<(), TestError> = retry_on_locked(&fast(5), "fetch", &mut calls, |c| {
        async move {
            *c += 1;
            Err(TestError { locked: false })
        }
        .boxed()
    })
    .await;

    assert!(!result.unwrap_err().locked);
    assert_eq!(calls, 1);
}

#[test]
fn test_is_lock_code() {
    assert!(is_lock_code("5"));
    assert!(is_lock_code("6"));
    // SQLITE_BUSY_SNAPSHOT and SQLITE_LOCKED_SHAREDCACHE
    assert!(is_lock_code("517"));
    assert!(is_lock_code("262"));

    assert!(!is_lock_code("1"));
    assert!(!is_lock_code("19"));
    assert!(!is_lock_code("SQLITE_BUSY"));
}

#[test]
fn test_is_lock_message() {
    assert!(is_lock_message("database is locked"));
    assert!(is_lock_message("database table is locked: messages"));
    assert!(is_lock_message("SQLITE_BUSY"));
    assert!(!is_lock_message("no such table: messages"));
}

#[test]
fn test_storage_error_classification() {
    assert!(StorageError::Locked.is_transient());
    assert!(!StorageError::Unavailable("closed".to_string()).is_transient());
    assert!(!StorageError::Database(sqlx::Error::RowNotFound).is_transient());
    assert!(!StorageError::Database(sqlx::Error::PoolTimedOut).is_transient());
}
