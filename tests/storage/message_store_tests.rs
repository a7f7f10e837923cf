//! MessageStore interface tests.
//!
//! These tests verify the contract of the MessageStore trait.
//! Each storage implementation should run these tests.

use std::num::NonZeroU32;

use chirpstack_receiver::storage::MessageStore;

pub fn n(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("limit must be positive")
}

async fn reset<S: MessageStore>(store: &S) {
    store.clear_all().await.expect("clear should succeed");
}

// =============================================================================
// MessageStore::recent tests
// =============================================================================

pub async fn test_recent_on_empty_store<S: MessageStore>(store: &S) {
    reset(store).await;

    for limit in [1, 5, 100] {
        let recent = store.recent(n(limit)).await.expect("recent should succeed");
        assert!(recent.is_empty(), "empty store should return no rows");
    }
}

pub async fn test_recent_returns_at_most_n<S: MessageStore>(store: &S) {
    reset(store).await;
    for i in 0..7 {
        store
            .append("up", &format!(r#"{{"fCnt":{}}}"#, i))
            .await
            .expect("append should succeed");
    }

    assert_eq!(store.recent(n(3)).await.unwrap().len(), 3);
    assert_eq!(store.recent(n(7)).await.unwrap().len(), 7);
    assert_eq!(store.recent(n(50)).await.unwrap().len(), 7);
}

pub async fn test_recent_newest_first<S: MessageStore>(store: &S) {
    reset(store).await;
    let mut ids = Vec::new();
    for token in ["up", "join", "ack", "status"] {
        ids.push(store.append(token, "{}").await.expect("append should succeed"));
    }

    let recent = store.recent(n(10)).await.unwrap();

    let tokens: Vec<_> = recent.iter().map(|m| m.event_type.as_str()).collect();
    assert_eq!(tokens, vec!["status", "ack", "join", "up"]);
    for pair in recent.windows(2) {
        assert!(pair[0].received_at >= pair[1].received_at);
        assert!(pair[0].id > pair[1].id, "ties must break by descending id");
    }
    ids.reverse();
    assert_eq!(recent.iter().map(|m| m.id).collect::<Vec<_>>(), ids);
}

pub async fn test_recent_preserves_payload<S: MessageStore>(store: &S) {
    reset(store).await;
    let payload = r#"{"deviceInfo":{"devEui":"AA","deviceName":"O'Brien's sensor"},"data":"AQID"}"#;

    store.append("up", payload).await.unwrap();

    let recent = store.recent(n(1)).await.unwrap();
    assert_eq!(recent[0].event_type, "up");
    assert_eq!(recent[0].payload, payload);
}

// =============================================================================
// MessageStore::append tests
// =============================================================================

pub async fn test_append_ids_strictly_increase<S: MessageStore>(store: &S) {
    reset(store).await;

    let mut last = 0;
    for _ in 0..5 {
        let id = store.append("log", "{}").await.expect("append should succeed");
        assert!(id > last, "id {} should exceed {}", id, last);
        last = id;
    }
}

// =============================================================================
// MessageStore::clear_all / init tests
// =============================================================================

pub async fn test_clear_all_empties_store<S: MessageStore>(store: &S) {
    reset(store).await;
    store.append("up", "{}").await.unwrap();
    store.append("join", "{}").await.unwrap();

    let removed = store.clear_all().await.expect("clear should succeed");

    assert_eq!(removed, 2);
    for limit in [1, 10] {
        assert!(store.recent(n(limit)).await.unwrap().is_empty());
    }

    store.append("up", "{}").await.unwrap();
    assert_eq!(store.recent(n(10)).await.unwrap().len(), 1);
}

pub async fn test_init_is_idempotent<S: MessageStore>(store: &S) {
    reset(store).await;
    store.append("location", "{}").await.unwrap();

    store.init().await.expect("second init should succeed");
    store.init().await.expect("third init should succeed");

    let recent = store.recent(n(10)).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].event_type, "location");
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all MessageStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_message_store_tests {
    ($store:expr) => {
        use $crate::storage::message_store_tests::*;

        test_recent_on_empty_store($store).await;
        println!("  test_recent_on_empty_store: PASSED");

        test_recent_returns_at_most_n($store).await;
        println!("  test_recent_returns_at_most_n: PASSED");

        test_recent_newest_first($store).await;
        println!("  test_recent_newest_first: PASSED");

        test_recent_preserves_payload($store).await;
        println!("  test_recent_preserves_payload: PASSED");

        test_append_ids_strictly_increase($store).await;
        println!("  test_append_ids_strictly_increase: PASSED");

        test_clear_all_empties_store($store).await;
        println!("  test_clear_all_empties_store: PASSED");

        test_init_is_idempotent($store).await;
        println!("  test_init_is_idempotent: PASSED");
    };
}
