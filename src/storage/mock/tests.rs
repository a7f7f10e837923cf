use super::*;

fn n(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap()
}

#[tokio::test]
async fn test_mock_append_and_recent() {
    let store = MockMessageStore::new();

    let first = store.append("up", r#"{"fPort":1}"#).await.unwrap();
    let second = store.append("join", r#"{"devAddr":"01"}"#).await.unwrap();

    assert_eq!((first, second), (1, 2));
    let recent = store.recent(n(5)).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, second);
    assert_eq!(recent[1].event_type, "up");
}

#[tokio::test]
async fn test_mock_recent_respects_limit() {
    let store = MockMessageStore::new();
    for _ in 0..4 {
        store.append("status", "{}").await.unwrap();
    }

    let recent = store.recent(n(2)).await.unwrap();
    assert_eq!(recent.iter().map(|m| m.id).collect::<Vec<_>>(), vec![4, 3]);
}

#[tokio::test]
async fn test_mock_clear_keeps_ids_increasing() {
    let store = MockMessageStore::new();
    store.append("up", "{}").await.unwrap();

    assert_eq!(store.clear_all().await.unwrap(), 1);
    assert!(store.is_empty().await);
    assert_eq!(store.append("up", "{}").await.unwrap(), 2);
}

#[tokio::test]
async fn test_mock_failure_injection() {
    let store = MockMessageStore::new();

    store.set_fail_on_append(true).await;
    assert!(store.append("up", "{}").await.is_err());
    assert_eq!(store.len().await, 0);
    store.set_fail_on_append(false).await;
    store.append("up", "{}").await.unwrap();

    store.set_fail_on_recent(true).await;
    assert!(store.recent(n(1)).await.is_err());

    store.set_fail_on_clear(true).await;
    assert!(store.clear_all().await.is_err());
    assert_eq!(store.len().await, 1);
}
