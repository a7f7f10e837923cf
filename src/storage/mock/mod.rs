//! Mock storage implementation for testing.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;

use super::{MessageStore, Result, StorageError, StoredMessage};

#[derive(Default)]
struct Table {
    messages: Vec<StoredMessage>,
    last_id: i64,
}

/// Mock message store that keeps messages in memory.
///
/// Each operation can be switched to fail, to exercise error paths in
/// callers without a real database.
#[derive(Default)]
pub struct MockMessageStore {
    table: RwLock<Table>,
    fail_on_append: RwLock<bool>,
    fail_on_recent: RwLock<bool>,
    fail_on_clear: RwLock<bool>,
}

impl MockMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_append(&self, fail: bool) {
        *self.fail_on_append.write().await = fail;
    }

    pub async fn set_fail_on_recent(&self, fail: bool) {
        *self.fail_on_recent.write().await = fail;
    }

    pub async fn set_fail_on_clear(&self, fail: bool) {
        *self.fail_on_clear.write().await = fail;
    }

    /// All stored messages in insertion order.
    pub async fn messages(&self) -> Vec<StoredMessage> {
        self.table.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.messages.is_empty()
    }
}

#[async_trait]
impl MessageStore for MockMessageStore {
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    async fn append(&self, event_type: &str, payload: &str) -> Result<i64> {
        if *self.fail_on_append.read().await {
            return Err(StorageError::Locked);
        }
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.messages.push(StoredMessage {
            id,
            event_type: event_type.to_string(),
            payload: payload.to_string(),
            received_at: Utc::now().trunc_subsecs(3),
        });
        Ok(id)
    }

    async fn recent(&self, limit: NonZeroU32) -> Result<Vec<StoredMessage>> {
        if *self.fail_on_recent.read().await {
            return Err(StorageError::Unavailable("mock recent failure".to_string()));
        }
        let mut messages = self.table.read().await.messages.clone();
        messages.sort_by(|a, b| {
            b.received_at
                .cmp(&a.received_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        messages.truncate(limit.get() as usize);
        Ok(messages)
    }

    async fn clear_all(&self) -> Result<u64> {
        if *self.fail_on_clear.read().await {
            return Err(StorageError::Unavailable("mock clear failure".to_string()));
        }
        let mut table = self.table.write().await;
        let removed = table.messages.len() as u64;
        table.messages.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;
