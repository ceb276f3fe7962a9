//! In-memory record store for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ev_core::domain::entities::verification_record::VerificationRecord;
use ev_core::services::verification::CodeStore;

/// Keyed in-memory store.
///
/// The write lock provides the atomic per-key upsert the service relies on.
/// Nothing is evicted proactively; expiry is checked lazily by the service.
#[derive(Default, Clone)]
pub struct InMemoryCodeStore {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<VerificationRecord>, String> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<(), String> {
        self.records.write().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_overwrites_by_email_key() {
        let store = InMemoryCodeStore::new();

        store
            .put(&VerificationRecord::new("a@b.com", 111_111, 600))
            .await
            .unwrap();
        store
            .put(&VerificationRecord::new("a@b.com", 222_222, 600))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("a@b.com").await.unwrap().unwrap().code, 222_222);
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = InMemoryCodeStore::new();
        assert!(store.get("missing@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = InMemoryCodeStore::new();

        store
            .put(&VerificationRecord::new("a@b.com", 111_111, 600))
            .await
            .unwrap();

        store.remove("a@b.com").await.unwrap();
        store.remove("a@b.com").await.unwrap();
        assert!(store.is_empty().await);
    }
}
