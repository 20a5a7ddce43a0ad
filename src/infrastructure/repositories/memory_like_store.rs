use crate::domain::like::{
    errors::StoreError,
    record::{IdentityKey, LikeRecord},
    repository::{CreateOutcome, LikeStore},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store with the same create-if-absent semantics as the
/// remote backends.
#[derive(Default)]
pub struct MemoryLikeStore {
    records: RwLock<HashMap<IdentityKey, LikeRecord>>,
}

impl MemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = LikeRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.identity_key.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn records(&self) -> Vec<LikeRecord> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.identity_key.cmp(&b.identity_key));
        records
    }
}

#[async_trait]
impl LikeStore for MemoryLikeStore {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn create_if_absent(&self, record: &LikeRecord) -> Result<CreateOutcome, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.identity_key) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        records.insert(record.identity_key.clone(), record.clone());
        Ok(CreateOutcome::Created)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }
}
