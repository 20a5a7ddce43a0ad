use crate::domain::like::{
    errors::StoreError,
    record::{IdentityKey, LikeRecord},
    repository::{CreateOutcome, LikeStore},
};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;

/// Stores every like as one field of a single Redis hash, keyed by identity.
/// `HSETNX` gives create-if-absent and `HLEN` is the count.
pub struct RedisLikeStore {
    conn: ConnectionManager,
    collection: String,
}

impl RedisLikeStore {
    pub async fn connect(
        client: Client,
        collection: impl Into<String>,
        connect_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let conn = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| anyhow::anyhow!("Redis connection timed out"))??;
        Ok(Self {
            conn,
            collection: collection.into(),
        })
    }
}

#[async_trait]
impl LikeStore for RedisLikeStore {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        conn.hexists(&self.collection, key.as_str())
            .await
            .map_err(|e| StoreError::Infrastructure(e.to_string()))
    }

    async fn create_if_absent(&self, record: &LikeRecord) -> Result<CreateOutcome, StoreError> {
        let json = serde_json::to_string(record).map_err(|e| StoreError::CorruptRecord {
            key: record.identity_key.to_string(),
            reason: e.to_string(),
        })?;
        let mut conn = self.conn.clone();
        let created: bool = conn
            .hset_nx(&self.collection, record.identity_key.as_str(), json)
            .await
            .map_err(|e| StoreError::Infrastructure(e.to_string()))?;
        Ok(if created {
            CreateOutcome::Created
        } else {
            CreateOutcome::AlreadyExists
        })
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.hlen(&self.collection)
            .await
            .map_err(|e| StoreError::Infrastructure(e.to_string()))
    }
}
