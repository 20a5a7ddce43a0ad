use super::errors::StoreError;
use super::record::{IdentityKey, LikeRecord};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Document store holding at most one `LikeRecord` per identity.
///
/// The like count is always `count_all()`, the size of the collection. There is
/// no separate counter to fall out of step with the records.
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError>;

    /// Insert `record` only if no record exists under its key. Must never
    /// overwrite an existing record.
    async fn create_if_absent(&self, record: &LikeRecord) -> Result<CreateOutcome, StoreError>;

    async fn count_all(&self) -> Result<u64, StoreError>;
}
