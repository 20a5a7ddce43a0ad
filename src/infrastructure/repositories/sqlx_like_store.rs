use crate::domain::like::{
    errors::StoreError,
    record::{IdentityKey, LikeRecord},
    repository::{CreateOutcome, LikeStore},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Postgres-backed store. The `identity_key` primary key is what makes the
/// insert conditional.
pub struct SqlxLikeStore {
    pub pool: PgPool,
}

impl SqlxLikeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for SqlxLikeStore {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE identity_key = $1)",
        )
        .bind(key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Infrastructure(e.to_string()))?;
        Ok(exists)
    }

    async fn create_if_absent(&self, record: &LikeRecord) -> Result<CreateOutcome, StoreError> {
        let result = sqlx::query(
            "INSERT INTO likes (identity_key, display_name, contact_address, avatar_url, liked_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (identity_key) DO NOTHING",
        )
        .bind(record.identity_key.as_str())
        .bind(&record.display_name)
        .bind(&record.contact_address)
        .bind(record.avatar_url.as_deref())
        .bind(record.liked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Infrastructure(e.to_string()))?;

        if result.rows_affected() == 1 {
            Ok(CreateOutcome::Created)
        } else {
            Ok(CreateOutcome::AlreadyExists)
        }
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Infrastructure(e.to_string()))?;
        Ok(count.max(0) as u64)
    }
}
