pub mod memory_like_store;
pub mod redis_like_store;
pub mod sqlx_like_store;
