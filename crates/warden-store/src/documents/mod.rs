//! Guild document stores.
//!
//! - `RedisDocumentStore`: one Redis key per guild
//! - `MemoryDocumentStore`: process-local map with the same encoding

mod memory_store;
mod redis_store;

use std::sync::Arc;

use warden_common::{AppConfig, StoreBackend};
use warden_core::{DocumentStore, Snowflake};

use crate::pool::{RedisPool, RedisResult};

pub use memory_store::MemoryDocumentStore;
pub use redis_store::{map_store_error, RedisDocumentStore};

/// Store key for a guild's document
pub fn document_key(key_prefix: &str, guild_id: Snowflake) -> String {
    format!("{key_prefix}{guild_id}")
}

/// Open the configured document store.
///
/// For Redis this builds the pool and pings the server once; a failure here means the
/// process should not start.
pub async fn open_store(config: &AppConfig) -> RedisResult<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; guild data will not persist");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::Redis => {
            let pool = RedisPool::from_config(&config.redis)?;
            pool.health_check().await?;
            tracing::info!(key_prefix = %config.store.key_prefix, "Redis document store ready");
            Ok(Arc::new(RedisDocumentStore::new(
                pool,
                config.store.key_prefix.clone(),
            )))
        }
    }
}
