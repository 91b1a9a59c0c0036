//! # warden-store
//!
//! Persistence layer for guild documents.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Codec**: JSON encoding of `GuildDocument` with schema versioning
//! - **Stores**: Redis and in-memory implementations of `DocumentStore`
//!
//! ## Example
//!
//! ```ignore
//! use warden_store::{RedisDocumentStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! pool.health_check().await?;
//!
//! let store = RedisDocumentStore::new(pool, "");
//! let document = store.get(guild_id).await?;
//! ```

pub mod codec;
pub mod documents;
pub mod pool;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export store types
pub use documents::{
    document_key, map_store_error, open_store, MemoryDocumentStore, RedisDocumentStore,
};
