//! Redis-backed guild document store.
//!
//! One key per guild, value is the encoded `GuildDocument`. The version-checked write
//! uses WATCH/MULTI/EXEC on a single pooled connection.

use async_trait::async_trait;
use redis::AsyncCommands;
use warden_core::{DocumentStore, DomainError, GuildDocument, RepoResult, Snowflake};

use super::document_key;
use crate::codec;
use crate::pool::{RedisPool, RedisPoolError};

/// Convert a pool error into the domain's store error
pub fn map_store_error(e: RedisPoolError) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

fn map_redis_error(e: redis::RedisError) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

/// Close a connection that may still hold a WATCH instead of returning it to the pool
fn discard_watched(conn: deadpool_redis::Connection) {
    tracing::debug!("Discarding watched Redis connection");
    drop(deadpool_redis::Connection::take(conn));
}

/// Guild document store over a shared Redis pool
#[derive(Debug, Clone)]
pub struct RedisDocumentStore {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisDocumentStore {
    /// Create a new store
    #[must_use]
    pub fn new(pool: RedisPool, key_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.into(),
        }
    }

    fn key(&self, guild_id: Snowflake) -> String {
        document_key(&self.key_prefix, guild_id)
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn exists(&self, guild_id: Snowflake) -> RepoResult<bool> {
        self.pool
            .exists(&self.key(guild_id))
            .await
            .map_err(map_store_error)
    }

    async fn delete(&self, guild_id: Snowflake) -> RepoResult<bool> {
        let deleted = self
            .pool
            .delete(&self.key(guild_id))
            .await
            .map_err(map_store_error)?;

        tracing::debug!(guild_id = %guild_id, deleted, "Deleted guild document");
        Ok(deleted)
    }

    async fn create_if_absent(
        &self,
        guild_id: Snowflake,
        document: &GuildDocument,
    ) -> RepoResult<bool> {
        let bytes = codec::encode(document)?;
        self.pool
            .set_bytes_nx(&self.key(guild_id), &bytes)
            .await
            .map_err(map_store_error)
    }

    async fn get(&self, guild_id: Snowflake) -> RepoResult<Option<GuildDocument>> {
        let bytes = self
            .pool
            .get_bytes(&self.key(guild_id))
            .await
            .map_err(map_store_error)?;

        bytes
            .as_deref()
            .map(|bytes| codec::decode(guild_id, bytes))
            .transpose()
    }

    async fn put(&self, guild_id: Snowflake, document: &GuildDocument) -> RepoResult<()> {
        let bytes = codec::encode(document)?;
        self.pool
            .set_bytes(&self.key(guild_id), &bytes)
            .await
            .map_err(map_store_error)
    }

    async fn put_if_revision(
        &self,
        guild_id: Snowflake,
        document: &GuildDocument,
        expected_revision: u64,
    ) -> RepoResult<bool> {
        let key = self.key(guild_id);
        let bytes = codec::encode(document)?;
        let mut conn = self.pool.get().await.map_err(map_store_error)?;

        redis::cmd("WATCH")
            .arg(&key)
            .query_async::<()>(&mut conn)
            .await
            .map_err(map_redis_error)?;

        let current: Option<Vec<u8>> = match conn.get(&key).await {
            Ok(current) => current,
            Err(e) => {
                discard_watched(conn);
                return Err(map_redis_error(e));
            }
        };
        let stored_revision = current
            .as_deref()
            .map(|bytes| codec::decode(guild_id, bytes).map(|doc| doc.revision))
            .transpose();

        // Anything but a matching revision releases the watch before returning
        if !matches!(stored_revision, Ok(Some(revision)) if revision == expected_revision) {
            if let Err(e) = redis::cmd("UNWATCH").query_async::<()>(&mut conn).await {
                discard_watched(conn);
                return Err(map_redis_error(e));
            }
            return stored_revision.map(|_| false);
        }

        // EXEC replies nil when the watched key changed underneath us
        let committed: Option<()> = redis::pipe()
            .atomic()
            .set(&key, bytes.as_slice())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        if committed.is_none() {
            tracing::debug!(
                guild_id = %guild_id,
                expected_revision,
                "Guild document changed during conditional write"
            );
        }

        Ok(committed.is_some())
    }
}
