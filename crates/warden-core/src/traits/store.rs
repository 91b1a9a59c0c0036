//! Document store port

use async_trait::async_trait;

use crate::entities::GuildDocument;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Whole-document store keyed by guild ID.
///
/// The backing store has no partial updates: every change is a full document round trip.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether a document exists for the guild
    async fn exists(&self, guild_id: Snowflake) -> RepoResult<bool>;

    /// Delete the guild's document; returns `true` if one was removed
    async fn delete(&self, guild_id: Snowflake) -> RepoResult<bool>;

    /// Store the document only if the key is absent; returns `true` if it was written
    async fn create_if_absent(&self, guild_id: Snowflake, document: &GuildDocument)
        -> RepoResult<bool>;

    /// Fetch and decode the guild's document, `None` if the guild is unregistered
    async fn get(&self, guild_id: Snowflake) -> RepoResult<Option<GuildDocument>>;

    /// Unconditionally overwrite the guild's document
    async fn put(&self, guild_id: Snowflake, document: &GuildDocument) -> RepoResult<()>;

    /// Overwrite the document only if the stored revision equals `expected_revision`.
    ///
    /// Returns `false` when the stored document is missing or has moved on.
    async fn put_if_revision(
        &self,
        guild_id: Snowflake,
        document: &GuildDocument,
        expected_revision: u64,
    ) -> RepoResult<bool>;
}
