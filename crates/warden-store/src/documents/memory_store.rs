//! In-process guild document store.
//!
//! Holds encoded documents, so every read and write goes through the same codec as
//! the Redis store. Used for local runs and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use warden_core::{DocumentStore, GuildDocument, RepoResult, Snowflake};

use crate::codec;

/// Guild document store backed by a process-local map
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<HashMap<Snowflake, Vec<u8>>>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under a guild ID, bypassing the codec
    pub fn insert_raw(&self, guild_id: Snowflake, bytes: impl Into<Vec<u8>>) {
        self.documents.lock().insert(guild_id, bytes.into());
    }

    /// Raw stored bytes for a guild ID
    #[must_use]
    pub fn raw(&self, guild_id: Snowflake) -> Option<Vec<u8>> {
        self.documents.lock().get(&guild_id).cloned()
    }

    /// Number of stored documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn exists(&self, guild_id: Snowflake) -> RepoResult<bool> {
        Ok(self.documents.lock().contains_key(&guild_id))
    }

    async fn delete(&self, guild_id: Snowflake) -> RepoResult<bool> {
        Ok(self.documents.lock().remove(&guild_id).is_some())
    }

    async fn create_if_absent(
        &self,
        guild_id: Snowflake,
        document: &GuildDocument,
    ) -> RepoResult<bool> {
        let bytes = codec::encode(document)?;
        let mut documents = self.documents.lock();
        if documents.contains_key(&guild_id) {
            return Ok(false);
        }
        documents.insert(guild_id, bytes);
        Ok(true)
    }

    async fn get(&self, guild_id: Snowflake) -> RepoResult<Option<GuildDocument>> {
        let bytes = self.raw(guild_id);
        bytes
            .as_deref()
            .map(|bytes| codec::decode(guild_id, bytes))
            .transpose()
    }

    async fn put(&self, guild_id: Snowflake, document: &GuildDocument) -> RepoResult<()> {
        let bytes = codec::encode(document)?;
        self.documents.lock().insert(guild_id, bytes);
        Ok(())
    }

    async fn put_if_revision(
        &self,
        guild_id: Snowflake,
        document: &GuildDocument,
        expected_revision: u64,
    ) -> RepoResult<bool> {
        let bytes = codec::encode(document)?;
        let mut documents = self.documents.lock();

        let Some(current) = documents.get(&guild_id) else {
            return Ok(false);
        };
        if codec::decode(guild_id, current)?.revision != expected_revision {
            return Ok(false);
        }

        documents.insert(guild_id, bytes);
        Ok(true)
    }
}
