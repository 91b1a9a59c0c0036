//! Service context - dependency container for services
//!
//! Holds the document store, the gateway client, and the record mutator that every
//! handler and command shares.

use std::sync::Arc;

use warden_common::AppConfig;
use warden_core::{DocumentStore, GatewayClient, GuildDocument, Snowflake, DEFAULT_PREFIX};

use super::error::{ServiceError, ServiceResult};
use super::mutator::RecordMutator;

/// Service context containing all dependencies
///
/// Built once at startup and cloned into every event task.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn DocumentStore>,
    gateway: Arc<dyn GatewayClient>,
    mutator: Arc<RecordMutator>,
    owner_ids: Arc<[Snowflake]>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        store: Arc<dyn DocumentStore>,
        gateway: Arc<dyn GatewayClient>,
        default_prefix: impl Into<String>,
        owner_ids: Vec<Snowflake>,
        mutation_attempts: u32,
    ) -> Self {
        let mutator = RecordMutator::new(Arc::clone(&store), default_prefix, mutation_attempts);
        Self {
            store,
            gateway,
            mutator: Arc::new(mutator),
            owner_ids: owner_ids.into(),
        }
    }

    /// Get the document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Get the gateway client
    pub fn gateway(&self) -> &dyn GatewayClient {
        self.gateway.as_ref()
    }

    /// Get the record mutator
    pub fn mutator(&self) -> &RecordMutator {
        self.mutator.as_ref()
    }

    /// Prefix for DMs and newly registered guilds
    pub fn default_prefix(&self) -> &str {
        self.mutator.default_prefix()
    }

    /// Whether the user is one of the configured bot owners
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_ids.contains(&user_id)
    }

    /// Load a guild's document, failing if the guild is unregistered
    pub async fn document(&self, guild_id: Snowflake) -> ServiceResult<GuildDocument> {
        self.store
            .get(guild_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Guild", guild_id))
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn DocumentStore")
            .field("gateway", &"dyn GatewayClient")
            .field("mutator", &self.mutator)
            .field("owner_ids", &self.owner_ids)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    gateway: Option<Arc<dyn GatewayClient>>,
    default_prefix: String,
    owner_ids: Vec<Snowflake>,
    mutation_attempts: u32,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            gateway: None,
            default_prefix: DEFAULT_PREFIX.to_string(),
            owner_ids: Vec::new(),
            mutation_attempts: 5,
        }
    }

    /// Take prefix, owners and retry limit from the application config
    pub fn config(mut self, config: &AppConfig) -> Self {
        self.default_prefix.clone_from(&config.bot.default_prefix);
        self.owner_ids = config.bot.owner_ids.iter().copied().map(Snowflake::new).collect();
        self.mutation_attempts = config.store.mutation_retries;
        self
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn GatewayClient>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn default_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_prefix = prefix.into();
        self
    }

    pub fn owner_ids(mut self, owner_ids: Vec<Snowflake>) -> Self {
        self.owner_ids = owner_ids;
        self
    }

    pub fn mutation_attempts(mut self, attempts: u32) -> Self {
        self.mutation_attempts = attempts;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.gateway
                .ok_or_else(|| ServiceError::validation("gateway is required"))?,
            self.default_prefix,
            self.owner_ids,
            self.mutation_attempts,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
