//! Test helpers for integration tests
//!
//! Provides a bot wired to a real document store and the line-delimited gateway,
//! with its output captured for assertions.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use warden_bot::{pump_events, Bot, CommandRegistry, LocalGateway, OutgoingMessage, StateCache};
use warden_common::AppConfig;
use warden_core::{DocumentStore, GuildDocument, Snowflake};
use warden_service::ServiceContextBuilder;

use crate::fixtures::{event, unique_suffix, OWNER};

/// Writer that appends into a shared buffer
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl AsyncWrite for SharedBuffer {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.0.lock().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Bot instance with captured output
pub struct TestBot {
    pub bot: Arc<Bot>,
    pub store: Arc<dyn DocumentStore>,
    pub cache: Arc<StateCache>,
    output: SharedBuffer,
}

impl TestBot {
    /// Start a bot over the in-memory store
    pub async fn start() -> Result<Self> {
        Self::start_with_config(memory_config()?).await
    }

    /// Start a bot with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = warden_store::open_store(&config).await?;
        Self::start_with_store(&config, store)
    }

    /// Start a bot over an existing store
    pub fn start_with_store(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let cache = Arc::new(StateCache::new());
        let output = SharedBuffer::default();
        let gateway = Arc::new(LocalGateway::new(Arc::clone(&cache), output.clone()));

        let services = ServiceContextBuilder::new()
            .config(config)
            .store(Arc::clone(&store))
            .gateway(gateway)
            .build()?;

        Ok(Self {
            bot: Arc::new(Bot::new(services, CommandRegistry::with_defaults())),
            store,
            cache,
            output,
        })
    }

    /// Apply and handle one event to completion
    pub async fn send(&self, value: Value) {
        let event = event(value);
        self.cache.apply(&event);
        self.bot.handle_logged(event).await;
    }

    /// Feed newline-delimited input through the reader and the router, handling
    /// events concurrently. Returns the number of events forwarded.
    pub async fn feed(&self, input: &str) -> Result<u64> {
        let (tx, rx) = mpsc::channel(64);
        let router = tokio::spawn(Arc::clone(&self.bot).run(rx));

        let forwarded = pump_events(input.as_bytes(), &self.cache, tx).await?;
        router.await?;
        Ok(forwarded)
    }

    /// Messages written since the last call
    pub fn take_output(&self) -> Vec<OutgoingMessage> {
        String::from_utf8_lossy(&self.output.take())
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Content of messages written since the last call
    pub fn take_replies(&self) -> Vec<String> {
        self.take_output().into_iter().map(|m| m.content).collect()
    }

    pub async fn document(&self, guild_id: Snowflake) -> Result<Option<GuildDocument>> {
        Ok(self.store.get(guild_id).await?)
    }

    /// Read-modify-write a stored document outside the bot
    pub async fn configure(
        &self,
        guild_id: Snowflake,
        f: impl FnOnce(&mut GuildDocument),
    ) -> Result<()> {
        let mut document = self
            .document(guild_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("guild {guild_id} is not registered"))?;
        f(&mut document);
        self.store.put(guild_id, &document).await?;
        Ok(())
    }
}

/// Config for the in-memory store, owner 10
pub fn memory_config() -> Result<AppConfig> {
    config_from(&[("STORE_BACKEND", "memory"), ("BOT_OWNER_IDS", "10")])
}

/// Config for the Redis store with a key prefix unique to this test
pub fn redis_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let url = std::env::var("REDIS_URL")?;
    let prefix = format!("warden-test:{}:{}:", std::process::id(), unique_suffix());
    config_from(&[
        ("STORE_BACKEND", "redis"),
        ("REDIS_URL", &url),
        ("STORE_KEY_PREFIX", &prefix),
        ("BOT_OWNER_IDS", &OWNER.to_string()),
    ])
}

fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if a Redis instance is available for testing
pub fn check_redis_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}
