//! Test harness shared by the bot tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use warden_core::{Channel, DomainError, GatewayClient, Guild, GuildMember, Snowflake, User};
use warden_service::{ServiceContext, ServiceContextBuilder};
use warden_store::MemoryDocumentStore;

use crate::commands::CommandRegistry;
use crate::dispatch::EventDispatcher;
use crate::gateway::StateCache;

pub const GUILD: Snowflake = Snowflake::new(1);
pub const TEXT_CHANNEL: Snowflake = Snowflake::new(5);
pub const DM_CHANNEL: Snowflake = Snowflake::new(9);
pub const OWNER: Snowflake = Snowflake::new(10);

/// Gateway backed by a state cache that records sent messages
#[derive(Debug, Default)]
pub struct TestGateway {
    pub cache: StateCache,
    sent: Mutex<Vec<(Snowflake, String)>>,
    fail: AtomicBool,
}

impl TestGateway {
    pub fn sent(&self) -> Vec<(Snowflake, String)> {
        self.sent.lock().clone()
    }

    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl GatewayClient for TestGateway {
    async fn channel(&self, channel_id: Snowflake) -> Option<Channel> {
        self.cache.channel(channel_id)
    }

    async fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.cache.guild(guild_id)
    }

    async fn send_message(&self, channel_id: Snowflake, content: &str) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Gateway("connection closed".to_string()));
        }
        self.sent.lock().push((channel_id, content.to_string()));
        Ok(())
    }
}

pub struct Harness {
    pub store: Arc<MemoryDocumentStore>,
    pub gateway: Arc<TestGateway>,
    pub services: ServiceContext,
    pub dispatcher: EventDispatcher,
}

/// Guild 1 ("Test Guild", owner 10) with `#general` (5) and members 10 and 20,
/// plus a DM channel (9). Nothing is stored yet.
pub fn harness() -> Harness {
    let gateway = Arc::new(TestGateway::default());

    let mut guild = Guild::new(GUILD, "Test Guild", OWNER);
    guild.upsert_member(GuildMember::new(User::new(OWNER, "owner", "0001")));
    guild.upsert_member(GuildMember::new(User::new(Snowflake::new(20), "alice", "0002")));
    gateway.cache.insert_guild(
        guild,
        vec![Channel::new_text(TEXT_CHANNEL, GUILD, "general")],
    );
    gateway.cache.insert_channel(Channel::new_dm(DM_CHANNEL));

    let store = Arc::new(MemoryDocumentStore::new());
    let services = ServiceContextBuilder::new()
        .store(store.clone())
        .gateway(gateway.clone())
        .owner_ids(vec![OWNER])
        .build()
        .unwrap();

    Harness {
        store,
        gateway,
        services,
        dispatcher: EventDispatcher::new(Arc::new(CommandRegistry::with_defaults())),
    }
}
