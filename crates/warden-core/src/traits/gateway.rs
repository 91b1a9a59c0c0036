//! Gateway client port

use async_trait::async_trait;

use crate::entities::{Channel, Guild};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Operations the bot needs from the chat gateway
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Look up a channel; `None` if it is unknown to the gateway
    async fn channel(&self, channel_id: Snowflake) -> Option<Channel>;

    /// Look up a guild, including its current members
    async fn guild(&self, guild_id: Snowflake) -> Option<Guild>;

    /// Send a plain text message to a channel
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> Result<(), DomainError>;
}
