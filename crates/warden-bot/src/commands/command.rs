//! Command contract and invocation context

use async_trait::async_trait;
use bitflags::bitflags;
use warden_core::{Channel, Guild, GuildDocument, Message, Snowflake, User};
use warden_service::ServiceContext;

use super::error::CommandResult;

bitflags! {
    /// Static restrictions on where and by whom a command may run
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CommandFlags: u8 {
        /// Only usable in guild text channels
        const GUILD_ONLY = 1 << 0;
        /// Registered but switched off everywhere
        const DISABLED = 1 << 1;
        /// Only usable by configured bot owners
        const OWNER_ONLY = 1 << 2;
    }
}

/// A bot command
#[async_trait]
pub trait Command: Send + Sync {
    /// Canonical name, lowercase
    fn name(&self) -> &'static str;

    /// Alternative names
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Delimiter between arguments
    fn args_delim(&self) -> &'static str {
        " "
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::empty()
    }

    fn description(&self) -> &'static str;

    async fn invoke(&self, ctx: &CommandContext<'_>) -> CommandResult;
}

/// IDs referenced by mention markup in the arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mentions {
    pub users: Vec<Snowflake>,
    pub channels: Vec<Snowflake>,
    pub roles: Vec<Snowflake>,
}

impl Mentions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.channels.is_empty() && self.roles.is_empty()
    }
}

/// Everything a command needs to run
pub struct CommandContext<'a> {
    pub services: &'a ServiceContext,
    pub message: &'a Message,
    pub channel: Channel,
    /// Guild snapshot (guild text channels only)
    pub guild: Option<Guild>,
    /// The guild's document, when it could be loaded
    pub document: Option<GuildDocument>,
    /// Prefix that matched
    pub prefix: String,
    /// Command name as typed
    pub name: String,
    /// Arguments with mention tokens removed
    pub args: Vec<String>,
    /// All arguments as split from the message
    pub raw_args: Vec<String>,
    pub mentions: Mentions,
}

impl CommandContext<'_> {
    #[inline]
    pub fn author(&self) -> &User {
        &self.message.author
    }

    /// Guild ID when invoked from a guild text channel
    #[inline]
    pub fn guild_id(&self) -> Option<Snowflake> {
        self.channel.text_guild()
    }

    /// Send a message to the channel the command came from
    pub async fn reply(&self, content: &str) -> CommandResult {
        self.services
            .gateway()
            .send_message(self.channel.id, content)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("channel_id", &self.channel.id)
            .field("guild_id", &self.guild_id())
            .field("author", &self.message.author.id)
            .field("name", &self.name)
            .field("raw_args", &self.raw_args)
            .field("mentions", &self.mentions)
            .finish()
    }
}
