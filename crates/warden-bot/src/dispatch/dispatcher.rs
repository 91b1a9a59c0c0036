//! Message event dispatcher
//!
//! Resolves the guild context and prefix of an incoming message, picks the command,
//! applies the guild's restrictions, and invokes it.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use warden_core::{Channel, GuildDocument, Message, Snowflake};
use warden_service::{LifecycleService, ServiceContext};

use super::args::{extract_mentions, split_args, split_command};
use crate::commands::{Command, CommandContext, CommandFlags, CommandRegistry};

/// Why a message did not invoke a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Message was sent by a bot account
    BotAuthor,
    /// The gateway does not know the channel
    ChannelUnresolved,
    /// The gateway does not know the channel's guild
    GuildUnresolved,
    /// Message does not start with the prefix
    NoPrefix,
    /// Nothing follows the prefix
    EmptyCommand,
    BlacklistedChannel,
    BlacklistedMember,
    /// Command switched off in this guild
    CommandDisabled,
    /// Command carries the `DISABLED` flag
    Disabled,
    /// Guild-only command used outside a guild text channel
    GuildOnly,
    /// Owner-only command used by someone else
    OwnerOnly,
}

impl IgnoreReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BotAuthor => "bot_author",
            Self::ChannelUnresolved => "channel_unresolved",
            Self::GuildUnresolved => "guild_unresolved",
            Self::NoPrefix => "no_prefix",
            Self::EmptyCommand => "empty_command",
            Self::BlacklistedChannel => "blacklisted_channel",
            Self::BlacklistedMember => "blacklisted_member",
            Self::CommandDisabled => "command_disabled",
            Self::Disabled => "disabled",
            Self::GuildOnly => "guild_only",
            Self::OwnerOnly => "owner_only",
        }
    }
}

/// Result of dispatching one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The named command ran to completion
    Invoked(&'static str),
    /// No command ran
    Ignored(IgnoreReason),
    /// The named command returned an error (logged, not shown to users)
    Failed(&'static str),
}

/// Turns message events into command invocations
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    registry: Arc<CommandRegistry>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatch a single message
    #[instrument(
        skip(self, services, message),
        fields(message_id = %message.id, channel_id = %message.channel_id)
    )]
    pub async fn dispatch(&self, services: &ServiceContext, message: &Message) -> DispatchOutcome {
        if message.author.is_bot() {
            return DispatchOutcome::Ignored(IgnoreReason::BotAuthor);
        }

        let Some(channel) = services.gateway().channel(message.channel_id).await else {
            debug!("Channel not resolvable, dropping message");
            return DispatchOutcome::Ignored(IgnoreReason::ChannelUnresolved);
        };

        // Guild text channels get tenant context; DMs run with the default prefix
        let (guild, document) = match channel.text_guild() {
            Some(guild_id) => {
                let Some(guild) = services.gateway().guild(guild_id).await else {
                    debug!(guild_id = %guild_id, "Guild not resolvable, dropping message");
                    return DispatchOutcome::Ignored(IgnoreReason::GuildUnresolved);
                };

                let document = match LifecycleService::new(services).ensure_registered(&guild).await
                {
                    Ok(document) => Some(document),
                    Err(e) => {
                        warn!(
                            guild_id = %guild_id,
                            error = %e,
                            "Guild document unavailable, falling back to default prefix"
                        );
                        None
                    }
                };
                (Some(guild), document)
            }
            None => (None, None),
        };

        let prefix = document
            .as_ref()
            .map(|d| d.prefix.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(services.default_prefix())
            .to_string();

        let Some(text) = message.content.strip_prefix(prefix.as_str()) else {
            return DispatchOutcome::Ignored(IgnoreReason::NoPrefix);
        };

        let (name, rest) = split_command(text);
        if name.is_empty() {
            return DispatchOutcome::Ignored(IgnoreReason::EmptyCommand);
        }

        let command = self.registry.resolve(name);
        let raw_args = split_args(rest, command.args_delim());
        let (args, mentions) = extract_mentions(&raw_args);

        if let Some(reason) =
            restriction(command, &channel, document.as_ref(), message.author.id, services)
        {
            debug!(command = command.name(), reason = reason.as_str(), "Command not allowed");
            return DispatchOutcome::Ignored(reason);
        }

        let ctx = CommandContext {
            services,
            message,
            channel,
            guild,
            document,
            prefix,
            name: name.to_string(),
            args,
            raw_args,
            mentions,
        };

        match command.invoke(&ctx).await {
            Ok(()) => {
                info!(
                    command = command.name(),
                    author = %ctx.author().tag(),
                    guild_id = ?ctx.guild_id(),
                    "Command invoked"
                );
                DispatchOutcome::Invoked(command.name())
            }
            Err(e) => {
                error!(
                    command = command.name(),
                    code = e.error_code(),
                    error = %e,
                    "Command failed"
                );
                DispatchOutcome::Failed(command.name())
            }
        }
    }
}

/// First restriction that stops the command from running, if any
fn restriction(
    command: &dyn Command,
    channel: &Channel,
    document: Option<&GuildDocument>,
    author_id: Snowflake,
    services: &ServiceContext,
) -> Option<IgnoreReason> {
    let flags = command.flags();

    if flags.contains(CommandFlags::DISABLED) {
        return Some(IgnoreReason::Disabled);
    }

    if let Some(document) = document {
        if document.is_channel_blacklisted(channel.id) {
            return Some(IgnoreReason::BlacklistedChannel);
        }
        if document.is_member_blacklisted(author_id) {
            return Some(IgnoreReason::BlacklistedMember);
        }
        if document.is_command_disabled(command.name()) {
            return Some(IgnoreReason::CommandDisabled);
        }
    }

    if flags.contains(CommandFlags::GUILD_ONLY) && channel.text_guild().is_none() {
        return Some(IgnoreReason::GuildOnly);
    }

    if flags.contains(CommandFlags::OWNER_ONLY) && !services.is_owner(author_id) {
        return Some(IgnoreReason::OwnerOnly);
    }

    None
}
