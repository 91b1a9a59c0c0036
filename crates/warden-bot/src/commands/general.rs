//! General commands: `prefix`, `ping`, and the unknown-command fallback

use async_trait::async_trait;
use warden_service::{MutationOutcome, ServiceError};

use super::command::{Command, CommandContext, CommandFlags};
use super::error::CommandResult;

/// Shows or changes the guild's command prefix
#[derive(Debug, Clone, Copy)]
pub struct PrefixCommand;

#[async_trait]
impl Command for PrefixCommand {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::GUILD_ONLY
    }

    fn description(&self) -> &'static str {
        "Show or change this guild's command prefix"
    }

    async fn invoke(&self, ctx: &CommandContext<'_>) -> CommandResult {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        let Some(new_prefix) = ctx.raw_args.first() else {
            return ctx
                .reply(&format!("The prefix for this guild is `{}`", ctx.prefix))
                .await;
        };

        match ctx.services.mutator().set_prefix(guild_id, new_prefix).await {
            Ok(MutationOutcome::Applied) => {
                ctx.reply(&format!("Prefix changed to `{new_prefix}`")).await
            }
            Ok(MutationOutcome::Unchanged) => {
                ctx.reply(&format!("The prefix is already `{new_prefix}`"))
                    .await
            }
            Ok(_) => ctx.reply("This guild is not registered yet.").await,
            Err(ServiceError::Validation(msg)) => ctx.reply(&msg).await,
            Err(e) => Err(e.into()),
        }
    }
}

/// Liveness check
#[derive(Debug, Clone, Copy)]
pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }

    fn description(&self) -> &'static str {
        "Check that the bot is responding"
    }

    async fn invoke(&self, ctx: &CommandContext<'_>) -> CommandResult {
        ctx.reply("Pong!").await
    }
}

/// Fallback for names that match no command
#[derive(Debug, Clone, Copy)]
pub struct UnknownCommand;

#[async_trait]
impl Command for UnknownCommand {
    fn name(&self) -> &'static str {
        "unknown"
    }

    fn description(&self) -> &'static str {
        "Replies when no command matches"
    }

    async fn invoke(&self, ctx: &CommandContext<'_>) -> CommandResult {
        ctx.reply(&format!("Unknown command `{}{}`", ctx.prefix, ctx.name))
            .await
    }
}
