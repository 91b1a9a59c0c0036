//! Moderation commands
//!
//! `warn`, `kick`, `ban` and `mute` record an entry on the target's member record.
//! They do not act on the gateway.

use std::time::Duration;

use async_trait::async_trait;
use warden_core::ModerationKind;
use warden_service::MutationOutcome;

use super::command::{Command, CommandContext, CommandFlags};
use super::error::CommandResult;

const NO_REASON: &str = "No reason provided";

/// Records one kind of moderation action
#[derive(Debug, Clone, Copy)]
pub struct ModerationCommand {
    kind: ModerationKind,
}

impl ModerationCommand {
    #[must_use]
    pub const fn new(kind: ModerationKind) -> Self {
        Self { kind }
    }

    fn usage(&self) -> &'static str {
        match self.kind {
            ModerationKind::Warning => "Usage: warn @member [reason]",
            ModerationKind::Kick => "Usage: kick @member [reason]",
            ModerationKind::Ban => "Usage: ban @member [reason]",
            ModerationKind::Mute => "Usage: mute @member <duration, e.g. 10m> [reason]",
        }
    }
}

#[async_trait]
impl Command for ModerationCommand {
    fn name(&self) -> &'static str {
        match self.kind {
            ModerationKind::Warning => "warn",
            ModerationKind::Kick => "kick",
            ModerationKind::Ban => "ban",
            ModerationKind::Mute => "mute",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self.kind {
            ModerationKind::Warning => &["warning"],
            ModerationKind::Mute => &["silence"],
            ModerationKind::Kick | ModerationKind::Ban => &[],
        }
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::GUILD_ONLY
    }

    fn description(&self) -> &'static str {
        match self.kind {
            ModerationKind::Warning => "Log a warning for a member",
            ModerationKind::Kick => "Log a kick for a member",
            ModerationKind::Ban => "Log a ban for a member",
            ModerationKind::Mute => "Log a timed mute for a member",
        }
    }

    async fn invoke(&self, ctx: &CommandContext<'_>) -> CommandResult {
        let (Some(guild_id), Some(&target)) = (ctx.guild_id(), ctx.mentions.users.first()) else {
            return ctx.reply(self.usage()).await;
        };

        let mut args = ctx.args.iter().map(String::as_str);
        let duration = match self.kind {
            ModerationKind::Mute => match args.next().and_then(parse_duration) {
                Some(duration) => Some(duration),
                None => return ctx.reply(self.usage()).await,
            },
            _ => None,
        };

        let reason = args.collect::<Vec<_>>().join(" ");
        let reason = if reason.is_empty() { NO_REASON } else { reason.as_str() };

        let mutator = ctx.services.mutator();
        let channel = &ctx.channel;
        let outcome = match (self.kind, duration) {
            (ModerationKind::Mute, Some(duration)) => {
                mutator.log_mute(guild_id, target, channel, reason, duration).await?
            }
            (ModerationKind::Kick, _) => mutator.log_kick(guild_id, target, channel, reason).await?,
            (ModerationKind::Ban, _) => mutator.log_ban(guild_id, target, channel, reason).await?,
            _ => mutator.log_warning(guild_id, target, channel, reason).await?,
        };

        match outcome {
            MutationOutcome::Applied => {
                ctx.reply(&format!("Logged {} for <@{target}>: {reason}", self.kind))
                    .await
            }
            MutationOutcome::MemberNotFound => {
                ctx.reply(&format!("<@{target}> has no record in this guild."))
                    .await
            }
            MutationOutcome::GuildNotFound => ctx.reply("This guild is not registered yet.").await,
            MutationOutcome::Unchanged => Ok(()),
        }
    }
}

/// Parse a duration such as `90s`, `10m`, `1h30m` or `2d`
pub fn parse_duration(input: &str) -> Option<Duration> {
    let mut total: u64 = 0;
    let mut number = String::new();

    for c in input.trim().chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }

        let value: u64 = number.parse().ok()?;
        number.clear();
        let unit = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            'w' => 7 * 24 * 60 * 60,
            _ => return None,
        };
        total = total.checked_add(value.checked_mul(unit)?)?;
    }

    // A trailing number without a unit is ambiguous
    if !number.is_empty() || total == 0 {
        return None;
    }
    Some(Duration::from_secs(total))
}
