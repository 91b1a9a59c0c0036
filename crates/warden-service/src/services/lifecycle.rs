//! Guild lifecycle handlers
//!
//! Reacts to the bot joining or leaving a guild and to members joining or leaving.

use tracing::{debug, info, instrument, warn};
use warden_core::{Greeting, Guild, GuildDocument, GuildMember, Snowflake, User};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::mutator::{MutationOutcome, RegisterOutcome};

/// Lifecycle service
pub struct LifecycleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LifecycleService<'a> {
    /// Create a new LifecycleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The bot was added to a guild (or the gateway replayed it on connect)
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn guild_joined(&self, guild: &Guild) -> ServiceResult<RegisterOutcome> {
        if self.ctx.store().exists(guild.id).await? {
            debug!("Guild already registered");
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let outcome = self.ctx.mutator().register_guild(guild).await?;
        if outcome == RegisterOutcome::Created {
            info!(guild_name = %guild.name, "New guild added");
        }
        Ok(outcome)
    }

    /// The bot was removed from a guild; its document is destroyed
    #[instrument(skip(self))]
    pub async fn guild_left(&self, guild_id: Snowflake) -> ServiceResult<bool> {
        if !self.ctx.store().exists(guild_id).await? {
            debug!("Guild was never registered");
            return Ok(false);
        }

        self.ctx.mutator().remove_guild(guild_id).await
    }

    /// Load the guild's document, registering the guild first if it has none
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn ensure_registered(&self, guild: &Guild) -> ServiceResult<GuildDocument> {
        if let Some(document) = self.ctx.store().get(guild.id).await? {
            return Ok(document);
        }

        self.ctx.mutator().register_guild(guild).await?;
        self.ctx.document(guild.id).await
    }

    /// A member joined: record them, then send the configured greetings.
    ///
    /// Greetings are best-effort; a failed send is logged and does not fail the handler.
    #[instrument(skip(self, member), fields(user_id = %member.id()))]
    pub async fn member_joined(
        &self,
        guild_id: Snowflake,
        member: &GuildMember,
    ) -> ServiceResult<MutationOutcome> {
        let document = self.ctx.document(guild_id).await?;

        let outcome = self.ctx.mutator().register_member(guild_id, member).await?;
        debug!(member = member.display_name(), outcome = ?outcome, "Member registered");

        self.announce(&document, Greeting::Welcome, &member.user).await;
        self.announce(&document, Greeting::MemberAdd, &member.user).await;

        Ok(outcome)
    }

    /// A member left: send the configured farewells. The member's record is kept.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn member_left(&self, guild_id: Snowflake, user: &User) -> ServiceResult<()> {
        let document = self.ctx.document(guild_id).await?;

        self.announce(&document, Greeting::Goodbye, user).await;
        self.announce(&document, Greeting::MemberRemove, user).await;

        Ok(())
    }

    async fn announce(&self, document: &GuildDocument, greeting: Greeting, user: &User) -> bool {
        let Some((channel_id, template)) = document.greeting(greeting) else {
            return false;
        };

        let content = format_greeting(template, user, &document.name);
        match self.ctx.gateway().send_message(channel_id, &content).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    guild_id = %document.id,
                    channel_id = %channel_id,
                    greeting = ?greeting,
                    error = %e,
                    "Failed to send greeting"
                );
                false
            }
        }
    }
}

/// Fill in a greeting template.
///
/// Supported placeholders: `{user}`, `{mention}`, `{tag}`, `{guild}`.
pub fn format_greeting(template: &str, user: &User, guild_name: &str) -> String {
    template
        .replace("{user}", &user.username)
        .replace("{mention}", &user.mention())
        .replace("{tag}", &user.tag())
        .replace("{guild}", guild_name)
}
