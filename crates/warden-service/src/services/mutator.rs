//! Record mutator
//!
//! Every change to a guild document is a full read-modify-write of the whole document.
//! Changes to one guild are serialized through a per-guild async lock, and the final
//! write is conditional on the revision that was read, so writers in other processes
//! cannot silently overwrite each other either.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use warden_core::{
    Channel, DocumentStore, DomainError, Guild, GuildDocument, GuildMember, MemberRecord,
    ModerationEntry, ModerationKind, Snowflake,
};

use super::error::{ServiceError, ServiceResult};

/// Result of a document mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The change was written
    Applied,
    /// The target user has no record in the guild; nothing was written
    MemberNotFound,
    /// The guild has no document; nothing was written
    GuildNotFound,
    /// The document already reflected the change; nothing was written
    Unchanged,
}

impl MutationOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of registering a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyRegistered,
}

/// Applies single semantic changes to guild documents
pub struct RecordMutator {
    store: Arc<dyn DocumentStore>,
    locks: DashMap<Snowflake, Arc<Mutex<()>>>,
    default_prefix: String,
    max_attempts: u32,
}

impl std::fmt::Debug for RecordMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordMutator")
            .field("locked_guilds", &self.locks.len())
            .field("default_prefix", &self.default_prefix)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl RecordMutator {
    /// Create a mutator over a store.
    ///
    /// `max_attempts` bounds retries after a revision conflict (minimum 1).
    pub fn new(
        store: Arc<dyn DocumentStore>,
        default_prefix: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            locks: DashMap::new(),
            default_prefix: default_prefix.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Prefix given to newly registered guilds
    pub fn default_prefix(&self) -> &str {
        &self.default_prefix
    }

    fn lock_for(&self, guild_id: Snowflake) -> Arc<Mutex<()>> {
        self.locks.entry(guild_id).or_default().clone()
    }

    /// Create the guild's document, seeded with one record per current member.
    ///
    /// Idempotent: an existing document is left untouched.
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn register_guild(&self, guild: &Guild) -> ServiceResult<RegisterOutcome> {
        let lock = self.lock_for(guild.id);
        let _guard = lock.lock().await;

        let document = GuildDocument::from_guild(guild, self.default_prefix.as_str());
        if self.store.create_if_absent(guild.id, &document).await? {
            info!(
                guild_name = %guild.name,
                members = document.members.len(),
                "Guild registered"
            );
            Ok(RegisterOutcome::Created)
        } else {
            debug!("Guild already registered");
            Ok(RegisterOutcome::AlreadyRegistered)
        }
    }

    /// Delete the guild's document; returns `true` if one existed
    #[instrument(skip(self))]
    pub async fn remove_guild(&self, guild_id: Snowflake) -> ServiceResult<bool> {
        let removed = {
            let lock = self.lock_for(guild_id);
            let _guard = lock.lock().await;
            self.store.delete(guild_id).await?
        };
        self.locks.remove(&guild_id);

        if removed {
            info!("Guild removed");
        }
        Ok(removed)
    }

    /// Add a record for a member, or refresh the identity of an existing one.
    ///
    /// A member that is already present never gets a second record.
    #[instrument(skip(self, member), fields(user_id = %member.id()))]
    pub async fn register_member(
        &self,
        guild_id: Snowflake,
        member: &GuildMember,
    ) -> ServiceResult<MutationOutcome> {
        self.mutate(guild_id, |document| match document.member_mut(member.id()) {
            Some(record) => {
                if record.observe(member) {
                    MutationOutcome::Applied
                } else {
                    MutationOutcome::Unchanged
                }
            }
            None => {
                document.members.push(MemberRecord::from_member(member));
                MutationOutcome::Applied
            }
        })
        .await
    }

    /// Append a moderation entry to a member's history
    #[instrument(skip(self, entry))]
    pub async fn append_entry(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        kind: ModerationKind,
        entry: ModerationEntry,
    ) -> ServiceResult<MutationOutcome> {
        let outcome = self
            .mutate(guild_id, |document| match document.member_mut(user_id) {
                Some(record) => {
                    record.push_entry(kind, entry.clone());
                    MutationOutcome::Applied
                }
                None => MutationOutcome::MemberNotFound,
            })
            .await?;

        match outcome {
            MutationOutcome::Applied => info!(kind = %kind, "Moderation entry logged"),
            other => debug!(kind = %kind, outcome = ?other, "Moderation entry not logged"),
        }
        Ok(outcome)
    }

    pub async fn log_warning(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        channel: &Channel,
        reason: &str,
    ) -> ServiceResult<MutationOutcome> {
        let entry = ModerationEntry::new(channel.descriptor(), reason);
        self.append_entry(guild_id, user_id, ModerationKind::Warning, entry)
            .await
    }

    pub async fn log_kick(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        channel: &Channel,
        reason: &str,
    ) -> ServiceResult<MutationOutcome> {
        let entry = ModerationEntry::new(channel.descriptor(), reason);
        self.append_entry(guild_id, user_id, ModerationKind::Kick, entry)
            .await
    }

    pub async fn log_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        channel: &Channel,
        reason: &str,
    ) -> ServiceResult<MutationOutcome> {
        let entry = ModerationEntry::new(channel.descriptor(), reason);
        self.append_entry(guild_id, user_id, ModerationKind::Ban, entry)
            .await
    }

    pub async fn log_mute(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        channel: &Channel,
        reason: &str,
        duration: Duration,
    ) -> ServiceResult<MutationOutcome> {
        let entry = ModerationEntry::new(channel.descriptor(), reason).with_duration(duration);
        self.append_entry(guild_id, user_id, ModerationKind::Mute, entry)
            .await
    }

    /// Change the guild's command prefix
    #[instrument(skip(self))]
    pub async fn set_prefix(
        &self,
        guild_id: Snowflake,
        prefix: &str,
    ) -> ServiceResult<MutationOutcome> {
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ServiceError::validation(
                "Prefix must be non-empty and contain no whitespace",
            ));
        }

        self.mutate(guild_id, |document| {
            if document.prefix == prefix {
                MutationOutcome::Unchanged
            } else {
                document.prefix = prefix.to_string();
                MutationOutcome::Applied
            }
        })
        .await
    }

    /// Read-modify-write loop shared by all mutations.
    ///
    /// `apply` may run more than once; it only writes when it returns `Applied`.
    async fn mutate<F>(&self, guild_id: Snowflake, mut apply: F) -> ServiceResult<MutationOutcome>
    where
        F: FnMut(&mut GuildDocument) -> MutationOutcome + Send,
    {
        let lock = self.lock_for(guild_id);
        let _guard = lock.lock().await;

        for attempt in 1..=self.max_attempts {
            let Some(mut document) = self.store.get(guild_id).await? else {
                return Ok(MutationOutcome::GuildNotFound);
            };

            let outcome = apply(&mut document);
            if !outcome.is_applied() {
                return Ok(outcome);
            }

            let expected = document.revision;
            document.revision = expected + 1;
            if self
                .store
                .put_if_revision(guild_id, &document, expected)
                .await?
            {
                return Ok(MutationOutcome::Applied);
            }

            debug!(guild_id = %guild_id, attempt, "Guild document revision moved, retrying");
        }

        warn!(
            guild_id = %guild_id,
            attempts = self.max_attempts,
            "Giving up on guild document mutation"
        );
        Err(DomainError::Conflict {
            guild_id,
            attempts: self.max_attempts,
        }
        .into())
    }
}
