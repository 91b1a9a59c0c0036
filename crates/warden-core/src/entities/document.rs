//! Guild document - the persisted unit of truth for one guild
//!
//! Every piece of per-guild configuration and moderation history lives in a single
//! `GuildDocument`, stored under the guild's ID. There are no secondary indices: member
//! lookups are a linear scan and moderation histories are ordered by insertion only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Guild, GuildMember};
use crate::value_objects::Snowflake;

/// Current document schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Prefix used when no guild-specific prefix is configured
pub const DEFAULT_PREFIX: &str = "+";

/// Persisted state of a single guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GuildDocument {
    /// Schema version of the encoded form (0 = written before versioning existed)
    #[serde(default)]
    pub schema_version: u32,
    /// Generation counter, bumped on every successful write
    #[serde(default)]
    pub revision: u64,
    pub id: Snowflake,
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub blacklisted_channels: Vec<Snowflake>,
    #[serde(default)]
    pub blacklisted_members: Vec<Snowflake>,
    #[serde(default)]
    pub welcome_message: String,
    #[serde(default)]
    pub welcome_channel: Option<Snowflake>,
    #[serde(default)]
    pub goodbye_message: String,
    #[serde(default)]
    pub goodbye_channel: Option<Snowflake>,
    #[serde(default)]
    pub member_add_message: String,
    #[serde(default)]
    pub member_add_channel: Option<Snowflake>,
    #[serde(default)]
    pub member_remove_message: String,
    #[serde(default)]
    pub member_remove_channel: Option<Snowflake>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub disabled_commands: Vec<String>,
    #[serde(default)]
    pub birthday_role: Option<Snowflake>,
    #[serde(default)]
    pub muted_role: Option<Snowflake>,
    #[serde(default)]
    pub auto_roles: Vec<Snowflake>,
}

/// Which configured greeting to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    /// Public welcome for a joining member
    Welcome,
    /// Log line for a joining member
    MemberAdd,
    /// Public goodbye for a leaving member
    Goodbye,
    /// Log line for a leaving member
    MemberRemove,
}

impl GuildDocument {
    /// Create an empty document for a guild
    pub fn new(id: Snowflake, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id,
            name: name.into(),
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Seed a document from a gateway snapshot, one record per current member
    pub fn from_guild(guild: &Guild, prefix: impl Into<String>) -> Self {
        let mut document = Self::new(guild.id, guild.name.clone(), prefix);
        document.members = guild.members.iter().map(MemberRecord::from_member).collect();
        document
    }

    /// Find a member record by user ID
    pub fn member(&self, user_id: Snowflake) -> Option<&MemberRecord> {
        self.members.iter().find(|m| m.id == user_id)
    }

    /// Find a member record by user ID, mutably
    pub fn member_mut(&mut self, user_id: Snowflake) -> Option<&mut MemberRecord> {
        self.members.iter_mut().find(|m| m.id == user_id)
    }

    #[inline]
    pub fn has_member(&self, user_id: Snowflake) -> bool {
        self.member(user_id).is_some()
    }

    #[inline]
    pub fn is_channel_blacklisted(&self, channel_id: Snowflake) -> bool {
        self.blacklisted_channels.contains(&channel_id)
    }

    #[inline]
    pub fn is_member_blacklisted(&self, user_id: Snowflake) -> bool {
        self.blacklisted_members.contains(&user_id)
    }

    /// Check the disabled-command list (case-insensitive)
    pub fn is_command_disabled(&self, name: &str) -> bool {
        self.disabled_commands
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }

    /// Target channel and template for a greeting.
    ///
    /// Returns `None` unless both a channel and a non-empty template are configured.
    pub fn greeting(&self, greeting: Greeting) -> Option<(Snowflake, &str)> {
        let (channel, template) = match greeting {
            Greeting::Welcome => (self.welcome_channel, &self.welcome_message),
            Greeting::MemberAdd => (self.member_add_channel, &self.member_add_message),
            Greeting::Goodbye => (self.goodbye_channel, &self.goodbye_message),
            Greeting::MemberRemove => (self.member_remove_channel, &self.member_remove_message),
        };

        match channel {
            Some(channel) if !channel.is_zero() && !template.is_empty() => {
                Some((channel, template.as_str()))
            }
            _ => None,
        }
    }
}

/// Per-user state and moderation history within a guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MemberRecord {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Account creation time, derived from the user ID
    #[serde(default)]
    pub account_created_at: DateTime<Utc>,
    #[serde(default)]
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub previous_usernames: Vec<String>,
    #[serde(default)]
    pub previous_nicknames: Vec<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub warnings: Vec<ModerationEntry>,
    #[serde(default)]
    pub kicks: Vec<ModerationEntry>,
    #[serde(default)]
    pub bans: Vec<ModerationEntry>,
    #[serde(default)]
    pub mutes: Vec<ModerationEntry>,
}

impl MemberRecord {
    /// Fresh record with empty histories
    pub fn from_member(member: &GuildMember) -> Self {
        Self {
            id: member.user.id,
            username: member.user.username.clone(),
            discriminator: member.user.discriminator.clone(),
            nickname: member.nickname.clone(),
            account_created_at: member.user.id.created_at(),
            joined_at: member.joined_at,
            roles: member.role_ids.clone(),
            ..Self::default()
        }
    }

    /// Moderation history of one kind, oldest first
    pub fn history(&self, kind: ModerationKind) -> &[ModerationEntry] {
        match kind {
            ModerationKind::Warning => &self.warnings,
            ModerationKind::Kick => &self.kicks,
            ModerationKind::Ban => &self.bans,
            ModerationKind::Mute => &self.mutes,
        }
    }

    /// Append an entry to the history of the given kind
    pub fn push_entry(&mut self, kind: ModerationKind, entry: ModerationEntry) {
        match kind {
            ModerationKind::Warning => self.warnings.push(entry),
            ModerationKind::Kick => self.kicks.push(entry),
            ModerationKind::Ban => self.bans.push(entry),
            ModerationKind::Mute => self.mutes.push(entry),
        }
    }

    /// Refresh identity fields from a newer snapshot of the member.
    ///
    /// Old usernames and nicknames are kept in the `previous_*` lists.
    /// Returns `true` when anything changed.
    pub fn observe(&mut self, member: &GuildMember) -> bool {
        let mut changed = false;

        if self.username != member.user.username {
            let old = std::mem::replace(&mut self.username, member.user.username.clone());
            if !old.is_empty() {
                self.previous_usernames.push(old);
            }
            changed = true;
        }

        if self.discriminator != member.user.discriminator {
            self.discriminator.clone_from(&member.user.discriminator);
            changed = true;
        }

        if self.nickname != member.nickname {
            if let Some(old) = std::mem::replace(&mut self.nickname, member.nickname.clone()) {
                self.previous_nicknames.push(old);
            }
            changed = true;
        }

        if self.roles != member.role_ids {
            self.roles.clone_from(&member.role_ids);
            changed = true;
        }

        changed
    }
}

/// Kind of moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationKind {
    Warning,
    Kick,
    Ban,
    Mute,
}

impl ModerationKind {
    pub const ALL: [Self; 4] = [Self::Warning, Self::Kick, Self::Ban, Self::Mute];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Kick => "kick",
            Self::Ban => "ban",
            Self::Mute => "mute",
        }
    }
}

impl fmt::Display for ModerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged moderation action. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationEntry {
    /// Channel descriptor, `"<name> / <id>"`
    pub channel: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    /// Mute length in seconds (mutes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl ModerationEntry {
    /// Create an entry stamped with the current time
    pub fn new(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            reason: reason.into(),
            created_at: Utc::now(),
            duration_secs: None,
        }
    }

    /// Attach a mute duration
    #[must_use]
    pub fn with_duration(mut self, duration: std::time::Duration) -> Self {
        self.duration_secs = Some(duration.as_secs());
        self
    }

    pub fn duration(&self) -> Option<std::time::Duration> {
        self.duration_secs.map(std::time::Duration::from_secs)
    }
}
