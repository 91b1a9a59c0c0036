//! Event payload definitions
//!
//! Defines the data structures for each consumed gateway event and their
//! conversions into domain snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::{Channel, ChannelType, Guild, GuildMember, Message, Snowflake, User};

use super::GatewayEventType;

/// A dispatched gateway event, framed as `{"t": <name>, "d": <payload>}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", content = "d", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    GuildCreate(GuildCreateEvent),
    GuildDelete(GuildDeleteEvent),
    MessageCreate(MessageCreateEvent),
    GuildMemberAdd(GuildMemberAddEvent),
    GuildMemberRemove(GuildMemberRemoveEvent),
}

impl GatewayEvent {
    #[must_use]
    pub fn event_type(&self) -> GatewayEventType {
        match self {
            Self::GuildCreate(_) => GatewayEventType::GuildCreate,
            Self::GuildDelete(_) => GatewayEventType::GuildDelete,
            Self::MessageCreate(_) => GatewayEventType::MessageCreate,
            Self::GuildMemberAdd(_) => GatewayEventType::GuildMemberAdd,
            Self::GuildMemberRemove(_) => GatewayEventType::GuildMemberRemove,
        }
    }

    /// Guild the event belongs to, if any
    #[must_use]
    pub fn guild_id(&self) -> Option<Snowflake> {
        match self {
            Self::GuildCreate(e) => Some(e.id),
            Self::GuildDelete(e) => Some(e.id),
            Self::MessageCreate(e) => e.guild_id,
            Self::GuildMemberAdd(e) => Some(e.guild_id),
            Self::GuildMemberRemove(e) => Some(e.guild_id),
        }
    }
}

// === User Payload ===

/// User data included in events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub bot: bool,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        let mut user = User::new(payload.id, payload.username, payload.discriminator);
        user.bot = payload.bot;
        user
    }
}

// === Member Payload ===

/// Member data included in events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPayload {
    pub user: UserPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl From<MemberPayload> for GuildMember {
    fn from(payload: MemberPayload) -> Self {
        let mut member = GuildMember::new(payload.user.into());
        member.nickname = payload.nickname;
        member.role_ids = payload.roles;
        if let Some(joined_at) = payload.joined_at {
            member.joined_at = joined_at;
        }
        member
    }
}

// === Channel Payload ===

/// Channel data included in events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub channel_type: i32,
}

impl ChannelPayload {
    /// Convert into a channel, falling back to `guild_id` for guild channels sent
    /// without one
    #[must_use]
    pub fn into_channel(self, guild_id: Option<Snowflake>) -> Channel {
        Channel {
            id: self.id,
            guild_id: self.guild_id.or(guild_id),
            name: self.name,
            channel_type: ChannelType::from(self.channel_type),
        }
    }
}

// === Guild Events ===

/// GUILD_CREATE event payload
///
/// Sent for each guild on connect, or when joining a new guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildCreateEvent {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
}

impl GuildCreateEvent {
    /// Split into the guild snapshot and its channels
    #[must_use]
    pub fn into_parts(self) -> (Guild, Vec<Channel>) {
        let mut guild = Guild::new(self.id, self.name, self.owner_id);
        guild.members = self.members.into_iter().map(GuildMember::from).collect();

        let channels = self
            .channels
            .into_iter()
            .map(|c| c.into_channel(Some(self.id)))
            .collect();

        (guild, channels)
    }
}

/// GUILD_DELETE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildDeleteEvent {
    pub id: Snowflake,
    /// If true, this is a temporary outage; if false, the bot left/was kicked/guild was deleted
    #[serde(default)]
    pub unavailable: bool,
}

// === Message Events ===

/// MESSAGE_CREATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreateEvent {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    pub author: UserPayload,
    pub content: String,
}

impl From<MessageCreateEvent> for Message {
    fn from(event: MessageCreateEvent) -> Self {
        let message = Message::new(event.id, event.channel_id, event.author.into(), event.content);
        match event.guild_id {
            Some(guild_id) => message.in_guild(guild_id),
            None => message,
        }
    }
}

// === Member Events ===

/// GUILD_MEMBER_ADD event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberAddEvent {
    pub guild_id: Snowflake,
    #[serde(flatten)]
    pub member: MemberPayload,
}

/// GUILD_MEMBER_REMOVE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildMemberRemoveEvent {
    pub guild_id: Snowflake,
    pub user: UserPayload,
}
