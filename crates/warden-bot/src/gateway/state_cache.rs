//! Gateway state cache
//!
//! Keeps the latest guild and channel snapshots seen on the event stream so
//! handlers can resolve channels and guilds without a round trip.

use dashmap::DashMap;
use warden_core::{Channel, Guild, GuildMember, Snowflake};

use crate::events::GatewayEvent;

/// Guild and channel snapshots keyed by ID
///
/// Uses `DashMap` so the event reader and handler tasks can share it.
#[derive(Debug, Default)]
pub struct StateCache {
    guilds: DashMap<Snowflake, Guild>,
    channels: DashMap<Snowflake, Channel>,
}

impl StateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the cache before it is handled
    pub fn apply(&self, event: &GatewayEvent) {
        match event {
            GatewayEvent::GuildCreate(payload) => {
                let (guild, channels) = payload.clone().into_parts();
                self.insert_guild(guild, channels);
            }
            GatewayEvent::GuildDelete(payload) => {
                if !payload.unavailable {
                    self.remove_guild(payload.id);
                }
            }
            GatewayEvent::GuildMemberAdd(payload) => {
                self.upsert_member(payload.guild_id, payload.member.clone().into());
            }
            GatewayEvent::GuildMemberRemove(payload) => {
                self.remove_member(payload.guild_id, payload.user.id);
            }
            GatewayEvent::MessageCreate(payload) => {
                // DMs arrive without a prior channel event
                if payload.guild_id.is_none() && !self.channels.contains_key(&payload.channel_id) {
                    self.channels
                        .insert(payload.channel_id, Channel::new_dm(payload.channel_id));
                }
            }
        }
    }

    /// Store a guild snapshot along with its channels
    pub fn insert_guild(&self, guild: Guild, channels: Vec<Channel>) {
        for channel in channels {
            self.channels.insert(channel.id, channel);
        }
        tracing::debug!(guild_id = %guild.id, members = guild.member_count(), "Guild cached");
        self.guilds.insert(guild.id, guild);
    }

    /// Drop a guild and every channel that belongs to it
    pub fn remove_guild(&self, guild_id: Snowflake) {
        self.guilds.remove(&guild_id);
        self.channels
            .retain(|_, channel| channel.guild_id != Some(guild_id));
        tracing::debug!(guild_id = %guild_id, "Guild evicted");
    }

    pub fn insert_channel(&self, channel: Channel) {
        self.channels.insert(channel.id, channel);
    }

    pub fn upsert_member(&self, guild_id: Snowflake, member: GuildMember) {
        if let Some(mut guild) = self.guilds.get_mut(&guild_id) {
            guild.upsert_member(member);
        }
    }

    pub fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) {
        if let Some(mut guild) = self.guilds.get_mut(&guild_id) {
            guild.remove_member(user_id);
        }
    }

    #[must_use]
    pub fn channel(&self, channel_id: Snowflake) -> Option<Channel> {
        self.channels.get(&channel_id).map(|c| c.clone())
    }

    #[must_use]
    pub fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.guilds.get(&guild_id).map(|g| g.clone())
    }

    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}
