//! Guild entity - the gateway's snapshot of a guild

use super::GuildMember;
use crate::value_objects::Snowflake;

/// Guild (server) snapshot, including its current member list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub members: Vec<GuildMember>,
}

impl Guild {
    /// Create a new Guild with no members
    pub fn new(id: Snowflake, name: impl Into<String>, owner_id: Snowflake) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
            members: Vec::new(),
        }
    }

    /// Find a member by user ID
    pub fn member(&self, user_id: Snowflake) -> Option<&GuildMember> {
        self.members.iter().find(|m| m.id() == user_id)
    }

    /// Add or replace a member in the snapshot
    pub fn upsert_member(&mut self, member: GuildMember) {
        match self.members.iter_mut().find(|m| m.id() == member.id()) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
    }

    /// Remove a member from the snapshot
    pub fn remove_member(&mut self, user_id: Snowflake) {
        self.members.retain(|m| m.id() != user_id);
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
