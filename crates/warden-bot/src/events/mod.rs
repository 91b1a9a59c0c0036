//! Gateway events
//!
//! Defines the dispatch events the bot consumes from the gateway.

mod event_types;
mod payloads;

pub use event_types::GatewayEventType;
pub use payloads::{
    ChannelPayload, GatewayEvent, GuildCreateEvent, GuildDeleteEvent, GuildMemberAddEvent,
    GuildMemberRemoveEvent, MemberPayload, MessageCreateEvent, UserPayload,
};
