//! Test fixtures and data generators
//!
//! Gateway events in their wire form, one JSON object per line.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use warden_bot::GatewayEvent;
use warden_core::Snowflake;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for message IDs
static MESSAGE_ID: AtomicI64 = AtomicI64::new(1_000);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const GUILD: Snowflake = Snowflake::new(1);
pub const GENERAL: Snowflake = Snowflake::new(5);
pub const WELCOME: Snowflake = Snowflake::new(6);
pub const DM: Snowflake = Snowflake::new(9);
pub const OWNER: Snowflake = Snowflake::new(10);
pub const ALICE: Snowflake = Snowflake::new(20);
pub const BOB: Snowflake = Snowflake::new(30);

/// A user in wire form
pub fn user(id: Snowflake, username: &str) -> Value {
    json!({ "id": id, "username": username, "discriminator": "0001" })
}

/// GUILD_CREATE for guild 1 with `#general`, `#welcome`, the owner and Alice
pub fn guild_create() -> Value {
    json!({
        "t": "GUILD_CREATE",
        "d": {
            "id": GUILD,
            "name": "Test Guild",
            "owner_id": OWNER,
            "channels": [
                { "id": GENERAL, "name": "general", "type": 0 },
                { "id": WELCOME, "name": "welcome", "type": 0 }
            ],
            "members": [
                { "user": user(OWNER, "owner") },
                { "user": user(ALICE, "alice"), "nickname": "Ali" }
            ]
        }
    })
}

pub fn guild_delete(unavailable: bool) -> Value {
    json!({ "t": "GUILD_DELETE", "d": { "id": GUILD, "unavailable": unavailable } })
}

/// A guild message from `author` in `#general`
pub fn message(author: Snowflake, content: &str) -> Value {
    json!({
        "t": "MESSAGE_CREATE",
        "d": {
            "id": Snowflake::new(MESSAGE_ID.fetch_add(1, Ordering::SeqCst)),
            "channel_id": GENERAL,
            "guild_id": GUILD,
            "author": user(author, "author"),
            "content": content
        }
    })
}

/// A direct message from `author`
pub fn direct_message(author: Snowflake, content: &str) -> Value {
    json!({
        "t": "MESSAGE_CREATE",
        "d": {
            "id": Snowflake::new(MESSAGE_ID.fetch_add(1, Ordering::SeqCst)),
            "channel_id": DM,
            "author": user(author, "author"),
            "content": content
        }
    })
}

pub fn member_add(id: Snowflake, username: &str, joined_at: DateTime<Utc>) -> Value {
    json!({
        "t": "GUILD_MEMBER_ADD",
        "d": { "guild_id": GUILD, "user": user(id, username), "joined_at": joined_at }
    })
}

pub fn member_remove(id: Snowflake, username: &str) -> Value {
    json!({ "t": "GUILD_MEMBER_REMOVE", "d": { "guild_id": GUILD, "user": user(id, username) } })
}

/// Parse a fixture into an event
pub fn event(value: Value) -> GatewayEvent {
    serde_json::from_value(value).expect("fixture is a valid gateway event")
}

/// Join fixtures into newline-delimited input
pub fn lines(values: impl IntoIterator<Item = Value>) -> String {
    values
        .into_iter()
        .map(|v| format!("{v}\n"))
        .collect()
}
