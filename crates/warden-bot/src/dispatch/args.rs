//! Command line splitting and mention extraction

use warden_core::Snowflake;

use crate::commands::Mentions;

/// A single mention token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    /// `<@id>` or `<@!id>`
    User(Snowflake),
    /// `<#id>`
    Channel(Snowflake),
    /// `<@&id>`
    Role(Snowflake),
}

/// Parse a whole token as mention markup
pub fn parse_mention(token: &str) -> Option<Mention> {
    let inner = token.strip_prefix('<')?.strip_suffix('>')?;

    if let Some(id) = inner.strip_prefix("@&") {
        parse_id(id).map(Mention::Role)
    } else if let Some(id) = inner.strip_prefix("@!") {
        parse_id(id).map(Mention::User)
    } else if let Some(id) = inner.strip_prefix('@') {
        parse_id(id).map(Mention::User)
    } else if let Some(id) = inner.strip_prefix('#') {
        parse_id(id).map(Mention::Channel)
    } else {
        None
    }
}

fn parse_id(id: &str) -> Option<Snowflake> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Snowflake::parse(id).ok()
}

/// Split text after the prefix into the command name and the rest.
///
/// The name runs up to the first whitespace character.
pub fn split_command(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

/// Split the argument text on the command's delimiter; pieces are trimmed and
/// empty pieces dropped
pub fn split_args(text: &str, delim: &str) -> Vec<String> {
    if delim.trim().is_empty() {
        return text.split_whitespace().map(str::to_string).collect();
    }

    text.split(delim)
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pull mention tokens out of the argument list
pub fn extract_mentions(raw_args: &[String]) -> (Vec<String>, Mentions) {
    let mut args = Vec::with_capacity(raw_args.len());
    let mut mentions = Mentions::default();

    for arg in raw_args {
        match parse_mention(arg) {
            Some(Mention::User(id)) => mentions.users.push(id),
            Some(Mention::Channel(id)) => mentions.channels.push(id),
            Some(Mention::Role(id)) => mentions.roles.push(id),
            None => args.push(arg.clone()),
        }
    }

    (args, mentions)
}
