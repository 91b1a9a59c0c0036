//! Bot commands
//!
//! The command contract, the registry, and the built-in commands.

mod command;
mod error;
mod general;
mod moderation;
mod registry;

pub use command::{Command, CommandContext, CommandFlags, Mentions};
pub use error::{CommandError, CommandResult};
pub use general::{PingCommand, PrefixCommand, UnknownCommand};
pub use moderation::{parse_duration, ModerationCommand};
pub use registry::CommandRegistry;
