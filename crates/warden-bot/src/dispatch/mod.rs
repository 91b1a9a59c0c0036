//! Message dispatch
//!
//! Turns `MESSAGE_CREATE` events into command invocations.

mod args;
mod dispatcher;

pub use args::{extract_mentions, parse_mention, split_args, split_command, Mention};
pub use dispatcher::{DispatchOutcome, EventDispatcher, IgnoreReason};
