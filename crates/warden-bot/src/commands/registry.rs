//! Command registry
//!
//! Built once at startup; lookups are case-insensitive and resolve aliases.

use std::collections::HashMap;

use warden_core::ModerationKind;

use super::command::Command;
use super::general::{PingCommand, PrefixCommand, UnknownCommand};
use super::moderation::ModerationCommand;

/// Name and alias table for all commands
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
    fallback: Box<dyn Command>,
}

impl CommandRegistry {
    /// Create an empty registry; unresolved names go to `fallback`
    pub fn new(fallback: impl Command + 'static) -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Registry with all built-in commands
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new(UnknownCommand);
        for kind in ModerationKind::ALL {
            registry.register(ModerationCommand::new(kind));
        }
        registry.register(PrefixCommand).register(PingCommand);
        registry
    }

    /// Add a command. A name or alias already taken is rebound to the new command.
    pub fn register(&mut self, command: impl Command + 'static) -> &mut Self {
        let slot = self.commands.len();
        let keys = std::iter::once(command.name()).chain(command.aliases().iter().copied());

        for key in keys {
            if let Some(previous) = self.index.insert(key.to_ascii_lowercase(), slot) {
                tracing::warn!(
                    key,
                    previous = self.commands[previous].name(),
                    "Command name rebound"
                );
            }
        }

        self.commands.push(Box::new(command));
        self
    }

    /// Look up a command by name or alias
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&slot| &*self.commands[slot])
    }

    /// Look up a command, falling back to the unknown-command handler
    pub fn resolve(&self, name: &str) -> &dyn Command {
        self.get(name).unwrap_or(&*self.fallback)
    }

    /// All registered commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|command| &**command)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands().map(|c| c.name()).collect::<Vec<_>>())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}
