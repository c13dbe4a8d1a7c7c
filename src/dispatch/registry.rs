//! Handler Registry
//!
//! Commands are registered on a [`RegistryBuilder`] during startup. Building
//! yields an immutable [`HandlerRegistry`] that the dispatcher shares across
//! workers without locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::types::ChatId;

use super::args::extract_argument;
use crate::core::{ArgumentError, HandlerResult, RegistryError, TransportError};
use crate::transport::{Reply, Transport};

/// Everything a handler gets for one invocation.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub chat_id: ChatId,
    /// Raw message text, including the command token
    pub text: &'a str,
    pub transport: &'a dyn Transport,
}

impl<'a> CommandContext<'a> {
    pub fn new(chat_id: ChatId, text: &'a str, transport: &'a dyn Transport) -> Self {
        Self {
            chat_id,
            text,
            transport,
        }
    }

    /// Argument of the command, see [`extract_argument`].
    pub fn argument(&self) -> Result<&'a str, ArgumentError> {
        extract_argument(self.text)
    }

    /// Sends a reply to the originating chat.
    pub async fn reply(&self, reply: Reply) -> Result<(), TransportError> {
        self.transport.send(self.chat_id, reply).await
    }
}

/// One command implementation.
///
/// A handler either completes by sending its reply or returns an error; it
/// never sends a reply and then reports failure for the same work, with the
/// exception of the usage reply that accompanies [`crate::core::HandlerError::BadArgument`].
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// One-line description for the command menu.
    fn description(&self) -> &'static str;

    /// Placeholder shown after the command name, e.g. `<dir_path>`.
    fn argument_hint(&self) -> Option<&'static str> {
        None
    }

    async fn handle(&self, ctx: CommandContext<'_>) -> HandlerResult;
}

/// Public listing entry for a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub argument_hint: Option<&'static str>,
    pub description: &'static str,
}

impl CommandInfo {
    /// `/name <hint>` as shown by help.
    pub fn usage_line(&self) -> String {
        match self.argument_hint {
            Some(hint) => format!("/{} {}", self.name, hint),
            None => format!("/{}", self.name),
        }
    }
}

struct Entry {
    info: CommandInfo,
    handler: Arc<dyn CommandHandler>,
}

/// Collects registrations before the dispatcher starts.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`. Names are case-sensitive and unique.
    ///
    /// # Errors
    /// * `RegistryError::Duplicate` - `name` was registered before
    /// * `RegistryError::InvalidName` - `name` is empty or contains `/`, `@` or whitespace
    pub fn register<H>(&mut self, name: &str, handler: H) -> Result<&mut Self, RegistryError>
    where
        H: CommandHandler + 'static,
    {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '/' || c == '@') {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.entries.iter().any(|entry| entry.info.name == name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }

        let info = CommandInfo {
            name: name.to_string(),
            argument_hint: handler.argument_hint(),
            description: handler.description(),
        };
        self.entries.push(Entry {
            info,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    /// Commands registered so far, in registration order.
    pub fn commands(&self) -> Vec<CommandInfo> {
        self.entries.iter().map(|entry| entry.info.clone()).collect()
    }

    pub fn build(self) -> HandlerRegistry {
        let mut lookup = HashMap::with_capacity(self.entries.len());
        let mut commands = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            lookup.insert(entry.info.name.clone(), entry.handler);
            commands.push(entry.info);
        }
        HandlerRegistry { lookup, commands }
    }
}

/// Read-only command name → handler mapping.
pub struct HandlerRegistry {
    lookup: HashMap<String, Arc<dyn CommandHandler>>,
    commands: Vec<CommandInfo>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.lookup.get(name).cloned()
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &[CommandInfo] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter().map(|c| &c.name)).finish()
    }
}
