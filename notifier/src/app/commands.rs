//! Command registry
//!
//! Maps chat command names to async handlers. A message invokes a command
//! when its first token is the command name, with or without a leading `/`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::Session;

/// Name of the free-game command
pub const FREEGAME_COMMAND: &str = "epic-freegame";
/// Description shown for the free-game command
pub const FREEGAME_DESCRIPTION: &str = "Fetch the latest Epic free games";

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, session: Arc<dyn Session>);
}

/// Public description of a registered command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
}

#[derive(Clone)]
pub struct Command {
    pub info: CommandInfo,
    pub handler: Arc<dyn CommandHandler>,
}

#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any previous one with the same name
    pub fn register(&mut self, name: &str, description: &str, handler: Arc<dyn CommandHandler>) {
        self.commands.retain(|c| c.info.name != name);
        self.commands.push(Command {
            info: CommandInfo {
                name: name.to_string(),
                description: description.to_string(),
            },
            handler,
        });
    }

    /// Find the command a message text invokes, if any
    pub fn find(&self, text: &str) -> Option<&Command> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/').unwrap_or(token);
        self.commands.iter().find(|c| c.info.name == name)
    }

    pub fn list(&self) -> Vec<CommandInfo> {
        self.commands.iter().map(|c| c.info.clone()).collect()
    }
}
