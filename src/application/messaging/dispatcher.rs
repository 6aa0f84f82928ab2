//! Command dispatcher - Routes commands to reply handlers

use crate::application::replies;
use crate::domain::entities::{Command, CommandRegistry, IncomingMessage, OutgoingMessage};

/// Maps command keywords to their handlers
pub struct CommandDispatcher {
    registry: CommandRegistry,
}

impl CommandDispatcher {
    /// Empty dispatcher with no commands
    pub fn empty() -> Self {
        Self {
            registry: CommandRegistry::new(),
        }
    }

    /// Dispatcher with `/start`, `/id` and `/help` registered
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register_defaults();
        dispatcher
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("start")
            .with_description("Get your Telegram ID")
            .with_handler(replies::handle_start));

        self.register(Command::new("id")
            .with_description("Get your Telegram ID again")
            .with_handler(replies::handle_id));

        self.register(Command::new("help")
            .with_description("Show help message")
            .with_handler(replies::handle_help));
    }

    /// Build the reply for `message`, or `None` when the command is unknown
    pub fn dispatch(&self, message: &IncomingMessage) -> Option<OutgoingMessage> {
        let Some(cmd) = self.registry.find(&message.command) else {
            tracing::debug!("No handler for /{}", message.command);
            return None;
        };
        cmd.handle(message)
    }

    /// Registered commands as `(name, description)` in registration order
    pub fn commands(&self) -> Vec<(&str, &str)> {
        self.registry
            .all()
            .map(|c| (c.name.as_str(), c.description.as_deref().unwrap_or("")))
            .collect()
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
