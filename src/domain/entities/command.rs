use super::{IncomingMessage, OutgoingMessage};

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&IncomingMessage) -> OutgoingMessage + Send + Sync>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub handler: Option<CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&IncomingMessage) -> OutgoingMessage + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input)
    }

    /// Run the handler, if one is attached
    pub fn handle(&self, message: &IncomingMessage) -> Option<OutgoingMessage> {
        self.handler.as_ref().map(|handler| handler(message))
    }
}

/// Command registry, kept in registration order
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any existing one with the same name
    pub fn register(&mut self, command: Command) {
        match self.commands.iter_mut().find(|c| c.matches(&command.name)) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
