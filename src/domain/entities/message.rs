use super::User;

/// How the transport should render a message body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatting {
    #[default]
    PlainText,
    /// HTML markup (`<b>`, `<code>`) rendered by the client
    RichText,
}

impl Formatting {
    /// Bot API `parse_mode` value, if any
    pub fn parse_mode(&self) -> Option<&'static str> {
        match self {
            Formatting::PlainText => None,
            Formatting::RichText => Some("HTML"),
        }
    }
}

/// A command received from a chat. Built per update and dropped after handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel replies are addressed to
    pub chat_id: i64,
    pub sender: User,
    /// Command keyword without the leading slash, lowercased
    pub command: String,
}

impl IncomingMessage {
    pub fn new(chat_id: i64, sender: User, command: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender,
            command: command.into(),
        }
    }

    /// Command sent in a private chat, where the chat id is the sender id
    pub fn private(sender: User, command: impl Into<String>) -> Self {
        Self::new(sender.id, sender, command)
    }
}

/// A reply handed to the transport for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub recipient_id: i64,
    pub body: String,
    pub formatting: Formatting,
}

impl OutgoingMessage {
    pub fn new(recipient_id: i64, body: impl Into<String>) -> Self {
        Self {
            recipient_id,
            body: body.into(),
            formatting: Formatting::PlainText,
        }
    }

    pub fn rich(recipient_id: i64, body: impl Into<String>) -> Self {
        Self::new(recipient_id, body).with_formatting(Formatting::RichText)
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }
}
