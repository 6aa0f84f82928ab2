//! Message parser - Extracts the command keyword from raw message text

use crate::domain::entities::{IncomingMessage, User};

/// Telegram command prefix
pub const COMMAND_PREFIX: char = '/';

/// Parses incoming text into commands addressed to this bot
pub struct MessageParser {
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new() -> Self {
        Self { bot_username: None }
    }

    /// Accept `/cmd@<username>` only when it names this bot
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Extract the lowercased command name from `text`, ignoring arguments.
    /// Returns `None` for plain text and for commands aimed at other bots.
    pub fn parse_command(&self, text: &str) -> Option<String> {
        let token = text.strip_prefix(COMMAND_PREFIX)?.split_whitespace().next()?;

        let name = match token.split_once('@') {
            Some((name, target)) => {
                let ours = self
                    .bot_username
                    .as_deref()
                    .is_some_and(|own| own.eq_ignore_ascii_case(target));
                if !ours {
                    tracing::debug!("Ignoring command addressed to @{}", target);
                    return None;
                }
                name
            }
            None => token,
        };

        if name.is_empty() {
            return None;
        }
        Some(name.to_lowercase())
    }

    /// Parse a text message from `sender` in `chat_id`
    pub fn parse(&self, chat_id: i64, text: &str, sender: User) -> Option<IncomingMessage> {
        self.parse_command(text)
            .map(|command| IncomingMessage::new(chat_id, sender, command))
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_command() {
        let parser = MessageParser::new();
        assert_eq!(parser.parse_command("/start").as_deref(), Some("start"));
        assert_eq!(parser.parse_command("/ID").as_deref(), Some("id"));
    }

    #[test]
    fn ignores_arguments() {
        let parser = MessageParser::new();
        assert_eq!(parser.parse_command("/start ref_123 extra").as_deref(), Some("start"));
    }

    #[test]
    fn ignores_non_commands() {
        let parser = MessageParser::new();
        assert_eq!(parser.parse_command("hello"), None);
        assert_eq!(parser.parse_command(" /start"), None);
        assert_eq!(parser.parse_command("/"), None);
        assert_eq!(parser.parse_command(""), None);
    }

    #[test]
    fn accepts_own_mention_only() {
        let parser = MessageParser::new().with_bot_username("EkehiTaskBot");
        assert_eq!(parser.parse_command("/help@ekehitaskbot").as_deref(), Some("help"));
        assert_eq!(parser.parse_command("/help@OtherBot"), None);
        assert_eq!(parser.parse_command("/@EkehiTaskBot"), None);
    }

    #[test]
    fn mention_without_known_username_is_ignored() {
        let parser = MessageParser::new();
        assert_eq!(parser.parse_command("/id@EkehiTaskBot"), None);
    }

    #[test]
    fn parse_builds_incoming_message() {
        let parser = MessageParser::new();
        let msg = parser.parse(-5, "/id", User::new(11)).unwrap();
        assert_eq!(msg.chat_id, -5);
        assert_eq!(msg.sender.id, 11);
        assert_eq!(msg.command, "id");
        assert!(parser.parse(-5, "just text", User::new(11)).is_none());
    }
}
