//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::{OutgoingMessage, User};
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for console sessions
pub const CONSOLE_CHAT_ID: i64 = 0;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                username: "console".to_string(),
            },
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// The local user every console line is attributed to
    pub fn console_user() -> User {
        User::new(CONSOLE_CHAT_ID).with_username("console")
    }

    /// Next trimmed line from stdin, or `None` at end of input
    pub async fn read_line(&self) -> Option<String> {
        match self.lines.lock().await.next_line().await {
            Ok(line) => line.map(|l| l.trim().to_string()),
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    /// Text written for a reply
    pub fn render(message: &OutgoingMessage) -> String {
        format!("[BOT] {}", message.body)
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<String, BotError> {
        println!("{}", Self::render(message));
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_body_with_prefix() {
        let reply = OutgoingMessage::rich(CONSOLE_CHAT_ID, "<code>0</code>");
        assert_eq!(ConsoleAdapter::render(&reply), "[BOT] <code>0</code>");
    }

    #[test]
    fn console_user_has_username() {
        let user = ConsoleAdapter::console_user();
        assert_eq!(user.id, CONSOLE_CHAT_ID);
        assert_eq!(user.handle(), "console");
    }
}
