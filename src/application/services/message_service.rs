use crate::application::errors::BotError;
use crate::application::messaging::CommandDispatcher;
use crate::domain::entities::IncomingMessage;
use crate::domain::traits::Bot;

/// Handles one inbound command: build the reply and hand it to the bot
pub struct MessageService<B: Bot> {
    bot: B,
    dispatcher: CommandDispatcher,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, dispatcher: CommandDispatcher) -> Self {
        Self { bot, dispatcher }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Reply to `message` and wait for delivery. Returns the sent message id,
    /// or `None` when no command matched. Send errors are returned as-is.
    pub async fn process(&self, message: &IncomingMessage) -> Result<Option<String>, BotError> {
        let Some(reply) = self.dispatcher.dispatch(message) else {
            return Ok(None);
        };

        tracing::info!("Handling /{} for chat {}", message.command, message.chat_id);
        self.bot.send_message(&reply).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Formatting, OutgoingMessage, User};
    use crate::domain::traits::BotInfo;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every message instead of delivering it
    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<OutgoingMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn start(&self) -> Result<(), BotError> {
            Ok(())
        }

        async fn send_message(&self, message: &OutgoingMessage) -> Result<String, BotError> {
            if self.fail {
                return Err(BotError::Network("connection reset".to_string()));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            Ok(sent.len().to_string())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                username: "test_bot".to_string(),
            }
        }
    }

    #[tokio::test]
    async fn sends_exactly_one_reply() {
        let service = MessageService::new(RecordingBot::default(), CommandDispatcher::new());
        let msg = IncomingMessage::private(User::new(123456789).with_username("alice"), "start");

        let id = service.process(&msg).await.unwrap();
        assert_eq!(id.as_deref(), Some("1"));

        let sent = service.bot().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, 123456789);
        assert_eq!(sent[0].formatting, Formatting::RichText);
        assert!(sent[0].body.contains("<code>123456789</code>"));
    }

    #[tokio::test]
    async fn unknown_command_sends_nothing() {
        let service = MessageService::new(RecordingBot::default(), CommandDispatcher::new());
        let msg = IncomingMessage::private(User::new(1), "unknown");

        assert!(service.process(&msg).await.unwrap().is_none());
        assert!(service.bot().sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_error_is_returned() {
        let bot = RecordingBot { fail: true, ..Default::default() };
        let service = MessageService::new(bot, CommandDispatcher::new());
        let msg = IncomingMessage::private(User::new(1), "help");

        let err = service.process(&msg).await.unwrap_err();
        assert!(matches!(err, BotError::Network(_)));
    }
}
