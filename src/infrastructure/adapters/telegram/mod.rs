//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, IncomingMessage, OutgoingMessage};
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::BotToken;

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

impl From<&User> for entities::User {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
        }
    }
}

/// Envelope wrapping every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: BotToken,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: BotToken) -> Self {
        Self {
            token,
            client: Client::new(),
            info: BotInfo {
                username: "ekehi_id_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token.expose(), method)
    }

    /// Call a Bot API method and unwrap its response envelope
    async fn call<Req, T>(&self, method: &str, request: &Req) -> Result<T, BotError>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client
            .post(self.api_url(method))
            .json(request)
            .send()
            .await
            // The request URL embeds the token
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        Self::parse_response(method, status.as_u16(), &bytes)
    }

    /// Decode a Bot API response body
    fn parse_response<T: DeserializeOwned>(method: &str, status: u16, body: &[u8]) -> Result<T, BotError> {
        let envelope: ApiResponse<T> = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(_) if !(200..300).contains(&status) => {
                return Err(BotError::Network(format!("Telegram API error: HTTP {}", status)));
            }
            Err(e) => return Err(BotError::Parse(format!("{}: {}", method, e))),
        };

        if !envelope.ok {
            return Err(BotError::Api {
                code: envelope.error_code.unwrap_or_else(|| i64::from(status)),
                description: envelope.description.unwrap_or_default(),
            });
        }

        envelope
            .result
            .ok_or_else(|| BotError::Parse(format!("{}: missing result", method)))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            username: String,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;

        self.info = BotInfo {
            username: data.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset, keeping `current` when there are no updates
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Turn a wire message into a command for this bot, if it is one
    pub fn to_incoming(message: &Message, parser: &MessageParser) -> Option<IncomingMessage> {
        let text = message.text.as_deref()?;
        let sender = message.from.as_ref()?;
        parser.parse(message.chat.id, text, sender.into())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self, commands: &[(&str, &str)]) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<Command<'a>>,
        }

        let request = SetMyCommandsRequest {
            commands: commands
                .iter()
                .map(|&(command, description)| Command { command, description })
                .collect(),
        };

        let _: bool = self.call("setMyCommands", &request).await?;

        tracing::info!("Registered {} bot commands with Telegram", commands.len());
        Ok(())
    }
}

/// Body of a sendMessage request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

impl<'a> From<&'a OutgoingMessage> for SendMessageRequest<'a> {
    fn from(message: &'a OutgoingMessage) -> Self {
        Self {
            chat_id: message.recipient_id,
            text: &message.body,
            parse_mode: message.formatting.parse_mode(),
        }
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot @{}", self.info.username);
        Ok(())
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        tracing::debug!("Sending {} bytes to {}", message.body.len(), message.recipient_id);

        let request = SendMessageRequest::from(message);
        let data: MessageResult = self.call("sendMessage", &request).await?;

        Ok(data.message_id.to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
