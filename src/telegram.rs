//! Minimal Telegram Bot API sink
//!
//! The bot posts one message at startup (unless a message id is already
//! configured) and edits it in place on every cycle.

use crate::error::TelegramError;
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.telegram.org";

/// Envelope every Bot API method returns
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default = "Option::default")]
    result: Option<T>,
    #[serde(default = "Option::default")]
    description: Option<String>,
}

/// Subset of the Message object the bot reads
#[derive(Debug, Deserialize)]
struct Message {
    message_id: i64,
}

/// Client for a single bot token
pub struct TelegramClient {
    http: reqwest::Client,
    base: String,
}

impl TelegramClient {
    /// Create a client for `token`
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, TelegramError> {
        Self::with_base_url(API_BASE, token, timeout_secs)
    }

    /// Create a client against a non-default API host (used by tests)
    pub fn with_base_url(
        base: &str,
        token: &str,
        timeout_secs: u64,
    ) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base: format!("{}/bot{}", base.trim_end_matches('/'), token),
        })
    }

    /// Post a new message to `chat_id`, returning its message id
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<i64, TelegramError> {
        let message: Message = self
            .call(
                "sendMessage",
                serde_json::json!({
                    "chat_id": chat_id,
                    "text": text,
                }),
            )
            .await?;

        Ok(message.message_id)
    }

    /// Edit an existing message in place, with Markdown formatting
    pub async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> Result<(), TelegramError> {
        let _: Message = self
            .call(
                "editMessageText",
                serde_json::json!({
                    "chat_id": chat_id,
                    "message_id": message_id,
                    "text": text,
                    "parse_mode": "Markdown",
                }),
            )
            .await?;

        Ok(())
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, TelegramError> {
        let url = format!("{}/{}", self.base, method);
        let response = self.http.post(&url).json(&body).send().await?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::InvalidResponse(format!("{method}: {e}")))?;

        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| format!("{method} failed with no description")),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::InvalidResponse(format!("{method}: ok but no result")))
    }
}
