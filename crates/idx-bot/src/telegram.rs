//! Telegram Bot API client.
//!
//! Raw HTTP against `api.telegram.org`: long polling via `getUpdates`,
//! replies via `sendMessage`/`editMessageText`. All outgoing text uses
//! MarkdownV2.

use idx_core::error::NotifyError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// A single update from long polling.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// An incoming or sent message.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

/// Bot API client.
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(format!("https://api.telegram.org/bot{token}"))
    }

    /// Point the client at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            poll_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, NotifyError> {
        let params = json!({
            "offset": offset,
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message"],
        });

        let response = self
            .client
            .post(format!("{}/getUpdates", self.base_url))
            .json(&params)
            // Leave headroom over the server-side long-poll window.
            .timeout(self.poll_timeout + Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let body: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;

        if !body.ok {
            return Err(NotifyError::Api(
                body.description.unwrap_or_else(|| "getUpdates failed".to_string()),
            ));
        }

        Ok(body.result.unwrap_or_default())
    }

    /// Send a MarkdownV2 message; returns the sent message id so callers
    /// can edit it later (status placeholders during slow scans).
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, NotifyError> {
        let params = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": true,
        });

        let message: Message = self.call("sendMessage", chat_id, &params).await?;
        Ok(message.message_id)
    }

    /// Replace the text of a previously sent message.
    pub async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), NotifyError> {
        let params = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": true,
        });

        self.call::<Message>("editMessageText", chat_id, &params)
            .await?;
        Ok(())
    }

    /// Send `text` to every chat; returns the ids that have blocked the
    /// bot so the caller can prune them.
    pub async fn broadcast(&self, chat_ids: &[i64], text: &str) -> Vec<i64> {
        let mut blocked = Vec::new();
        for &chat_id in chat_ids {
            match self.send_message(chat_id, text).await {
                Ok(_) => {}
                Err(NotifyError::Blocked { chat_id }) => {
                    debug!(chat_id, "chat blocked the bot");
                    blocked.push(chat_id);
                }
                Err(e) => warn!(chat_id, error = %e, "broadcast send failed"),
            }
        }
        blocked
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        chat_id: i64,
        params: &serde_json::Value,
    ) -> Result<T, NotifyError> {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .timeout(Duration::from_secs(15))
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;

        if !body.ok {
            if body.error_code == Some(403) {
                return Err(NotifyError::Blocked { chat_id });
            }
            return Err(NotifyError::Api(
                body.description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }

        body.result
            .ok_or_else(|| NotifyError::Api(format!("{method}: empty result")))
    }
}
