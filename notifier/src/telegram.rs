use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{AlertSink, NotifyError};

const TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,

    #[serde(default)]
    description: Option<String>,
}

/// Sends alerts to a single Telegram chat via the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Result<Self, NotifyError> {
        Self::with_base_url(TELEGRAM_API.to_string(), bot_token, chat_id)
    }

    /// Base URL override, used by tests.
    pub fn with_base_url(
        base_url: String,
        bot_token: String,
        chat_id: String,
    ) -> Result<Self, NotifyError> {
        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            http,
            base_url,
            bot_token,
            chat_id,
        })
    }
}

#[async_trait]
impl AlertSink for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: SendMessageResponse = resp.json().await?;
        if !body.ok {
            return Err(NotifyError::Rejected(
                body.description.unwrap_or_else(|| "no description".into()),
            ));
        }

        debug!(chat_id = %self.chat_id, "alert delivered");
        Ok(())
    }
}
