//! `chat.postMessage` client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use zoilist_core::{Messenger, OutgoingMessage};

use crate::{Error, Result};

const SLACK_API: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
}

/// Slack Web API client
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, SLACK_API)
    }

    /// Point the client at another API root
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Post a message to a channel
    pub async fn post_message(&self, message: &OutgoingMessage) -> Result<()> {
        debug!(channel = %message.channel, len = message.text.len(), "Posting Slack message");

        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(Error::Slack(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Messenger for SlackClient {
    async fn post(&self, message: &OutgoingMessage) -> zoilist_core::Result<()> {
        Ok(self.post_message(message).await?)
    }
}
