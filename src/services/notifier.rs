// src/services/notifier.rs

//! Outbound notification service.
//!
//! Delivery is best-effort: a missing endpoint or a failed POST is logged
//! and reported as `false`, never as an error to the caller.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AppError, Result};

/// An outbound channel that can carry a text message.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Channel name for diagnostics.
    fn name(&self) -> &str;

    /// Make one delivery attempt.
    async fn deliver(&self, text: &str) -> Result<()>;
}

/// Payload accepted by Slack-style incoming webhooks.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Incoming-webhook channel (Slack compatible).
pub struct WebhookChannel {
    url: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl NotifyChannel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { text })
            .send()
            .await
            .map_err(AppError::notify_delivery)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::notify_delivery(format!(
                "webhook responded with HTTP status {status}"
            )));
        }
        Ok(())
    }
}

/// Delivers formatted messages to the configured channel, if any.
pub struct Notifier {
    channel: Option<Box<dyn NotifyChannel>>,
}

impl Notifier {
    /// Notifier without a channel; every call is a no-op.
    pub fn disabled() -> Self {
        Self { channel: None }
    }

    pub fn with_channel(channel: Box<dyn NotifyChannel>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    /// Build from an optional webhook endpoint.
    pub fn from_webhook(url: Option<&str>, client: reqwest::Client) -> Self {
        match url {
            Some(url) => Self::with_channel(Box::new(WebhookChannel::new(url, client))),
            None => Self::disabled(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.channel.is_some()
    }

    /// Attempt delivery once. Returns whether the message was delivered.
    pub async fn notify(&self, text: &str) -> bool {
        let Some(channel) = &self.channel else {
            log::info!("No webhook configured, skipping notification");
            return false;
        };

        match channel.deliver(text).await {
            Ok(()) => {
                log::info!("Notification delivered via {}", channel.name());
                true
            }
            Err(e) => {
                log::warn!("Notification via {} failed: {}", channel.name(), e);
                false
            }
        }
    }
}
