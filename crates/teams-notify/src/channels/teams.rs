//! Microsoft Teams incoming-webhook delivery channel.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::AlertChannel;
use crate::card::MessageCard;
use crate::error::ChannelError;

/// Environment variable for the Teams incoming webhook URL.
const ENV_TEAMS_WEBHOOK_URL: &str = "TEAMS_WEBHOOK_URL";

/// Teams incoming-webhook delivery channel.
///
/// Posts a [`MessageCard`] to the configured webhook. Delivery is a single
/// attempt; retry policy belongs to the hosting pipeline.
pub struct TeamsChannel {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl TeamsChannel {
    /// Create a new Teams channel from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let webhook_url = std::env::var(ENV_TEAMS_WEBHOOK_URL).ok();

        if webhook_url.is_some() {
            debug!("Teams notifications enabled");
        } else {
            debug!("Teams notifications disabled (TEAMS_WEBHOOK_URL not set)");
        }

        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a Teams channel with a specific webhook URL.
    #[must_use]
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url: Some(webhook_url),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AlertChannel for TeamsChannel {
    fn name(&self) -> &'static str {
        "teams"
    }

    fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn send(&self, card: &MessageCard) -> Result<(), ChannelError> {
        let webhook_url = self
            .webhook_url
            .as_ref()
            .ok_or_else(|| ChannelError::NotConfigured("TEAMS_WEBHOOK_URL".to_string()))?;

        debug!(channel = "teams", summary = %card.summary, "Sending alert card");

        let response = self.client.post(webhook_url).json(card).send().await?;

        if response.status().is_success() {
            debug!(channel = "teams", "Alert card sent successfully");
            Ok(())
        } else if response.status() == 429 {
            // Rate limited
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);

            warn!(
                channel = "teams",
                retry_after_secs = retry_after,
                "Rate limited by Teams"
            );

            Err(ChannelError::RateLimited {
                retry_after_secs: retry_after,
            })
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                channel = "teams",
                status = %status,
                body = %body,
                "Teams webhook request failed"
            );

            Err(ChannelError::Other(format!(
                "Teams returned {status}: {body}"
            )))
        }
    }
}
