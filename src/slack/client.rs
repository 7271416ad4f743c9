use anyhow::Context as _;
use reqwest::Client;
use std::env;

use crate::slack::api::Message;

/// Posts finished report documents to a Slack incoming webhook.
pub struct SlackClient {
    client: Client,
    webhook_url: String,
}

impl SlackClient {
    pub fn new_from_env() -> anyhow::Result<Self> {
        let webhook_url = env::var("SLACK_WEBHOOK_API").context("SLACK_WEBHOOK_API is missing")?;
        Ok(Self::new(webhook_url))
    }

    pub fn new(webhook_url: String) -> Self {
        SlackClient {
            client: Client::new(),
            webhook_url,
        }
    }

    pub async fn post(&self, message: &Message) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await
            .context("fail sending Slack message")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Slack webhook returned {}: {}", status, body);
        }

        Ok(())
    }
}
