use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::SlackConfig;
use crate::models::{Annotation, Distance, Listing};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Serialize, Debug)]
struct PostMessagePayload<'a> {
    channel: &'a str,
    text: &'a str,
    username: &'a str,
    icon_emoji: &'a str,
}

#[derive(Deserialize, Debug)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// One-line summary of an annotated listing.
pub fn format_listing(listing: &Listing, annotation: &Annotation) -> String {
    format!(
        "{} | {} | Grocery: {} km | Work: {} km | {} | <{}>",
        annotation.region,
        listing.price,
        Distance(annotation.poi_distance_km),
        Distance(annotation.reference_distance_km),
        listing.name,
        listing.url
    )
}

pub struct SlackClient {
    token: String,
    settings: SlackConfig,
    url: String,
    client: reqwest::Client,
}

impl SlackClient {
    pub fn new(token: String, settings: SlackConfig) -> Self {
        Self {
            token,
            settings,
            url: POST_MESSAGE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub async fn post_message(&self, text: &str) -> Result<()> {
        let payload = PostMessagePayload {
            channel: &self.settings.channel,
            text,
            username: &self.settings.username,
            icon_emoji: &self.settings.icon_emoji,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            error!("Failed to post Slack message: {}", error_text);
            anyhow::bail!("Slack post failed: {}", error_text);
        }

        // Slack reports API errors with a 200 and "ok": false
        let body: PostMessageResponse = response.json().await?;
        if !body.ok {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_string());
            error!("Slack rejected message: {}", reason);
            anyhow::bail!("Slack post failed: {}", reason);
        }

        info!("Posted listing to {}", self.settings.channel);
        Ok(())
    }
}
