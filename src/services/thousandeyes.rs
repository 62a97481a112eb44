//! ThousandEyes API client
//!
//! Reads alert rules from the ThousandEyes REST API (v6). Only the listing
//! endpoint is used; the caller selects records client-side.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, error, info};

use super::AlertRuleSource;
use crate::config::ThousandEyesConfig;
use crate::models::AlertRule;

/// Longest response body excerpt included in errors
const MAX_BODY_EXCERPT: usize = 500;

/// ThousandEyes API client
#[derive(Clone)]
pub struct ThousandEyesClient {
    client: Client,
    base_url: String,
    token: String,
    account_group_id: Option<String>,
}

/// Envelope of the `/alert-rules` response
#[derive(Debug, Deserialize)]
struct AlertRulesResponse {
    #[serde(rename = "alertRules", default)]
    alert_rules: Vec<AlertRule>,
}

impl ThousandEyesClient {
    /// Create a new client from configuration
    pub fn new(config: &ThousandEyesConfig) -> Result<Self> {
        info!("Initializing ThousandEyes client for {}", config.url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            account_group_id: config
                .account_group_id
                .clone()
                .filter(|aid| !aid.is_empty()),
        })
    }

    /// Fetch every alert rule visible to the configured account group
    pub async fn get_alert_rules(&self) -> Result<Vec<AlertRule>> {
        let url = self.endpoint("alert-rules");
        let response: AlertRulesResponse = self.get(&url).await?;
        debug!(
            "ThousandEyes: received {} alert rules",
            response.alert_rules.len()
        );
        Ok(response.alert_rules)
    }

    /// Build the URL for an API resource, scoped to the account group if set
    fn endpoint(&self, resource: &str) -> String {
        match self.account_group_id {
            Some(ref aid) => format!(
                "{}/{}.json?aid={}",
                self.base_url,
                resource,
                urlencoding::encode(aid)
            ),
            None => format!("{}/{}.json", self.base_url, resource),
        }
    }

    // ==================== Helper Methods ====================

    /// Internal GET request handler
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("ThousandEyes: Sending GET request to {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("ThousandEyes ERROR: HTTP request failed to {}: {}", url, e);

                if e.is_connect() {
                    error!("ThousandEyes ERROR: Connection failed. Check:");
                    error!("  - thousandeyes.url is correct and reachable");
                    error!("  - Network/firewall allows outbound HTTPS");
                }
                if e.is_timeout() {
                    error!("ThousandEyes ERROR: Request timed out. Check:");
                    error!("  - The API is responsive");
                    error!("  - Consider increasing thousandeyes.timeout_secs");
                }

                // Walk through error chain for root cause
                let mut current: Option<&dyn StdError> = e.source();
                while let Some(cause) = current {
                    error!("ThousandEyes ERROR: Caused by: {}", cause);
                    current = cause.source();
                }

                anyhow::anyhow!("Failed to send request to {}: {}", url, e)
            })?;

        self.handle_response(response).await
    }

    /// Handle HTTP response and parse JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;
            serde_json::from_str::<T>(&body).with_context(|| {
                format!("Failed to parse response JSON: {}", excerpt(&body))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                error!("ThousandEyes ERROR: API rejected the token (401). Check thousandeyes.token");
            }
            anyhow::bail!("Request failed with status {}: {}", status, excerpt(&body));
        }
    }
}

#[async_trait]
impl AlertRuleSource for ThousandEyesClient {
    async fn get_alert_rules(&self) -> Result<Vec<AlertRule>> {
        ThousandEyesClient::get_alert_rules(self).await
    }
}

/// Truncate a response body for logging and error messages
fn excerpt(body: &str) -> String {
    if body.len() > MAX_BODY_EXCERPT {
        let mut end = MAX_BODY_EXCERPT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}
