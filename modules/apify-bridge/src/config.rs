use std::env;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{BridgeError, Result};

/// Path on this bridge that Apify posts run completions to.
pub const CALLBACK_PATH: &str = "/webhooks/apify";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Apify
    pub apify_api_key: String,
    pub apify_base_url: String,

    // Callbacks
    pub public_webhook_url: String,
    pub webhook_secret: Option<String>,

    // Chat platform
    pub platform_events_url: Option<String>,
    pub platform_api_token: Option<String>,

    // Web server
    pub host: String,
    pub port: u16,

    pub http_connect_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BridgeError::Config(format!("{key} environment variable is required")))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match optional("BRIDGE_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| BridgeError::Config(format!("BRIDGE_PORT must be a number, got {raw:?}")))?,
            None => 3000,
        };
        let connect_timeout_secs = match optional("HTTP_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                BridgeError::Config(format!("HTTP_CONNECT_TIMEOUT_SECS must be a number, got {raw:?}"))
            })?,
            None => 10,
        };

        let public_webhook_url = required("PUBLIC_WEBHOOK_URL")?;
        url::Url::parse(&public_webhook_url)
            .map_err(|e| BridgeError::Config(format!("PUBLIC_WEBHOOK_URL is not a valid URL: {e}")))?;

        Ok(Self {
            apify_api_key: required("APIFY_API_KEY")?,
            apify_base_url: optional("APIFY_BASE_URL")
                .unwrap_or_else(|| apify_client::DEFAULT_BASE_URL.to_string()),
            public_webhook_url,
            webhook_secret: optional("WEBHOOK_SECRET"),
            platform_events_url: optional("PLATFORM_EVENTS_URL"),
            platform_api_token: optional("PLATFORM_API_TOKEN"),
            host: optional("BRIDGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            http_connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    /// The URL Apify should call when a run succeeds. Carries the webhook
    /// secret as a `secret` query parameter when one is configured.
    pub fn callback_url(&self) -> Result<String> {
        let mut url = url::Url::parse(&self.public_webhook_url)
            .map_err(|e| BridgeError::Config(format!("PUBLIC_WEBHOOK_URL is not a valid URL: {e}")))?;

        let path = format!("{}{}", url.path().trim_end_matches('/'), CALLBACK_PATH);
        url.set_path(&path);
        if let Some(secret) = &self.webhook_secret {
            url.query_pairs_mut().append_pair("secret", secret);
        }
        Ok(url.to_string())
    }

    /// Log the effective configuration with secrets masked.
    pub fn log_redacted(&self) {
        info!(
            apify_base_url = %self.apify_base_url,
            apify_api_key = %redact(&self.apify_api_key),
            public_webhook_url = %self.public_webhook_url,
            webhook_secret = self.webhook_secret.is_some(),
            platform_events_url = self.platform_events_url.as_deref().unwrap_or("<none>"),
            platform_api_token = self.platform_api_token.is_some(),
            host = %self.host,
            port = self.port,
            "Loaded config"
        );
        if self.webhook_secret.is_none() {
            warn!("WEBHOOK_SECRET not set; inbound callbacks are not authenticated");
        }
    }
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
