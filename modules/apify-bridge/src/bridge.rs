use std::sync::Arc;

use tracing::{error, info};

use apify_client::ApifyClient;

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::platform::{http::HttpEventSink, noop::LogEventSink, EventSink};
use crate::provider::ScrapeProvider;

/// Everything an action or callback needs: the provider, the event sink, and
/// the URL Apify should call back.
pub struct Bridge {
    pub(crate) provider: Arc<dyn ScrapeProvider>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) callback_url: String,
}

impl Bridge {
    pub fn new(
        provider: Arc<dyn ScrapeProvider>,
        events: Arc<dyn EventSink>,
        callback_url: String,
    ) -> Self {
        Self {
            provider,
            events,
            callback_url,
        }
    }

    /// Wire up the production Apify client and platform sink from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.http_connect_timeout)
            .build()
            .map_err(|e| BridgeError::Config(format!("failed to build HTTP client: {e}")))?;

        let apify = ApifyClient::new(config.apify_api_key.clone())
            .with_base_url(&config.apify_base_url)
            .with_http_client(http.clone());

        let events: Arc<dyn EventSink> = match &config.platform_events_url {
            Some(url) => {
                info!(events_url = %url, "Platform event delivery enabled");
                Arc::new(HttpEventSink::new(
                    url.clone(),
                    config.platform_api_token.clone(),
                    http,
                ))
            }
            None => {
                info!("No PLATFORM_EVENTS_URL set, completion events will only be logged");
                Arc::new(LogEventSink)
            }
        };

        Ok(Self::new(Arc::new(apify), events, config.callback_url()?))
    }

    /// Integration activation: the token must resolve to a user profile.
    pub async fn verify_credential(&self) -> Result<()> {
        match self.provider.current_user().await {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "API token verified successfully");
                Ok(())
            }
            Ok(None) => {
                error!("Error verifying API token: no user profile");
                Err(BridgeError::InvalidCredential)
            }
            Err(e) => {
                error!(error = %e, "Error verifying API token");
                Err(BridgeError::Provider(e))
            }
        }
    }

    /// Integration deactivation. Nothing is held on Apify's side between jobs.
    pub async fn unregister(&self) {
        info!("Integration unregistered");
    }
}
