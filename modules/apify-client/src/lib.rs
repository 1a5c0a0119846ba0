pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    InstagramScraperInput, NewWebhook, RunData, StartUrl, User, Webhook, WebhookCondition,
    WebhookUpdate, WebsiteCrawlerInput, YoutubeScraperInput, YoutubeTarget, ACTOR_RUN_SUCCEEDED,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

pub struct ApifyClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Replace the underlying HTTP client, e.g. one built with timeouts.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Fetch the account that owns the token. `None` when Apify returns no profile.
    pub async fn current_user(&self) -> Result<Option<User>> {
        let url = format!("{}/users/me", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let api_resp: ApiResponse<Option<User>> = read_json(resp).await?;
        Ok(api_resp.data)
    }

    /// Start an actor run. Returns immediately with run metadata; the run
    /// keeps going on Apify's side.
    pub async fn start_actor<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = read_json(resp).await?;
        tracing::debug!(actor_id, run_id = %api_resp.data.id, "Actor run started");
        Ok(api_resp.data)
    }

    pub async fn create_webhook(&self, webhook: &NewWebhook) -> Result<Webhook> {
        let url = format!("{}/webhooks", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(webhook)
            .send()
            .await?;

        let api_resp: ApiResponse<Webhook> = read_json(resp).await?;
        Ok(api_resp.data)
    }

    pub async fn update_webhook(&self, webhook_id: &str, update: &WebhookUpdate) -> Result<Webhook> {
        let url = format!("{}/webhooks/{}", self.base_url, webhook_id);
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(update)
            .send()
            .await?;

        let api_resp: ApiResponse<Webhook> = read_json(resp).await?;
        Ok(api_resp.data)
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        let url = format!("{}/webhooks/{}", self.base_url, webhook_id);
        let resp = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    /// Fetch dataset items from a run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let items: Vec<T> = read_json(resp).await?;
        Ok(items)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApifyError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(resp)
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
