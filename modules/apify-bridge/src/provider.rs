//! The seam between the bridge and Apify. `ApifyClient` is the production
//! implementation; tests substitute an in-memory fake.

use async_trait::async_trait;

use apify_client::{ApifyClient, NewWebhook, Result, RunData, User, Webhook, WebhookUpdate};

#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>>;

    /// Start an actor run with an already-serialized input.
    async fn start_actor(&self, actor_id: &str, input: &serde_json::Value) -> Result<RunData>;

    async fn create_webhook(&self, webhook: &NewWebhook) -> Result<Webhook>;

    async fn update_webhook(&self, webhook_id: &str, update: &WebhookUpdate) -> Result<Webhook>;

    async fn delete_webhook(&self, webhook_id: &str) -> Result<()>;

    /// Raw dataset items, passed through untouched.
    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>>;
}

#[async_trait]
impl ScrapeProvider for ApifyClient {
    async fn current_user(&self) -> Result<Option<User>> {
        ApifyClient::current_user(self).await
    }

    async fn start_actor(&self, actor_id: &str, input: &serde_json::Value) -> Result<RunData> {
        ApifyClient::start_actor(self, actor_id, input).await
    }

    async fn create_webhook(&self, webhook: &NewWebhook) -> Result<Webhook> {
        ApifyClient::create_webhook(self, webhook).await
    }

    async fn update_webhook(&self, webhook_id: &str, update: &WebhookUpdate) -> Result<Webhook> {
        ApifyClient::update_webhook(self, webhook_id, update).await
    }

    async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        ApifyClient::delete_webhook(self, webhook_id).await
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>> {
        self.get_dataset_items(dataset_id).await
    }
}
