//! One-shot Apify webhooks: create, stamp with their own id, delete after use.
//!
//! The payload template is what Apify posts back on completion. Apify does not
//! know the conversation or the scrape kind, so both are baked into the
//! template, and after creation the template is rewritten to also carry the
//! webhook's own id so the callback handler can delete it.

use tracing::{error, info, warn};

use apify_client::{NewWebhook, Webhook, WebhookUpdate};

use crate::error::{BridgeError, Result};
use crate::provider::ScrapeProvider;

/// Apify substitutes the run object here.
const RESOURCE_PLACEHOLDER: &str = "{{resource}}";

/// Template sent on creation, before the webhook id is known.
pub fn initial_template(conversation_id: &str, scraping_type: &str) -> String {
    format!(
        r#"{{"conversationId": {}, "scrapingType": {}, "resource":{}}}"#,
        json_string(conversation_id),
        json_string(scraping_type),
        RESOURCE_PLACEHOLDER,
    )
}

/// Template written back once Apify has assigned `webhook_id`.
pub fn stamped_template(webhook_id: &str, conversation_id: &str, scraping_type: &str) -> String {
    format!(
        r#"{{"webhookId": {}, "conversationId": {}, "scrapingType": {}, "resource":{}}}"#,
        json_string(webhook_id),
        json_string(conversation_id),
        json_string(scraping_type),
        RESOURCE_PLACEHOLDER,
    )
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Create a webhook for the next successful run of `actor_id` and stamp it
/// with its own id.
///
/// If the stamping update fails the webhook is deleted again, since its
/// callback would carry no id and could never clean itself up.
///
/// Apify's condition is the `actorId` alone. Concurrent runs of the same
/// actor therefore fire every webhook registered for it, and the first
/// success reports into each pending conversation.
pub async fn register(
    provider: &dyn ScrapeProvider,
    callback_url: &str,
    actor_id: &str,
    conversation_id: &str,
    scraping_type: &str,
) -> Result<Webhook> {
    info!(actor_id, scraping_type, "Subscribing to Apify webhook");

    let new_hook = NewWebhook::on_run_succeeded(
        callback_url,
        actor_id,
        initial_template(conversation_id, scraping_type),
    );
    let created = provider.create_webhook(&new_hook).await.map_err(|e| {
        error!(error = %e, actor_id, "Webhook subscription failed");
        BridgeError::Registration(format!("create: {e}"))
    })?;
    info!(webhook_id = %created.id, "Webhook created");

    let update = WebhookUpdate {
        payload_template: stamped_template(&created.id, conversation_id, scraping_type),
    };
    match provider.update_webhook(&created.id, &update).await {
        Ok(updated) => {
            info!(webhook_id = %updated.id, "Webhook stamped with its id");
            Ok(updated)
        }
        Err(e) => {
            error!(error = %e, webhook_id = %created.id, "Webhook update failed, removing it");
            if let Err(cleanup) = provider.delete_webhook(&created.id).await {
                warn!(error = %cleanup, webhook_id = %created.id, "Failed to remove unstamped webhook");
            }
            Err(BridgeError::Registration(format!("update: {e}")))
        }
    }
}

pub async fn unregister(provider: &dyn ScrapeProvider, webhook_id: &str) -> Result<()> {
    provider.delete_webhook(webhook_id).await?;
    info!(webhook_id, "Webhook deleted");
    Ok(())
}
