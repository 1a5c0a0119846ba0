//! Handling of the completion callback Apify posts once a run succeeds.
//!
//! See https://docs.apify.com/platform/integrations/webhooks/events

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::platform::CompletionEvent;
use crate::registrar;

/// Body rendered from the payload template set by the registrar.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackBody {
    #[serde(rename = "webhookId")]
    pub webhook_id: Option<String>,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    #[serde(rename = "scrapingType")]
    pub scraping_type: String,
    pub resource: CallbackResource,
}

/// The subset of Apify's run object the bridge needs.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackResource {
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
}

/// Which stages of callback handling got through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackOutcome {
    pub dataset_id: String,
    pub items_fetched: Option<usize>,
    pub event_emitted: bool,
    pub webhook_deleted: bool,
}

/// Parse a callback body. Accepts a JSON object, or a JSON string that itself
/// holds the object.
pub fn parse_callback(raw: &[u8]) -> Result<CallbackBody> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    serde_json::from_value(value).map_err(|e| BridgeError::Validation(format!("callback body: {e}")))
}

impl Bridge {
    /// Fetch the run's results, publish them, then delete the webhook.
    ///
    /// Every stage is best-effort: a failure is logged and stops the later
    /// stages, but never propagates.
    pub async fn handle_callback(&self, body: CallbackBody) -> CallbackOutcome {
        let dataset_id = body.resource.default_dataset_id.clone();
        info!(
            dataset_id = %dataset_id,
            conversation_id = %body.conversation_id,
            scraping_type = %body.scraping_type,
            "Received webhook event from Apify"
        );

        let mut outcome = CallbackOutcome {
            dataset_id: dataset_id.clone(),
            ..Default::default()
        };

        let items = match self.provider.dataset_items(&dataset_id).await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, dataset_id = %dataset_id, "Failed to fetch results");
                return outcome;
            }
        };
        outcome.items_fetched = Some(items.len());

        let event = CompletionEvent::scraping_completed(
            &body.conversation_id,
            &body.scraping_type,
            &dataset_id,
            items,
        );
        if let Err(e) = self.events.emit(&event).await {
            error!(error = %e, dataset_id = %dataset_id, "Failed to create event");
            return outcome;
        }
        outcome.event_emitted = true;
        debug!(dataset_id = %dataset_id, "Apify scraping completed event created");

        let Some(webhook_id) = body.webhook_id.as_deref() else {
            warn!(dataset_id = %dataset_id, "Callback carries no webhookId, leaving webhook in place");
            return outcome;
        };
        match registrar::unregister(self.provider.as_ref(), webhook_id).await {
            Ok(()) => outcome.webhook_deleted = true,
            Err(BridgeError::Provider(e)) if e.is_not_found() => {
                warn!(webhook_id, "Webhook already deleted");
            }
            Err(e) => error!(error = %e, webhook_id, "Failed to delete webhook"),
        }

        outcome
    }
}
