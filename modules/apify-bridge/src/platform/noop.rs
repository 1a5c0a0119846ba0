use async_trait::async_trait;
use tracing::info;

use super::backend::EventSink;
use super::CompletionEvent;

/// Sink used when no platform is configured: logs the event and drops it.
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn emit(&self, event: &CompletionEvent) -> anyhow::Result<()> {
        info!(
            conversation_id = %event.conversation_id,
            scraping_type = %event.payload.scraping_type,
            dataset_id = %event.payload.data.default_dataset_id,
            results = event.payload.data.results.len(),
            "No platform configured, dropping completion event"
        );
        Ok(())
    }
}
