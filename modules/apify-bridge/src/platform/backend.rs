use async_trait::async_trait;

use super::CompletionEvent;

/// Pluggable destination for completion events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &CompletionEvent) -> anyhow::Result<()>;
}
