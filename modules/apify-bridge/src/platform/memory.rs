use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::EventSink;
use super::CompletionEvent;

/// In-memory sink for tests. Records every event; can be told to fail.
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<CompletionEvent>>,
    fail: bool,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every `emit` fails.
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Events emitted so far (for test assertions).
    pub fn events(&self) -> Vec<CompletionEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn emit(&self, event: &CompletionEvent) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("platform unavailable");
        }
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        Ok(())
    }
}
