pub mod backend;
pub mod http;
pub mod memory;
pub mod noop;

use serde::{Deserialize, Serialize};

pub use backend::EventSink;

/// Event type name registered with the chat platform.
pub const SCRAPING_COMPLETED: &str = "scrapingCompleted";

/// A finished scrape, relayed into the conversation that asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    pub payload: CompletionPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPayload {
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    /// Scrape kind tag, e.g. "website".
    #[serde(rename = "type")]
    pub scraping_type: String,
    pub data: CompletionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionData {
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    pub results: Vec<serde_json::Value>,
}

impl CompletionEvent {
    pub fn scraping_completed(
        conversation_id: &str,
        scraping_type: &str,
        dataset_id: &str,
        results: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            event_type: SCRAPING_COMPLETED.to_string(),
            conversation_id: conversation_id.to_string(),
            payload: CompletionPayload {
                conversation_id: conversation_id.to_string(),
                scraping_type: scraping_type.to_string(),
                data: CompletionData {
                    default_dataset_id: dataset_id.to_string(),
                    results,
                },
            },
        }
    }
}
