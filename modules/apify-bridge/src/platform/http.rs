use async_trait::async_trait;
use tracing::warn;

use super::backend::EventSink;
use super::CompletionEvent;

/// Posts completion events to the chat platform's event API.
pub struct HttpEventSink {
    events_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpEventSink {
    pub fn new(events_url: String, token: Option<String>, http: reqwest::Client) -> Self {
        Self {
            events_url,
            token,
            http,
        }
    }
}

#[async_trait]
impl EventSink for HttpEventSink {
    async fn emit(&self, event: &CompletionEvent) -> anyhow::Result<()> {
        let mut req = self.http.post(&self.events_url).json(event);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Platform event API returned non-success");
            anyhow::bail!("Platform event API returned {status}");
        }

        Ok(())
    }
}
