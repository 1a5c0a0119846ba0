//! In-memory Apify stand-in shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use apify_bridge::platform::memory::MemoryEventSink;
use apify_bridge::{Bridge, ScrapeProvider};
use apify_client::{ApifyError, NewWebhook, Result, RunData, User, Webhook, WebhookUpdate};

pub const CALLBACK_URL: &str = "https://bridge.test/webhooks/apify?secret=s3cr3t";

#[derive(Default)]
pub struct Failures {
    pub create_webhook: bool,
    pub update_webhook: bool,
    pub start_actor: bool,
    pub dataset_items: bool,
    pub current_user: bool,
    pub no_user: bool,
}

#[derive(Default)]
struct Calls {
    next_id: u32,
    created: Vec<NewWebhook>,
    updated: Vec<(String, String)>,
    deleted: Vec<String>,
    live: HashSet<String>,
    started: Vec<(String, serde_json::Value)>,
    fetched: Vec<String>,
}

/// Records every call and answers with synthetic ids:
/// webhooks `wh_N`, runs `run_N`, datasets `ds_N`.
#[derive(Default)]
pub struct FakeProvider {
    pub fail: Failures,
    datasets: HashMap<String, Vec<serde_json::Value>>,
    calls: Mutex<Calls>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(fail: Failures) -> Self {
        Self {
            fail,
            ..Self::default()
        }
    }

    pub fn with_dataset(mut self, dataset_id: &str, items: Vec<serde_json::Value>) -> Self {
        self.datasets.insert(dataset_id.to_string(), items);
        self
    }

    /// Pretend a webhook with this id exists on Apify.
    pub fn with_live_webhook(self, webhook_id: &str) -> Self {
        self.calls.lock().unwrap().live.insert(webhook_id.to_string());
        self
    }

    pub fn created(&self) -> Vec<NewWebhook> {
        self.calls.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().updated.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.calls.lock().unwrap().deleted.clone()
    }

    pub fn started(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().started.clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.calls.lock().unwrap().fetched.clone()
    }

    pub fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.created.len()
            + calls.updated.len()
            + calls.deleted.len()
            + calls.started.len()
            + calls.fetched.len()
    }

    fn next_id(&self) -> u32 {
        let mut calls = self.calls.lock().unwrap();
        calls.next_id += 1;
        calls.next_id
    }
}

fn api_error(status: u16, message: &str) -> ApifyError {
    ApifyError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl ScrapeProvider for FakeProvider {
    async fn current_user(&self) -> Result<Option<User>> {
        if self.fail.current_user {
            return Err(api_error(401, "token invalid"));
        }
        if self.fail.no_user {
            return Ok(None);
        }
        Ok(Some(User {
            id: "user_1".into(),
            username: Some("tester".into()),
            email: None,
        }))
    }

    async fn start_actor(&self, actor_id: &str, input: &serde_json::Value) -> Result<RunData> {
        self.calls
            .lock()
            .unwrap()
            .started
            .push((actor_id.to_string(), input.clone()));
        if self.fail.start_actor {
            return Err(api_error(400, "invalid input"));
        }
        let n = self.next_id();
        Ok(RunData {
            id: format!("run_{n}"),
            status: "READY".into(),
            default_dataset_id: format!("ds_{n}"),
            started_at: None,
            finished_at: None,
        })
    }

    async fn create_webhook(&self, webhook: &NewWebhook) -> Result<Webhook> {
        self.calls.lock().unwrap().created.push(webhook.clone());
        if self.fail.create_webhook {
            return Err(api_error(500, "webhook create failed"));
        }
        let id = format!("wh_{}", self.next_id());
        self.calls.lock().unwrap().live.insert(id.clone());
        Ok(Webhook {
            id,
            request_url: Some(webhook.request_url.clone()),
            payload_template: Some(webhook.payload_template.clone()),
            event_types: webhook.event_types.clone(),
            condition: Some(webhook.condition.clone()),
            created_at: None,
        })
    }

    async fn update_webhook(&self, webhook_id: &str, update: &WebhookUpdate) -> Result<Webhook> {
        self.calls
            .lock()
            .unwrap()
            .updated
            .push((webhook_id.to_string(), update.payload_template.clone()));
        if self.fail.update_webhook {
            return Err(api_error(500, "webhook update failed"));
        }
        Ok(Webhook {
            id: webhook_id.to_string(),
            request_url: None,
            payload_template: Some(update.payload_template.clone()),
            event_types: Vec::new(),
            condition: None,
            created_at: None,
        })
    }

    async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        calls.deleted.push(webhook_id.to_string());
        if calls.live.remove(webhook_id) {
            Ok(())
        } else {
            Err(api_error(404, "webhook not found"))
        }
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>> {
        self.calls
            .lock()
            .unwrap()
            .fetched
            .push(dataset_id.to_string());
        if self.fail.dataset_items {
            return Err(ApifyError::Network("connection reset".into()));
        }
        Ok(self.datasets.get(dataset_id).cloned().unwrap_or_default())
    }
}

pub fn bridge_with(provider: Arc<FakeProvider>, sink: Arc<MemoryEventSink>) -> Bridge {
    Bridge::new(provider, sink, CALLBACK_URL.to_string())
}
