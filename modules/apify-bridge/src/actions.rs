use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{error, info, warn};

use apify_client::{InstagramScraperInput, WebsiteCrawlerInput, YoutubeScraperInput, YoutubeTarget};

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::kind::ScrapeKind;
use crate::registrar;

pub const DEFAULT_CRAWLER_TYPE: &str = "playwright:adaptive";
pub const DEFAULT_SCRAPE_TYPE: &str = "posts";
pub const DEFAULT_MAX_SEARCH_RESULT: u32 = 5;
pub const DEFAULT_MAX_SHORTS: u32 = 0;

/// `runId` returned when the YouTube action is called with nothing to scrape.
pub const ERROR_RUN_ID: &str = "error";

// --- Inputs ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeWebsiteInput {
    pub conversation_id: String,
    pub start_urls: String,
    pub use_sitemaps: Option<bool>,
    pub crawler_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeInstagramInput {
    pub conversation_id: String,
    pub instagram_url: String,
    pub scrape_type: Option<String>,
    pub max_items: Option<Number>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeYoutubeInput {
    pub conversation_id: String,
    pub search_term: Option<String>,
    pub youtube_url: Option<String>,
    pub max_search_result: Option<Number>,
    pub max_shorts: Option<Number>,
}

// --- Output ---

/// What a scrape action hands back. The run is still going when this returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStarted {
    pub run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    /// `None` when the completion webhook could not be registered; the run
    /// then finishes without a completion event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
}

impl ScrapeStarted {
    pub fn error_marker() -> Self {
        Self {
            run_id: ERROR_RUN_ID.to_string(),
            dataset_id: None,
            webhook_id: None,
        }
    }
}

// --- Defaults ---

pub fn website_payload(input: &ScrapeWebsiteInput) -> WebsiteCrawlerInput {
    let use_sitemaps = input.use_sitemaps.unwrap_or(false);
    let crawler_type = input
        .crawler_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CRAWLER_TYPE);
    WebsiteCrawlerInput::new(&input.start_urls, use_sitemaps, crawler_type)
}

pub fn instagram_payload(input: &ScrapeInstagramInput) -> InstagramScraperInput {
    let scrape_type = input.scrape_type.as_deref().unwrap_or(DEFAULT_SCRAPE_TYPE);
    let max_items = at_least(input.max_items.as_ref(), 1.0).unwrap_or_else(|| Number::from(1));
    InstagramScraperInput::new(&input.instagram_url, scrape_type, max_items)
}

/// `None` when neither a URL nor a search term was given.
pub fn youtube_payload(input: &ScrapeYoutubeInput) -> Option<YoutubeScraperInput> {
    let url = input.youtube_url.as_deref().unwrap_or("");
    let term = input.search_term.as_deref().unwrap_or("");
    let target = if !url.is_empty() {
        YoutubeTarget::Url(url.to_string())
    } else if !term.is_empty() {
        YoutubeTarget::Search(term.to_string())
    } else {
        return None;
    };

    let max_results = at_least(input.max_search_result.as_ref(), 0.0)
        .unwrap_or_else(|| Number::from(DEFAULT_MAX_SEARCH_RESULT));
    let max_shorts =
        at_least(input.max_shorts.as_ref(), 0.0).unwrap_or_else(|| Number::from(DEFAULT_MAX_SHORTS));
    Some(YoutubeScraperInput::new(target, max_results, max_shorts))
}

/// The caller's number, untouched, unless it is below `floor`. Apify
/// validates the rest.
fn at_least(n: Option<&Number>, floor: f64) -> Option<Number> {
    n.filter(|n| n.as_f64().is_some_and(|v| v >= floor)).cloned()
}

// --- Dispatchers ---

impl Bridge {
    pub async fn scrape_website(&self, input: ScrapeWebsiteInput) -> Result<ScrapeStarted> {
        info!(start_url = %input.start_urls, "Starting web scraping");
        let payload = website_payload(&input);
        self.dispatch(ScrapeKind::Website, &input.conversation_id, &payload)
            .await
    }

    pub async fn scrape_instagram(&self, input: ScrapeInstagramInput) -> Result<ScrapeStarted> {
        info!(instagram_url = %input.instagram_url, "Starting instagram scraping");
        let payload = instagram_payload(&input);
        self.dispatch(ScrapeKind::Instagram, &input.conversation_id, &payload)
            .await
    }

    pub async fn scrape_youtube(&self, input: ScrapeYoutubeInput) -> Result<ScrapeStarted> {
        info!("Starting youtube scraping");
        let Some(payload) = youtube_payload(&input) else {
            error!("You must provide a search term or a youtube URL");
            return Ok(ScrapeStarted::error_marker());
        };
        self.dispatch(ScrapeKind::YoutubeSearch, &input.conversation_id, &payload)
            .await
    }

    /// Register the completion webhook, then start the run.
    ///
    /// A failed registration does not stop the run; it shows up as a missing
    /// `webhook_id` in the result.
    async fn dispatch<I: Serialize>(
        &self,
        kind: ScrapeKind,
        conversation_id: &str,
        payload: &I,
    ) -> Result<ScrapeStarted> {
        let input = serde_json::to_value(payload).map_err(anyhow::Error::from)?;

        let webhook_id = match registrar::register(
            self.provider.as_ref(),
            &self.callback_url,
            kind.actor_id(),
            conversation_id,
            kind.tag(),
        )
        .await
        {
            Ok(hook) => Some(hook.id),
            Err(e) => {
                error!(error = %e, kind = %kind, "Completion webhook not registered, run will not be reported");
                None
            }
        };

        let run = match self.provider.start_actor(kind.actor_id(), &input).await {
            Ok(run) => run,
            Err(e) => {
                error!(error = %e, kind = %kind, "Error during scraping");
                if let Some(id) = &webhook_id {
                    if let Err(cleanup) = registrar::unregister(self.provider.as_ref(), id).await {
                        warn!(error = %cleanup, webhook_id = %id, "Failed to remove webhook of failed run");
                    }
                }
                return Err(BridgeError::Provider(e));
            }
        };

        info!(
            kind = %kind,
            run_id = %run.id,
            dataset_id = %run.default_dataset_id,
            "Apify run started"
        );

        Ok(ScrapeStarted {
            run_id: run.id,
            dataset_id: Some(run.default_dataset_id),
            webhook_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn website(use_sitemaps: Option<bool>, crawler_type: Option<&str>) -> ScrapeWebsiteInput {
        ScrapeWebsiteInput {
            conversation_id: "c".into(),
            start_urls: "https://example.com".into(),
            use_sitemaps,
            crawler_type: crawler_type.map(String::from),
        }
    }

    fn instagram(scrape_type: Option<&str>, max_items: Option<f64>) -> ScrapeInstagramInput {
        ScrapeInstagramInput {
            conversation_id: "c".into(),
            instagram_url: "https://instagram.com/natgeo".into(),
            scrape_type: scrape_type.map(String::from),
            max_items: max_items.and_then(Number::from_f64),
        }
    }

    fn youtube(term: Option<&str>, url: Option<&str>) -> ScrapeYoutubeInput {
        ScrapeYoutubeInput {
            conversation_id: "c".into(),
            search_term: term.map(String::from),
            youtube_url: url.map(String::from),
            max_search_result: None,
            max_shorts: None,
        }
    }

    #[test]
    fn website_defaults() {
        let payload = website_payload(&website(None, None));
        assert!(!payload.use_sitemaps);
        assert_eq!(payload.crawler_type, "playwright:adaptive");
    }

    #[test]
    fn website_empty_crawler_type_defaults() {
        assert_eq!(website_payload(&website(None, Some(""))).crawler_type, DEFAULT_CRAWLER_TYPE);
    }

    #[test]
    fn website_caller_values_win() {
        let payload = website_payload(&website(Some(true), Some("cheerio")));
        assert!(payload.use_sitemaps);
        assert_eq!(payload.crawler_type, "cheerio");
    }

    #[test]
    fn instagram_defaults() {
        let payload = instagram_payload(&instagram(None, None));
        assert_eq!(payload.results_type, "posts");
        assert_eq!(payload.results_limit, Number::from(1));
    }

    #[test]
    fn instagram_max_items_floored_at_one() {
        assert_eq!(instagram_payload(&instagram(None, Some(0.0))).results_limit, Number::from(1));
        assert_eq!(instagram_payload(&instagram(None, Some(-4.0))).results_limit, Number::from(1));
        assert_eq!(instagram_payload(&instagram(None, Some(0.5))).results_limit, Number::from(1));
    }

    #[test]
    fn instagram_max_items_forwarded_verbatim() {
        let input = ScrapeInstagramInput {
            max_items: Some(Number::from(7)),
            ..instagram(Some("details"), None)
        };
        assert_eq!(instagram_payload(&input).results_limit, Number::from(7));

        let v = serde_json::to_value(instagram_payload(&instagram(None, Some(2.5)))).unwrap();
        assert_eq!(v["resultsLimit"], json!(2.5));
    }

    #[test]
    fn youtube_needs_url_or_term() {
        assert!(youtube_payload(&youtube(None, None)).is_none());
        assert!(youtube_payload(&youtube(Some(""), Some(""))).is_none());
    }

    #[test]
    fn youtube_url_beats_term() {
        let payload = youtube_payload(&youtube(Some("cats"), Some("https://youtu.be/x"))).unwrap();
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["startUrls"], json!([{ "url": "https://youtu.be/x" }]));
        assert_eq!(v["searchKeywords"], json!("any"));
    }

    #[test]
    fn youtube_limit_defaults() {
        let mut input = youtube(Some("cats"), None);
        input.max_search_result = Some(Number::from(-1));
        input.max_shorts = Some(Number::from(-1));
        let payload = youtube_payload(&input).unwrap();
        assert_eq!(payload.max_results, Number::from(5));
        assert_eq!(payload.max_results_shorts, Number::from(0));
        assert_eq!(payload.search_keywords, "cats");
    }

    #[test]
    fn youtube_limits_above_u32_forwarded_verbatim() {
        let mut input = youtube(Some("cats"), None);
        input.max_search_result = Some(Number::from(10_000_000_000u64));
        input.max_shorts = Number::from_f64(1.5);
        let v = serde_json::to_value(youtube_payload(&input).unwrap()).unwrap();
        assert_eq!(v["maxResults"], json!(10_000_000_000u64));
        assert_eq!(v["maxResultsShorts"], json!(1.5));
    }

    #[test]
    fn inputs_accept_camel_case() {
        let input: ScrapeYoutubeInput = serde_json::from_value(json!({
            "conversationId": "conv",
            "searchTerm": "rust",
            "maxSearchResult": 3
        }))
        .unwrap();
        assert_eq!(input.search_term.as_deref(), Some("rust"));
        assert_eq!(input.max_search_result, Some(Number::from(3)));
        assert!(input.youtube_url.is_none());
    }

    #[test]
    fn error_marker_serializes_run_id_only() {
        assert_eq!(
            serde_json::to_value(ScrapeStarted::error_marker()).unwrap(),
            json!({ "runId": "error" })
        );
    }
}
