use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// A start URL entry, shared by the crawler and YouTube inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartUrl {
    pub url: String,
}

// --- Website content crawler ---

const REMOVE_ELEMENTS_CSS_SELECTOR: &str = r#"nav, footer, script, style, noscript, svg,
        [role="alert"],
        [role="banner"],
        [role="dialog"],
        [role="alertdialog"],
        [role="region"][aria-label*="skip" i],
        [aria-modal="true"]"#;

#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfiguration {
    #[serde(rename = "useApifyProxy")]
    pub use_apify_proxy: bool,
}

/// Input for the apify/website-content-crawler actor.
///
/// Only the start URL, sitemap flag and crawler engine are caller-controlled;
/// everything else is a fixed crawl profile tuned for readable-text extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteCrawlerInput {
    pub start_urls: Vec<StartUrl>,
    pub use_sitemaps: bool,
    pub crawler_type: String,
    pub max_crawl_depth: u32,
    pub max_crawl_pages: u64,
    pub initial_concurrency: u32,
    pub max_concurrency: u32,
    pub initial_cookies: Vec<serde_json::Value>,
    pub proxy_configuration: ProxyConfiguration,
    pub max_session_rotations: u32,
    pub max_request_retries: u32,
    pub request_timeout_secs: u32,
    #[serde(rename = "minFileDownloadSpeedKBps")]
    pub min_file_download_speed_kbps: u32,
    pub dynamic_content_wait_secs: u32,
    pub max_scroll_height_pixels: u32,
    pub remove_elements_css_selector: String,
    pub remove_cookie_warnings: bool,
    pub expand_iframes: bool,
    pub click_elements_css_selector: String,
    pub html_transformer: String,
    pub readable_text_char_threshold: u32,
    pub aggressive_prune: bool,
    pub debug_mode: bool,
    pub debug_log: bool,
    pub save_html: bool,
    pub save_html_as_file: bool,
    pub save_markdown: bool,
    pub save_files: bool,
    pub save_screenshots: bool,
    pub max_results: u64,
    pub client_side_min_change_percentage: u32,
    pub rendering_type_detection_percentage: u32,
}

impl WebsiteCrawlerInput {
    pub fn new(start_url: &str, use_sitemaps: bool, crawler_type: &str) -> Self {
        Self {
            start_urls: vec![StartUrl {
                url: start_url.to_string(),
            }],
            use_sitemaps,
            crawler_type: crawler_type.to_string(),
            max_crawl_depth: 20,
            max_crawl_pages: 9_999_999,
            initial_concurrency: 0,
            max_concurrency: 200,
            initial_cookies: Vec::new(),
            proxy_configuration: ProxyConfiguration {
                use_apify_proxy: true,
            },
            max_session_rotations: 10,
            max_request_retries: 5,
            request_timeout_secs: 60,
            min_file_download_speed_kbps: 128,
            dynamic_content_wait_secs: 10,
            max_scroll_height_pixels: 5000,
            remove_elements_css_selector: REMOVE_ELEMENTS_CSS_SELECTOR.to_string(),
            remove_cookie_warnings: true,
            expand_iframes: true,
            click_elements_css_selector: r#"[aria-expanded="false"]"#.to_string(),
            html_transformer: "readableText".to_string(),
            readable_text_char_threshold: 100,
            aggressive_prune: false,
            debug_mode: false,
            debug_log: false,
            save_html: false,
            save_html_as_file: false,
            save_markdown: true,
            save_files: false,
            save_screenshots: false,
            max_results: 9_999_999,
            client_side_min_change_percentage: 15,
            rendering_type_detection_percentage: 10,
        }
    }
}

// --- Instagram scraper ---

/// Input for the apify/instagram-scraper actor, driven by direct URLs.
#[derive(Debug, Clone, Serialize)]
pub struct InstagramScraperInput {
    #[serde(rename = "addParentData")]
    pub add_parent_data: bool,
    #[serde(rename = "directUrls")]
    pub direct_urls: Vec<String>,
    #[serde(rename = "enhanceUserSearchWithFacebookPage")]
    pub enhance_user_search_with_facebook_page: bool,
    #[serde(rename = "isUserReelFeedURL")]
    pub is_user_reel_feed_url: bool,
    #[serde(rename = "isUserTaggedFeedURL")]
    pub is_user_tagged_feed_url: bool,
    /// Caller's number, forwarded as given.
    #[serde(rename = "resultsLimit")]
    pub results_limit: serde_json::Number,
    /// "posts", "details", "comments", ...
    #[serde(rename = "resultsType")]
    pub results_type: String,
    #[serde(rename = "searchLimit")]
    pub search_limit: u32,
    #[serde(rename = "searchType")]
    pub search_type: String,
}

impl InstagramScraperInput {
    pub fn new(url: &str, results_type: &str, results_limit: serde_json::Number) -> Self {
        Self {
            add_parent_data: false,
            direct_urls: vec![url.to_string()],
            enhance_user_search_with_facebook_page: false,
            is_user_reel_feed_url: false,
            is_user_tagged_feed_url: false,
            results_limit,
            results_type: results_type.to_string(),
            search_limit: 1,
            search_type: "hashtag".to_string(),
        }
    }
}

// --- YouTube scraper ---

/// What the YouTube scraper should crawl. A direct URL wins over a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YoutubeTarget {
    /// A video, channel, playlist or search results page.
    Url(String),
    /// Free-text search, as typed into YouTube's search bar.
    Search(String),
}

/// Input for the streamers/youtube-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct YoutubeScraperInput {
    #[serde(rename = "downloadSubtitles")]
    pub download_subtitles: bool,
    #[serde(rename = "hasCC")]
    pub has_cc: bool,
    #[serde(rename = "hasLocation")]
    pub has_location: bool,
    #[serde(rename = "hasSubtitles")]
    pub has_subtitles: bool,
    #[serde(rename = "is360")]
    pub is_360: bool,
    #[serde(rename = "is3D")]
    pub is_3d: bool,
    #[serde(rename = "is4K")]
    pub is_4k: bool,
    #[serde(rename = "isBought")]
    pub is_bought: bool,
    #[serde(rename = "isHD")]
    pub is_hd: bool,
    #[serde(rename = "isHDR")]
    pub is_hdr: bool,
    #[serde(rename = "isLive")]
    pub is_live: bool,
    #[serde(rename = "isVR180")]
    pub is_vr180: bool,
    #[serde(rename = "maxResultStreams")]
    pub max_result_streams: u32,
    #[serde(rename = "maxResults")]
    pub max_results: serde_json::Number,
    #[serde(rename = "maxResultsShorts")]
    pub max_results_shorts: serde_json::Number,
    #[serde(rename = "preferAutoGeneratedSubtitles")]
    pub prefer_auto_generated_subtitles: bool,
    #[serde(rename = "saveSubsToKVS")]
    pub save_subs_to_kvs: bool,
    #[serde(rename = "searchKeywords")]
    pub search_keywords: String,
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
    #[serde(rename = "subtitlesLanguage")]
    pub subtitles_language: String,
    #[serde(rename = "subtitlesFormat")]
    pub subtitles_format: String,
}

impl YoutubeScraperInput {
    pub fn new(
        target: YoutubeTarget,
        max_results: serde_json::Number,
        max_results_shorts: serde_json::Number,
    ) -> Self {
        let (start_urls, search_keywords) = match target {
            YoutubeTarget::Url(url) => (vec![StartUrl { url }], "any".to_string()),
            YoutubeTarget::Search(term) => (Vec::new(), term),
        };

        Self {
            download_subtitles: false,
            has_cc: false,
            has_location: false,
            has_subtitles: false,
            is_360: false,
            is_3d: false,
            is_4k: false,
            is_bought: false,
            is_hd: false,
            is_hdr: false,
            is_live: false,
            is_vr180: false,
            max_result_streams: 0,
            max_results,
            max_results_shorts,
            prefer_auto_generated_subtitles: false,
            save_subs_to_kvs: false,
            search_keywords,
            start_urls,
            subtitles_language: "any".to_string(),
            subtitles_format: "srt".to_string(),
        }
    }
}

// --- Runs ---

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

// --- Webhooks ---

/// Apify event type fired when an actor run finishes successfully.
pub const ACTOR_RUN_SUCCEEDED: &str = "ACTOR.RUN.SUCCEEDED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookCondition {
    #[serde(rename = "actorId")]
    pub actor_id: String,
}

/// Body of `POST /webhooks`.
#[derive(Debug, Clone, Serialize)]
pub struct NewWebhook {
    #[serde(rename = "isAdHoc")]
    pub is_ad_hoc: bool,
    #[serde(rename = "requestUrl")]
    pub request_url: String,
    #[serde(rename = "eventTypes")]
    pub event_types: Vec<String>,
    pub condition: WebhookCondition,
    #[serde(rename = "payloadTemplate")]
    pub payload_template: String,
}

impl NewWebhook {
    /// A webhook that fires once a run of `actor_id` succeeds.
    pub fn on_run_succeeded(request_url: &str, actor_id: &str, payload_template: String) -> Self {
        Self {
            is_ad_hoc: false,
            request_url: request_url.to_string(),
            event_types: vec![ACTOR_RUN_SUCCEEDED.to_string()],
            condition: WebhookCondition {
                actor_id: actor_id.to_string(),
            },
            payload_template,
        }
    }
}

/// Body of `PUT /webhooks/{id}`. Only the template is ever rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookUpdate {
    #[serde(rename = "payloadTemplate")]
    pub payload_template: String,
}

/// A webhook as returned by Apify.
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    pub id: String,
    #[serde(rename = "requestUrl")]
    pub request_url: Option<String>,
    #[serde(rename = "payloadTemplate")]
    pub payload_template: Option<String>,
    #[serde(rename = "eventTypes", default)]
    pub event_types: Vec<String>,
    pub condition: Option<WebhookCondition>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

// --- Users ---

/// The account that owns the API token.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
}
