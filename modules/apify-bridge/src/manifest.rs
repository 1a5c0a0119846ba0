use serde_json::{json, Value};

use crate::actions::{
    DEFAULT_CRAWLER_TYPE, DEFAULT_MAX_SEARCH_RESULT, DEFAULT_MAX_SHORTS, DEFAULT_SCRAPE_TYPE,
};
use crate::platform::SCRAPING_COMPLETED;

const CONVERSATION_ID: &str = "ID of the conversation : {{event.conversationId}}";

/// Integration definition advertised to the chat platform.
pub fn manifest() -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "title": "Apify Web Scraping",
        "description": "Integrate Apify to perform web scraping directly within your chatbot conversations",
        "configuration": {
            "apiKey": { "type": "string", "required": true, "description": "Apify API Key" }
        },
        "actions": {
            "scrapeWebsite": {
                "title": "Scrape Website",
                "description": "Scrape a website or a page using Apify",
                "path": "/actions/scrape-website",
                "input": {
                    "conversationId": field("string", true, CONVERSATION_ID, None),
                    "startUrls": field(
                        "string",
                        true,
                        "URL to start crawling from. Sub-pages of this URL are crawled too.",
                        None,
                    ),
                    "useSitemaps": field("boolean", false, "Whether to use sitemaps for crawling.", Some(json!(false))),
                    "crawlerType": field("string", false, "Type of crawler to use.", Some(json!(DEFAULT_CRAWLER_TYPE))),
                },
                "output": run_output(),
            },
            "scrapeInstagram": {
                "title": "Scrape Instagram",
                "description": "Scrape an instagram profile, or posts",
                "path": "/actions/scrape-instagram",
                "input": {
                    "conversationId": field("string", true, CONVERSATION_ID, None),
                    "instagramUrl": field("string", true, "Instagram Url to scrape", None),
                    "scrapeType": field(
                        "string",
                        false,
                        "Choose either to scrape profile details or posts.",
                        Some(json!(DEFAULT_SCRAPE_TYPE)),
                    ),
                    "maxItems": field("number", false, "Maximum number of items to scrape", Some(json!(1))),
                },
                "output": run_output(),
            },
            "scrapeYoutube": {
                "title": "Scrape Youtube",
                "description": "Scrape Youtube videos and shorts",
                "path": "/actions/scrape-youtube",
                "input": {
                    "conversationId": field("string", true, CONVERSATION_ID, None),
                    "searchTerm": field(
                        "string",
                        false,
                        "Enter a search term just like you would enter it in YouTube's search bar.",
                        None,
                    ),
                    "youtubeUrl": field(
                        "string",
                        false,
                        "Link to a YouTube video, channel, playlist or search results page. Overrides the search term.",
                        None,
                    ),
                    "maxSearchResult": field(
                        "number",
                        false,
                        "Limit the number of videos to crawl. For a channel, limits regular videos.",
                        Some(json!(DEFAULT_MAX_SEARCH_RESULT)),
                    ),
                    "maxShorts": field(
                        "number",
                        false,
                        "Limit the number of Shorts videos to crawl.",
                        Some(json!(DEFAULT_MAX_SHORTS)),
                    ),
                },
                "output": run_output(),
            },
        },
        "events": {
            SCRAPING_COMPLETED: {
                "title": "Apify Scraping Completed",
                "description": "This event is triggered when an Apify scraping task is completed.",
                "payload": {
                    "conversationId": "string",
                    "type": "string",
                    "data": { "defaultDatasetId": "string", "results": "array" },
                },
            }
        },
    })
}

fn field(kind: &str, required: bool, description: &str, default: Option<Value>) -> Value {
    let mut f = json!({ "type": kind, "required": required, "description": description });
    if let (Some(default), Some(obj)) = (default, f.as_object_mut()) {
        obj.insert("default".to_string(), default);
    }
    f
}

fn run_output() -> Value {
    json!({ "runId": "string", "datasetId": "string?", "webhookId": "string?" })
}
