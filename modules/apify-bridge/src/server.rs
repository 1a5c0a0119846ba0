use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::warn;

use crate::actions::{ScrapeInstagramInput, ScrapeStarted, ScrapeWebsiteInput, ScrapeYoutubeInput};
use crate::bridge::Bridge;
use crate::callback::{parse_callback, CallbackOutcome};
use crate::config::CALLBACK_PATH;
use crate::error::{BridgeError, Result};
use crate::manifest::manifest;

pub struct AppState {
    pub bridge: Bridge,
    /// Expected `secret` query parameter on callbacks, if any.
    pub webhook_secret: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        .route("/manifest", get(|| async { Json(manifest()) }))
        // Actions
        .route("/actions/scrape-website", post(scrape_website))
        .route("/actions/scrape-instagram", post(scrape_instagram))
        .route("/actions/scrape-youtube", post(scrape_youtube))
        // Apify callbacks
        .route(CALLBACK_PATH, post(apify_callback))
        .with_state(state)
        // Logging layer: method + path only, the secret lives in the query
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

async fn scrape_website(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ScrapeWebsiteInput>,
) -> Result<Json<ScrapeStarted>> {
    Ok(Json(state.bridge.scrape_website(input).await?))
}

async fn scrape_instagram(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ScrapeInstagramInput>,
) -> Result<Json<ScrapeStarted>> {
    Ok(Json(state.bridge.scrape_instagram(input).await?))
}

async fn scrape_youtube(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ScrapeYoutubeInput>,
) -> Result<Json<ScrapeStarted>> {
    Ok(Json(state.bridge.scrape_youtube(input).await?))
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    secret: Option<String>,
}

async fn apify_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    body: Bytes,
) -> Result<Json<CallbackOutcome>> {
    if let Some(expected) = &state.webhook_secret {
        let given = query.secret.as_deref().unwrap_or("");
        if !secrets_match(expected, given) {
            warn!("Rejected Apify callback with a bad secret");
            return Err(BridgeError::Unauthorized);
        }
    }

    let body = parse_callback(&body).inspect_err(|e| {
        warn!(error = %e, "Unparseable Apify callback");
    })?;
    Ok(Json(state.bridge.handle_callback(body).await))
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(expected: &str, given: &str) -> bool {
    let (a, b) = (expected.as_bytes(), given.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
