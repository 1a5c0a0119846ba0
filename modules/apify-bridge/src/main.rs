use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apify_bridge::{
    server::{router, AppState},
    Bridge, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("apify_bridge=info".parse()?))
        .init();

    info!("Apify bridge starting...");

    let config = Config::from_env()?;
    config.log_redacted();

    let bridge = Bridge::from_config(&config)?;

    // Activation: refuse to serve with a token Apify does not accept
    bridge.verify_credential().await?;
    info!(callback_url = %config.public_webhook_url, "Apify callbacks will be delivered here");

    let state = Arc::new(AppState {
        bridge,
        webhook_secret: config.webhook_secret.clone(),
    });
    let app = router(state.clone());

    let addr = format!("{}:{}", config.host, config.port);
    info!("Apify bridge listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    state.bridge.unregister().await;
    Ok(())
}
