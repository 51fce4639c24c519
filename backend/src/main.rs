use std::sync::Arc;

use courseswipe::api::router;
use courseswipe::config::AppConfig;
use courseswipe::sheets::SheetHttpClient;
use courseswipe::state::AppState;
use courseswipe::store::{SqliteSwipeHistoryStore, sqlite};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "courseswipe=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let pool = sqlite::connect(&config.database_url).await?;
    let store = Arc::new(SqliteSwipeHistoryStore::new(pool.clone()));
    let courses = Arc::new(SheetHttpClient::new(config.sheet.clone())?);

    let state = AppState::new(store, courses);
    let app = router(state);

    info!("listening on http://{}", config.bind_addr);
    info!("course source: {}", config.sheet.csv_url);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
}
