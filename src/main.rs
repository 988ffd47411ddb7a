use std::sync::Arc;

use geolens::api::{AppState, create_router};
use geolens::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState::from_config(&config)?);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
