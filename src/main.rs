use std::sync::Arc;

use anyhow::Context;
use species_hub::{config::Config, routes, state::AppState};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    if config.openai_api_key.is_none() {
        info!("OPENAI_API_KEY not set, chat replies will use the fallback message");
    }

    let state = Arc::new(AppState::from_config(&config)?);

    let app = routes::create_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, model = %config.chat.model, "species hub listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
