use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use tutorgen::{router, AppState, ProxyConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ProxyConfig::from_env();
    if config.api_key.is_none() {
        // Not fatal: the server stays up so the liveness endpoint can be
        // used to diagnose exactly this situation.
        tracing::warn!("no API key configured; generation calls will fail until one is set");
    }

    let state = AppState::from_config(&config);
    let app = router(state, &config.app_url);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, model = %config.model_id, "tutorial proxy listening");

    axum::serve(listener, app).await?;

    Ok(())
}
