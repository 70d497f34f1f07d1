// src/main.rs
use fbi_portal::config::Config;
use fbi_portal::routes::create_router;
use fbi_portal::storage::JsonFileStore;
use fbi_portal::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before RUST_LOG is read
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    if config.store_path.exists() {
        tracing::info!("📁 Using account store {}", config.store_path.display());
    } else {
        tracing::info!(
            "📁 Account store {} does not exist yet, it will be created on first signup",
            config.store_path.display()
        );
    }
    tracing::warn!("⚠️  Passwords are stored and compared in plaintext, do not use real credentials");

    let state = Arc::new(AppState {
        accounts: Arc::new(JsonFileStore::new(config.store_path.clone())),
    });

    let app = create_router(state);

    let addr = config.server_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("✅ Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
