mod config;
mod db;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Config::from_env()?;
    config.warn_on_insecure_defaults();

    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let state = state::AppState::from_config(pool, &config);

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static console assets");
    }
    let app = routes::app(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;

    tracing::info!(port = config.port, "authgate listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
