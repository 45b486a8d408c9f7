/**
 * Notes Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration from the
 * environment and serves the API on `0.0.0.0:SERVER_PORT`.
 */

use std::net::SocketAddr;

use notes_backend::backend::server::create_app;
use notes_backend::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Server initialization started");

    let config = AppConfig::from_env()?;
    let port = config.server_port;

    let app = create_app(config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Peer addresses feed the anonymous newsletter throttle
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
