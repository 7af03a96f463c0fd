mod api;
mod middleware;
mod mock;
mod photo_cache;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::photo_cache::PhotoUriCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(midlo_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let places = match &config.google_maps_api_key {
        Some(key) => Some(Arc::new(midlo_places::GooglePlacesClient::new(
            key,
            config.places_connect_timeout_secs,
            config.places_request_timeout_secs,
        )?)),
        None => {
            if config.mock_google_allowed() {
                tracing::warn!(
                    "GOOGLE_MAPS_API_KEY not set; serving deterministic mock responses (development only)"
                );
            } else {
                tracing::warn!(
                    "GOOGLE_MAPS_API_KEY not set; Google-backed endpoints will fail until configured"
                );
            }
            None
        }
    };

    let app = build_app(AppState {
        config: Arc::clone(&config),
        places,
        photo_cache: PhotoUriCache::new(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "midlo backend listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
