mod config;
mod cors;
mod db;
mod error;
mod handlers;
mod models;
mod upstream;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::Config;
pub use error::{AppError, Result};
use upstream::SongCatalog;

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: Config,
    pub catalog: SongCatalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let config = Config::from_env()?;

    // Initialize database
    let db = db::connect(&config).await?;
    db::run_migrations(&db).await?;

    // One pooled client shared by every proxied request
    let http = upstream::http_client(&config)?;
    let catalog = SongCatalog::new(http, &config.upstream_base_url)?;
    tracing::info!("Proxying song catalog at {}", catalog.base_url());

    let state = Arc::new(AppState {
        db: db.clone(),
        config: config.clone(),
        catalog,
    });

    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Database connection closed");

    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors::cors_layer(&state.config);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        // Status checks
        .route("/api/status", post(handlers::status::create_status_check))
        .route("/api/status", get(handlers::status::list_status_checks))
        // Song catalog proxy
        .route("/api/proxy/songs", get(handlers::proxy::proxy_songs))
        .route(
            "/api/proxy/songs/view/:song_id",
            get(handlers::proxy::proxy_song_detail),
        )
        .route("/api/proxy/songs/types", get(handlers::proxy::proxy_song_types))
        .route("/api/proxy/songs/topics", get(handlers::proxy::proxy_song_topics))
        .route("/api/proxy/songs/count", get(handlers::proxy::proxy_song_count))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
