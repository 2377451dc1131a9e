//! # Jotter API Server
//!
//! HTTP API for a multi-user note-taking service. Every note belongs to a
//! user, and every note operation is scoped to the authenticated owner.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Registration and login (Argon2id credential store, signed session tokens)
//! - A session gate that resolves the acting user before any note handler runs
//! - Owner-scoped note CRUD backed by PostgreSQL
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p jotter-api
//! ```

use jotter_api::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jotter_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Jotter API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool
    let db_config = jotter_shared::db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = jotter_shared::db::pool::create_pool(db_config).await?;

    // Run pending migrations
    jotter_shared::db::migrations::run_migrations(&pool).await?;

    // Build and serve the application
    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
