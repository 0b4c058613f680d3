//! # Team Registration API Server
//!
//! Serves registration, login, team management and document upload over
//! HTTP. Identity travels in cookies; there is no server-side session store.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/teamreg cargo run -p teamreg-api
//! ```

use teamreg_api::{
    app::{build_router, AppState},
    config::Config,
};
use teamreg_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "teamreg_api=debug,teamreg_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Team registration API v{} starting...", teamreg_shared::VERSION);

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    let addr = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
