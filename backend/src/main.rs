//! Weightline backend entry point.
//!
//! Wires configuration, postgres, the Prometheus recorder, and the axum
//! router together, then serves until interrupted.

use anyhow::{ensure, Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weightline_backend::{config::AppConfig, db, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::load().context("configuration is invalid")?;
    if AppConfig::is_production() {
        guard_production_config(&config)?;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting weightline backend"
    );

    let pool = db::connect(&config.database).await?;

    // In production a separate migration job owns the schema
    if !AppConfig::is_production() {
        db::run_migrations(&pool).await?;
    }

    // Register the recorder before any counter fires
    let metrics = PrometheusBuilder::new().install_recorder()?;

    let state = AppState::new(pool, config.clone(), metrics);
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            EnvFilter::new("weightline_backend=info,tower_http=info")
        } else {
            EnvFilter::new("weightline_backend=debug,tower_http=debug,sqlx=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    // JSON in production for the log pipeline, pretty locally
    if AppConfig::is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Refuse to start production with settings that only make sense on a
/// developer machine.
fn guard_production_config(config: &AppConfig) -> Result<()> {
    ensure!(
        config.jwt.secret.len() >= 32 && !config.jwt.secret.contains("development"),
        "JWT secret is unset or still the development default"
    );

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("database url points at localhost in production");
    }

    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c().await.expect("ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("interrupt received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}
