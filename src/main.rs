// ABOUTME: Entry point for the tickler binary.
// ABOUTME: Parses CLI arguments, loads .env and config, initializes tracing, picks a backend, and starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tickler_server::{AppState, BackendKind, TicklerConfig, create_router};
use tickler_store::{Backend, MemoryBackend, RedisBackend, StoreOptions, TodoService};

/// Ephemeral to-do list served over HTTP and a tool-invocation API.
#[derive(Debug, Parser)]
#[command(name = "tickler", version, about)]
struct Cli {
    /// Address to listen on (overrides TICKLER_BIND).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Backing store: redis or memory (overrides TICKLER_BACKEND).
    #[arg(long)]
    backend: Option<BackendKind>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; everything has a default.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickler=debug,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = TicklerConfig::from_env().context("invalid configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    tracing::info!(
        bind = %config.bind,
        backend = %config.backend,
        record_ttl_secs = config.record_ttl.as_secs(),
        request_budget_secs = config.request_budget.as_secs(),
        "tickler starting up"
    );

    let backend = open_backend(&config).await?;
    let service = TodoService::new(
        backend,
        StoreOptions {
            key_prefix: config.key_prefix.clone(),
            record_ttl: config.record_ttl,
        },
    );
    let state = Arc::new(AppState::with_default_tools(service, config.request_budget).await);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("tickler shut down");
    Ok(())
}

async fn open_backend(config: &TicklerConfig) -> anyhow::Result<Arc<dyn Backend>> {
    match config.backend {
        BackendKind::Redis => {
            let redis = RedisBackend::connect(&config.redis_url)
                .context("failed to create redis connection pool")?;
            // Unreachable at startup is not fatal: each request reports it.
            if let Err(e) = redis.ping().await {
                tracing::warn!("redis not reachable yet: {}", e);
            }
            Ok(Arc::new(redis))
        }
        BackendKind::Memory => {
            tracing::warn!("using in-memory backend; to-dos are lost on restart");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
