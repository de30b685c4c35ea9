use anyhow::Result;
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use stockroom::application::{
    ports::{security::TokenManager, time::Clock},
    services::{ApplicationServices, AuditRecorder, AuditWorkerHandle},
};
use stockroom::config::{AppConfig, StorageBackend};
use stockroom::domain::{
    audit::AuditLogRepository, category::CategoryRepository, inventory::InventoryLedger,
    leftover::LeftOverReadRepository, product::ProductRepository,
};
use stockroom::infrastructure::{
    database,
    repositories::{
        InMemoryStore, PostgresAuditLogRepository, PostgresCategoryRepository,
        PostgresInventoryLedger, PostgresLeftOverRepository, PostgresProductRepository,
    },
    security::token::BiscuitTokenManager,
    time::SystemClock,
};
use stockroom::presentation::http::{routes::build_router, state::HttpState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

struct Repositories {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    leftovers: Arc<dyn LeftOverReadRepository>,
    ledger: Arc<dyn InventoryLedger>,
    audit_logs: Arc<dyn AuditLogRepository>,
}

impl Repositories {
    fn postgres(pool: &PgPool) -> Self {
        Self {
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            leftovers: Arc::new(PostgresLeftOverRepository::new(pool.clone())),
            ledger: Arc::new(PostgresInventoryLedger::new(pool.clone())),
            audit_logs: Arc::new(PostgresAuditLogRepository::new(pool.clone())),
        }
    }

    fn memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            products: store.clone(),
            categories: store.clone(),
            leftovers: store.clone(),
            ledger: store.clone(),
            audit_logs: store,
        }
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = match config.storage_backend() {
        StorageBackend::Postgres => {
            let pool =
                database::init_pool(config.database_url(), config.database_max_connections())
                    .await?;
            database::run_migrations(&pool).await?;
            info!("database ready");
            Some(pool)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on shutdown");
            None
        }
    };
    let repos = pool
        .as_ref()
        .map_or_else(Repositories::memory, Repositories::postgres);

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (audit_recorder, audit_worker) = AuditRecorder::spawn(
        Arc::clone(&repos.audit_logs),
        Arc::clone(&clock),
        config.audit_queue_capacity(),
    );

    let services = Arc::new(ApplicationServices::new(
        repos.products,
        repos.categories,
        repos.leftovers,
        repos.ledger,
        repos.audit_logs,
        audit_recorder,
        token_manager,
        clock,
    ));

    let app = build_router(
        HttpState {
            services: Arc::clone(&services),
        },
        config.allowed_origins(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown(services, audit_worker, pool).await;
    Ok(())
}

/// Drop every recorder handle so the audit worker drains its queue and
/// exits, then release the pool.
async fn shutdown(
    services: Arc<ApplicationServices>,
    audit_worker: AuditWorkerHandle,
    pool: Option<PgPool>,
) {
    drop(services);
    audit_worker.shutdown().await;
    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("shutdown complete");
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
