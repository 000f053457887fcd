mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::{Context, Result};
use clap::Parser;
use marquee_catalog::{CatalogService, ProcessRandom};
use marquee_core::MovieCatalog;
use marquee_gateway::{App, AppState};
use marquee_storage::{InMemoryStore, MySqlStore};
use marquee_telemetry::TelemetryConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CLI::parse();

    let telemetry = TelemetryConfig::builder()
        .service_name("marquee-gateway")
        .log_format(config.log_format.into())
        .otlp_endpoint(config.otlp_endpoint.clone())
        .build();
    let _telemetry = marquee_telemetry::init(telemetry).context("failed to initialize telemetry")?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        seeded = config.random_seed.is_some(),
        "starting gateway server"
    );

    let random = ProcessRandom::from_seed(config.random_seed);

    let catalog: Arc<dyn MovieCatalog> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(CatalogService::new(InMemoryStore::new(), random)),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(&mysql_dsn)
                .await
                .context("failed to connect to MySQL")?;
            store
                .ensure_schema()
                .await
                .context("failed to create movies table")?;
            Arc::new(CatalogService::new(store, random))
        }
    };

    run_server(config.listen_addr, catalog).await
}

async fn run_server(listen_addr: SocketAddr, catalog: Arc<dyn MovieCatalog>) -> Result<()> {
    let app = App::router(AppState::new(catalog));

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind to {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "gateway server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
