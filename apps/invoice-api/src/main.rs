//! # Quill Invoice API
//!
//! gRPC server for rate-limited invoice computation and PDF generation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice API Server                                │
//! │                                                                         │
//! │  Client ───► gRPC (50061) ───► RateLimiter ───► Totals/Words ───► PDF   │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                                   Redis                                 │
//! │                             (window counters)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quill_core::{CurrencyNames, TaxRate};
use quill_limit::{RateLimiter, RedisCounterStore};

use quill_invoice_api::assembler::InvoiceAssembler;
use quill_invoice_api::config::ApiConfig;
use quill_invoice_api::proto::{
    health_service_server::HealthServiceServer, invoice_service_server::InvoiceServiceServer,
};
use quill_invoice_api::renderer::{CommandPdfRenderer, TableTemplate};
use quill_invoice_api::services::{HealthServiceImpl, InvoiceServiceImpl};
use quill_invoice_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Quill Invoice API server...");

    // Load configuration (fails fast on a malformed tier table)
    let config = ApiConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.grpc_port,
        tiers = %config.rate_limit_tiers,
        failure_mode = %config.failure_mode,
        "Configuration loaded"
    );

    // Connect to the counter store. An unreachable store at startup is a
    // deployment defect; runtime outages are handled by the failure mode.
    let store = Arc::new(
        RedisCounterStore::connect(&config.redis_url)
            .await
            .context("Failed to connect to the counter store")?,
    );
    info!("Connected to Redis counter store");

    let limiter = RateLimiter::new(
        store.clone(),
        config.policy_table()?,
        config.failure_mode,
    )
    .with_store_timeout(config.store_timeout());

    let assembler = InvoiceAssembler::new(
        Arc::new(limiter),
        Arc::new(TableTemplate::new()),
        Arc::new(CommandPdfRenderer::new(&config.pdf_renderer_bin)),
        TaxRate::from_bps(config.default_tax_rate_bps),
        CurrencyNames {
            major: config.currency_major.clone(),
            minor: config.currency_minor.clone(),
        },
    );

    // Create shared state
    let state = Arc::new(AppState {
        assembler,
        store,
        config: config.clone(),
    });

    // Build gRPC services
    let invoice_service = InvoiceServiceServer::new(InvoiceServiceImpl::new(state.clone()));
    let health_service = HealthServiceServer::new(HealthServiceImpl::new(state.clone()));

    // Build server address
    let addr: SocketAddr = format!("0.0.0.0:{}", config.grpc_port).parse()?;
    info!(%addr, "Starting gRPC server");

    // Start server
    Server::builder()
        .add_service(invoice_service)
        .add_service(health_service)
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
