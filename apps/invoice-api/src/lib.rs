//! # Quill Invoice API
//!
//! gRPC server for rate-limited invoice computation and PDF generation.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice API Services                             │
//! │                                                                         │
//! │  ┌────────────────────┐            ┌────────────────┐                   │
//! │  │  InvoiceService    │            │  HealthService │                   │
//! │  │                    │            │                │                   │
//! │  │ • ComputeInvoice   │            │ • Check        │                   │
//! │  │ • GeneratePdf      │            │                │                   │
//! │  └─────────┬──────────┘            └───────┬────────┘                   │
//! │            │                               │                            │
//! │  ┌─────────▼──────────────────────────────────────────────────────────┐ │
//! │  │                      InvoiceAssembler                              │ │
//! │  │                                                                    │ │
//! │  │  admit (quill-limit) ─► totals + words (quill-core) ─► HTML ─► PDF │ │
//! │  └─────────┬──────────────────────────────────────────────┬──────────┘ │
//! │            │                                              │            │
//! │  ┌─────────▼──────────┐                        ┌──────────▼─────────┐  │
//! │  │  Redis             │                        │  wkhtmltopdf       │  │
//! │  │  (window counters) │                        │  (stdin → stdout)  │  │
//! │  └────────────────────┘                        └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `GRPC_PORT` - gRPC server port (default: 50061)
//! - `REDIS_URL` - Redis connection string (counter store)
//! - `RATE_LIMIT_TIERS` - `tier:max/window_secs` comma-separated
//! - `RATE_LIMIT_FAILURE_MODE` - `fail-open` or `fail-closed`
//! - `STORE_TIMEOUT_MS` - per-round-trip bound on store calls (default: 500)
//! - `DEFAULT_TAX_RATE_BPS` - tax rate when a request carries none
//! - `CURRENCY_MAJOR` / `CURRENCY_MINOR` - unit names for amount-in-words
//! - `PDF_RENDERER_BIN` - external HTML-to-PDF binary

pub mod assembler;
pub mod config;
pub mod error;
pub mod proto;
pub mod renderer;
pub mod services;

use std::sync::Arc;

use quill_limit::CounterStore;

// Re-exports
pub use assembler::InvoiceAssembler;
pub use config::ApiConfig;
pub use error::ApiError;

/// Shared application state.
pub struct AppState {
    pub config: ApiConfig,
    pub assembler: InvoiceAssembler,
    /// Held separately from the assembler so the health check can probe it.
    pub store: Arc<dyn CounterStore>,
}
