//! gRPC service implementations.

pub mod health_service;
pub mod invoice_service;

pub use health_service::HealthServiceImpl;
pub use invoice_service::InvoiceServiceImpl;
