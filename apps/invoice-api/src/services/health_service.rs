//! Health check gRPC service implementation.
//!
//! Probes the counter store with a short-lived key. The server stays up when
//! the store is down (admissions follow the configured failure mode), so an
//! unreachable store reports DEGRADED rather than failing the check.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tonic::{Request, Response, Status};
use tracing::warn;

use quill_limit::CounterStore;

use crate::proto::{
    health_service_server::HealthService, HealthCheckRequest, HealthCheckResponse,
};
use crate::AppState;

/// Expiry for the probe counter; long enough to cover one check.
const PROBE_TTL: Duration = Duration::from_secs(5);

/// Health service implementation.
pub struct HealthServiceImpl {
    state: Arc<AppState>,
}

impl HealthServiceImpl {
    /// Create a new health service.
    pub fn new(state: Arc<AppState>) -> Self {
        HealthServiceImpl { state }
    }

    async fn store_connected(&self) -> bool {
        match self
            .state
            .store
            .incr_with_expiry("health:probe", PROBE_TTL)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Counter store health probe failed");
                false
            }
        }
    }
}

#[tonic::async_trait]
impl HealthService for HealthServiceImpl {
    async fn check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let store_connected = self.store_connected().await;
        let status = if store_connected {
            "SERVING"
        } else {
            "DEGRADED"
        };

        Ok(Response::new(HealthCheckResponse {
            status: status.to_string(),
            store_connected,
            server_time: Utc::now().to_rfc3339(),
        }))
    }
}
