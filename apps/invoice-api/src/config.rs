//! Invoice API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. The tier policy table is DEPLOYMENT configuration:
//! the dev default below exists so the server starts locally, but production
//! sets `RATE_LIMIT_TIERS` explicitly.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use quill_limit::{FailureMode, LimitError, PolicyTable};

/// Invoice API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// gRPC server port
    pub grpc_port: u16,

    /// Redis connection string (the shared counter store)
    pub redis_url: String,

    /// Tier policy table, `tier:max/window_secs` comma-separated
    pub rate_limit_tiers: String,

    /// Behavior when the counter store is unavailable
    pub failure_mode: FailureMode,

    /// Bound on each counter-store round trip, in milliseconds
    pub store_timeout_ms: u64,

    /// Tax rate applied when a request doesn't carry one (basis points)
    pub default_tax_rate_bps: u32,

    /// Major currency unit name (words rendering)
    pub currency_major: String,

    /// Minor currency unit name (words rendering)
    pub currency_minor: String,

    /// External HTML-to-PDF renderer binary (reads HTML on stdin, writes
    /// PDF to stdout)
    pub pdf_renderer_bin: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            grpc_port: env::var("GRPC_PORT")
                .unwrap_or_else(|_| "50061".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GRPC_PORT".to_string()))?,

            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379/0".to_string()),

            rate_limit_tiers: env::var("RATE_LIMIT_TIERS").unwrap_or_else(|_| {
                // Dev default: the three caller tiers of the original
                // deployment. Production overrides this.
                "anonymous:100/60,authenticated:1000/60,premium:5000/60".to_string()
            }),

            failure_mode: env::var("RATE_LIMIT_FAILURE_MODE")
                .unwrap_or_else(|_| "fail-open".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RATE_LIMIT_FAILURE_MODE".to_string()))?,

            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STORE_TIMEOUT_MS".to_string()))?,

            default_tax_rate_bps: env::var("DEFAULT_TAX_RATE_BPS")
                .unwrap_or_else(|_| "750".to_string()) // 7.5% VAT
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_TAX_RATE_BPS".to_string()))?,

            currency_major: env::var("CURRENCY_MAJOR").unwrap_or_else(|_| "Naira".to_string()),

            currency_minor: env::var("CURRENCY_MINOR").unwrap_or_else(|_| "Kobo".to_string()),

            pdf_renderer_bin: env::var("PDF_RENDERER_BIN")
                .unwrap_or_else(|_| "wkhtmltopdf".to_string()),
        };

        if config.default_tax_rate_bps > 10000 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_TAX_RATE_BPS".to_string(),
            ));
        }

        // Fail fast on a malformed tier table rather than at first request
        config.policy_table()?;

        Ok(config)
    }

    /// Parses the tier policy table from its `tier:max/window_secs` form.
    ///
    /// ## Example
    /// `"anonymous:100/60,premium:5000/60"` → two tiers, both with a
    /// 60-second window.
    pub fn policy_table(&self) -> Result<PolicyTable, ConfigError> {
        let mut table = PolicyTable::new();

        for entry in self.rate_limit_tiers.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (tier, quota) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidTierEntry(entry.to_string()))?;
            let (max_requests, window_secs) = quota
                .split_once('/')
                .ok_or_else(|| ConfigError::InvalidTierEntry(entry.to_string()))?;

            let max_requests: u64 = max_requests
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTierEntry(entry.to_string()))?;
            let window_secs: u64 = window_secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTierEntry(entry.to_string()))?;

            table = table.with_tier(
                tier.trim(),
                max_requests,
                Duration::from_secs(window_secs),
            )?;
        }

        if table.is_empty() {
            return Err(ConfigError::MissingRequired(
                "RATE_LIMIT_TIERS".to_string(),
            ));
        }

        Ok(table)
    }

    /// The store timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid tier entry '{0}' (expected 'tier:max/window_secs')")]
    InvalidTierEntry(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid rate limit policy: {0}")]
    InvalidPolicy(#[from] LimitError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tiers(tiers: &str) -> ApiConfig {
        ApiConfig {
            grpc_port: 50061,
            redis_url: "redis://localhost:6379/0".to_string(),
            rate_limit_tiers: tiers.to_string(),
            failure_mode: FailureMode::FailOpen,
            store_timeout_ms: 500,
            default_tax_rate_bps: 750,
            currency_major: "Naira".to_string(),
            currency_minor: "Kobo".to_string(),
            pdf_renderer_bin: "wkhtmltopdf".to_string(),
        }
    }

    #[test]
    fn test_policy_table_parses_tiers() {
        let config = config_with_tiers("anonymous:100/60, premium:5000/60");
        let table = config.policy_table().unwrap();

        assert_eq!(table.len(), 2);
        let premium = table.policy_for("premium").unwrap();
        assert_eq!(premium.max_requests, 5000);
        assert_eq!(premium.window, Duration::from_secs(60));
    }

    #[test]
    fn test_policy_table_rejects_malformed_entries() {
        assert!(config_with_tiers("anonymous=100/60").policy_table().is_err());
        assert!(config_with_tiers("anonymous:100").policy_table().is_err());
        assert!(config_with_tiers("anonymous:ten/60").policy_table().is_err());
        assert!(config_with_tiers("").policy_table().is_err());
    }

    #[test]
    fn test_policy_table_rejects_degenerate_quota() {
        assert!(config_with_tiers("anonymous:0/60").policy_table().is_err());
        assert!(config_with_tiers("anonymous:100/0").policy_table().is_err());
    }
}
