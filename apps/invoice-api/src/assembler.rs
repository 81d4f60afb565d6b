//! Invoice assembly pipeline.
//!
//! Sequences the core components for one request:
//!
//! ```text
//! admit ──► compute totals ──► amount in words ──► template ──► PDF
//!   │
//!   └── rejected? short-circuit; NOTHING downstream runs
//! ```
//!
//! The limiter is consulted exactly once per inbound request, before any
//! computation. A words failure (amount beyond the conversion bound) aborts
//! words only: the numeric totals are still reported and it is the caller's
//! decision whether the missing string is fatal.

use std::sync::Arc;

use tracing::{debug, warn};

use quill_core::{
    amount_in_words, compute_totals, totals::line_total, CurrencyNames, Discount, InvoiceDetails,
    InvoiceTotals, LineItem, TaxRate,
};
use quill_limit::{Decision, RateLimiter};

use crate::error::ApiError;
use crate::renderer::{InvoiceDocument, PdfRenderer, TemplateRenderer};

// =============================================================================
// Request / Result Data
// =============================================================================

/// One parsed invoice request, ready for the pipeline.
#[derive(Debug, Clone)]
pub struct InvoiceRequestData {
    pub items: Vec<LineItem>,
    /// None → the configured default tax rate applies.
    pub tax_rate: Option<TaxRate>,
    pub discount: Option<Discount>,
    pub details: InvoiceDetails,
}

/// Totals and words for an admitted request.
#[derive(Debug, Clone)]
pub struct ComputedInvoice {
    pub totals: InvoiceTotals,
    /// None when the grand total exceeded the words bound (logged, not fatal).
    pub total_in_words: Option<String>,
    pub decision: Decision,
}

/// A finished PDF document.
#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub pdf: Vec<u8>,
    pub filename: String,
    pub decision: Decision,
}

// =============================================================================
// Assembler
// =============================================================================

/// Orchestrates limiter, core computation and the external renderers.
pub struct InvoiceAssembler {
    limiter: Arc<RateLimiter>,
    template: Arc<dyn TemplateRenderer>,
    pdf: Arc<dyn PdfRenderer>,
    default_tax_rate: TaxRate,
    currency: CurrencyNames,
}

impl InvoiceAssembler {
    pub fn new(
        limiter: Arc<RateLimiter>,
        template: Arc<dyn TemplateRenderer>,
        pdf: Arc<dyn PdfRenderer>,
        default_tax_rate: TaxRate,
        currency: CurrencyNames,
    ) -> Self {
        InvoiceAssembler {
            limiter,
            template,
            pdf,
            default_tax_rate,
            currency,
        }
    }

    /// Computes totals and words for an admitted request (preview path).
    pub async fn compute_invoice(
        &self,
        identity: &str,
        tier: &str,
        request: &InvoiceRequestData,
    ) -> Result<ComputedInvoice, ApiError> {
        let decision = self.admit(identity, tier).await?;
        let (totals, total_in_words) = self.compute(request)?;

        Ok(ComputedInvoice {
            totals,
            total_in_words,
            decision,
        })
    }

    /// Runs the full pipeline through template and PDF rendering.
    pub async fn generate_pdf(
        &self,
        identity: &str,
        tier: &str,
        request: &InvoiceRequestData,
    ) -> Result<GeneratedPdf, ApiError> {
        let decision = self.admit(identity, tier).await?;
        let (totals, total_in_words) = self.compute(request)?;

        let mut line_totals = Vec::with_capacity(request.items.len());
        for item in &request.items {
            line_totals.push(line_total(item)?);
        }

        let document = InvoiceDocument {
            details: request.details.clone(),
            currency: self.currency.clone(),
            items: request.items.clone(),
            line_totals,
            tax_rate: request.tax_rate.unwrap_or(self.default_tax_rate),
            totals,
            total_in_words,
        };

        let html = self.template.render(&document)?;
        let pdf = self.pdf.render_pdf(&html).await?;

        let filename = format!("invoice_{}.pdf", document.details.invoice_number_or_draft());
        debug!(filename = %filename, bytes = pdf.len(), "PDF generated");

        Ok(GeneratedPdf {
            pdf,
            filename,
            decision,
        })
    }

    /// Admission check; a rejection short-circuits the whole pipeline.
    async fn admit(&self, identity: &str, tier: &str) -> Result<Decision, ApiError> {
        let decision = self.limiter.admit(identity, tier).await?;
        if !decision.allowed {
            return Err(ApiError::QuotaExceeded {
                reset_at: decision.reset_at,
            });
        }
        Ok(decision)
    }

    /// Totals plus best-effort words. Pure; runs only after admission.
    fn compute(
        &self,
        request: &InvoiceRequestData,
    ) -> Result<(InvoiceTotals, Option<String>), ApiError> {
        let tax_rate = request.tax_rate.unwrap_or(self.default_tax_rate);
        let totals = compute_totals(&request.items, tax_rate, request.discount)?;

        let total_in_words = match amount_in_words(totals.grand_total, &self.currency) {
            Ok(words) => Some(words),
            Err(error) => {
                // Totals already succeeded; the missing string is the
                // caller's problem to judge
                warn!(grand_total = %totals.grand_total, %error, "Words conversion skipped");
                None
            }
        };

        Ok((totals, total_in_words))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use quill_core::{Money, Quantity};
    use quill_limit::{FailureMode, MemoryCounterStore, PolicyTable};

    use crate::renderer::{CommandPdfRenderer, TableTemplate};

    fn assembler(max_requests: u64) -> InvoiceAssembler {
        let policies = PolicyTable::new()
            .with_tier("authenticated", max_requests, Duration::from_secs(60))
            .unwrap();
        let limiter = Arc::new(RateLimiter::new(
            Arc::new(MemoryCounterStore::new()),
            policies,
            FailureMode::FailOpen,
        ));

        InvoiceAssembler::new(
            limiter,
            Arc::new(TableTemplate::new()),
            // `cat -` stands in for the external PDF binary
            Arc::new(CommandPdfRenderer::new("cat").with_args(["-"])),
            TaxRate::from_bps(750),
            CurrencyNames::default(),
        )
    }

    fn request(items: Vec<LineItem>) -> InvoiceRequestData {
        InvoiceRequestData {
            items,
            tax_rate: None,
            discount: None,
            details: InvoiceDetails {
                invoice_number: "INV-1".to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_compute_invoice_happy_path() {
        let assembler = assembler(10);
        let request = request(vec![LineItem::new(
            "Consulting",
            Quantity::from_whole(2),
            Money::from_minor(10_000),
        )]);

        let computed = assembler
            .compute_invoice("client-1", "authenticated", &request)
            .await
            .unwrap();

        assert_eq!(computed.totals.grand_total.minor(), 21_500);
        assert_eq!(
            computed.total_in_words.as_deref(),
            Some("Two Hundred and Fifteen Naira Only")
        );
        assert!(computed.decision.allowed);
    }

    #[tokio::test]
    async fn test_rejection_short_circuits() {
        let assembler = assembler(1);
        let request = request(vec![LineItem::new(
            "Consulting",
            Quantity::from_whole(1),
            Money::from_minor(100),
        )]);

        assert!(assembler
            .compute_invoice("client-1", "authenticated", &request)
            .await
            .is_ok());

        let err = assembler
            .compute_invoice("client-1", "authenticated", &request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn test_words_overflow_is_not_fatal() {
        let assembler = assembler(10);
        // Grand total above the words bound: ~1.1 trillion major units
        let request = request(vec![LineItem::new(
            "Astronomical",
            Quantity::from_whole(1),
            Money::from_minor(110_000_000_000_000),
        )]);

        let computed = assembler
            .compute_invoice("client-1", "authenticated", &request)
            .await
            .unwrap();

        assert!(computed.total_in_words.is_none());
        assert!(computed.totals.grand_total.minor() > 0);
    }

    #[tokio::test]
    async fn test_validation_error_rejects_request() {
        let assembler = assembler(10);
        let request = request(vec![LineItem::new(
            "Broken",
            Quantity::from_whole(0),
            Money::from_minor(100),
        )]);

        let err = assembler
            .compute_invoice("client-1", "authenticated", &request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_pdf_runs_full_pipeline() {
        let assembler = assembler(10);
        let request = request(vec![LineItem::new(
            "Consulting",
            Quantity::from_whole(2),
            Money::from_minor(10_000),
        )]);

        let generated = assembler
            .generate_pdf("client-1", "authenticated", &request)
            .await
            .unwrap();

        assert_eq!(generated.filename, "invoice_INV-1.pdf");
        // The cat stand-in echoes the HTML; the real binary emits PDF bytes
        let html = String::from_utf8(generated.pdf).unwrap();
        assert!(html.contains("Total Due: 215.00"));
    }
}
