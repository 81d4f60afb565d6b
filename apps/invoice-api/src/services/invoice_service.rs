//! Invoice gRPC service implementation.
//!
//! Thin wire adapter: converts proto messages into core types, hands the
//! request to the [`InvoiceAssembler`](crate::assembler::InvoiceAssembler),
//! and converts the result back. No invoice logic lives here.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::info;

use quill_core::{Discount, InvoiceDetails, InvoiceTotals, LineItem, Money, Quantity, TaxRate};
use quill_limit::Decision;

use crate::assembler::InvoiceRequestData;
use crate::proto::{
    discount::Kind, invoice_service_server::InvoiceService, ComputeInvoiceResponse,
    GeneratePdfResponse, InvoiceRequest, RateInfo, TotalsBreakdown,
};
use crate::AppState;

/// Invoice service implementation.
pub struct InvoiceServiceImpl {
    state: Arc<AppState>,
}

impl InvoiceServiceImpl {
    /// Create a new invoice service.
    pub fn new(state: Arc<AppState>) -> Self {
        InvoiceServiceImpl { state }
    }
}

#[tonic::async_trait]
impl InvoiceService for InvoiceServiceImpl {
    /// Totals and amount-in-words for a live preview.
    async fn compute_invoice(
        &self,
        request: Request<InvoiceRequest>,
    ) -> Result<Response<ComputeInvoiceResponse>, Status> {
        let (identity, tier, data) = parse_request(request.into_inner())?;

        let computed = self
            .state
            .assembler
            .compute_invoice(&identity, &tier, &data)
            .await
            .map_err(Status::from)?;

        info!(
            tier = %tier,
            items = data.items.len(),
            grand_total_minor = computed.totals.grand_total.minor(),
            degraded = computed.decision.degraded,
            "Invoice computed"
        );

        Ok(Response::new(ComputeInvoiceResponse {
            totals: Some(totals_to_proto(&computed.totals)),
            total_in_words: computed.total_in_words.unwrap_or_default(),
            rate: Some(rate_info(&computed.decision)),
        }))
    }

    /// Full pipeline through the external PDF renderer.
    async fn generate_pdf(
        &self,
        request: Request<InvoiceRequest>,
    ) -> Result<Response<GeneratePdfResponse>, Status> {
        let (identity, tier, data) = parse_request(request.into_inner())?;

        let generated = self
            .state
            .assembler
            .generate_pdf(&identity, &tier, &data)
            .await
            .map_err(Status::from)?;

        info!(
            tier = %tier,
            filename = %generated.filename,
            bytes = generated.pdf.len(),
            "Invoice PDF generated"
        );

        Ok(Response::new(GeneratePdfResponse {
            pdf: generated.pdf,
            filename: generated.filename,
            rate: Some(rate_info(&generated.decision)),
        }))
    }
}

// =============================================================================
// Wire Conversions
// =============================================================================

/// Pulls identity, tier and the pipeline input out of a wire request.
fn parse_request(
    request: InvoiceRequest,
) -> Result<(String, String, InvoiceRequestData), Status> {
    if request.client_identity.trim().is_empty() {
        return Err(Status::invalid_argument("client_identity is required"));
    }
    if request.tier.trim().is_empty() {
        return Err(Status::invalid_argument("tier is required"));
    }

    let items = request
        .items
        .into_iter()
        .map(|item| {
            LineItem::new(
                item.description,
                Quantity::from_thousandths(item.quantity_thousandths),
                Money::from_minor(item.unit_price_minor),
            )
        })
        .collect();

    let discount = request.discount.and_then(|d| d.kind).map(|kind| match kind {
        Kind::PercentBps(bps) => Discount::Percentage(bps),
        Kind::AmountMinor(minor) => Discount::Amount(Money::from_minor(minor)),
    });

    let data = InvoiceRequestData {
        items,
        tax_rate: request.tax_rate_bps.map(TaxRate::from_bps),
        discount,
        details: request.details.map(details_from_proto).unwrap_or_default(),
    };

    Ok((request.client_identity, request.tier, data))
}

fn details_from_proto(details: crate::proto::InvoiceDetails) -> InvoiceDetails {
    InvoiceDetails {
        brand_name: details.brand_name,
        brand_logo_url: details.brand_logo_url,
        brand_color: details.brand_color,
        accent_color: details.accent_color,
        rc_number: details.rc_number,
        address: details.address,
        phone: details.phone,
        email: details.email,
        invoice_number: details.invoice_number,
        date: details.date,
        client_name: details.client_name,
        invoice_title: details.invoice_title,
        payee_name: details.payee_name,
        account_number: details.account_number,
        bank_name: details.bank_name,
    }
}

fn totals_to_proto(totals: &InvoiceTotals) -> TotalsBreakdown {
    TotalsBreakdown {
        subtotal_minor: totals.subtotal.minor(),
        discount_minor: totals.discount.minor(),
        taxable_base_minor: totals.taxable_base.minor(),
        tax_minor: totals.tax.minor(),
        grand_total_minor: totals.grand_total.minor(),
    }
}

fn rate_info(decision: &Decision) -> RateInfo {
    RateInfo {
        remaining: decision.remaining,
        reset_at: decision.reset_at,
        degraded: decision.degraded,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto;

    fn wire_request() -> InvoiceRequest {
        InvoiceRequest {
            client_identity: "client-1".to_string(),
            tier: "authenticated".to_string(),
            items: vec![proto::LineItem {
                description: "Consulting".to_string(),
                quantity_thousandths: 2_000,
                unit_price_minor: 10_000,
            }],
            tax_rate_bps: None,
            discount: None,
            details: None,
        }
    }

    #[test]
    fn test_parse_request_converts_items() {
        let (identity, tier, data) = parse_request(wire_request()).unwrap();

        assert_eq!(identity, "client-1");
        assert_eq!(tier, "authenticated");
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].quantity, Quantity::from_whole(2));
        assert_eq!(data.items[0].unit_price, Money::from_minor(10_000));
        assert!(data.tax_rate.is_none());
    }

    #[test]
    fn test_parse_request_requires_identity_and_tier() {
        let mut request = wire_request();
        request.client_identity = "  ".to_string();
        assert!(parse_request(request).is_err());

        let mut request = wire_request();
        request.tier = String::new();
        assert!(parse_request(request).is_err());
    }

    #[test]
    fn test_parse_request_maps_discount_kinds() {
        let mut request = wire_request();
        request.discount = Some(proto::Discount {
            kind: Some(Kind::PercentBps(1_000)),
        });
        let (_, _, data) = parse_request(request).unwrap();
        assert_eq!(data.discount, Some(Discount::Percentage(1_000)));

        let mut request = wire_request();
        request.discount = Some(proto::Discount {
            kind: Some(Kind::AmountMinor(5_000)),
        });
        let (_, _, data) = parse_request(request).unwrap();
        assert_eq!(data.discount, Some(Discount::Amount(Money::from_minor(5_000))));
    }

    #[test]
    fn test_totals_to_proto_preserves_minor_units() {
        let items = vec![LineItem::new(
            "Consulting",
            Quantity::from_whole(2),
            Money::from_minor(10_000),
        )];
        let totals =
            quill_core::compute_totals(&items, TaxRate::from_bps(750), None).unwrap();

        let wire = totals_to_proto(&totals);
        assert_eq!(wire.subtotal_minor, 20_000);
        assert_eq!(wire.tax_minor, 1_500);
        assert_eq!(wire.grand_total_minor, 21_500);
    }
}
