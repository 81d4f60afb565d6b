//! # Invoice Totals
//!
//! Pure computation turning validated line items plus a tax rate and an
//! optional discount into the monetary breakdown of one invoice.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_totals                                     │
//! │                                                                         │
//! │  [LineItem] ──► validate all ──► line totals (round half-up)           │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                    subtotal                             │
//! │                                        │                                │
//! │     discount (pct half-up / abs clamped to [0, subtotal])              │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                   taxable_base = subtotal - discount                    │
//! │                                        │                                │
//! │                     tax = taxable_base × rate (half-up)                 │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                  grand_total = taxable_base + tax                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! All arithmetic is on integer minor units; any rate multiplication is
//! scaled fixed-point with explicit half-up rounding. The same request
//! always produces the same totals, on any machine.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Discount, InvoiceTotals, LineItem, TaxRate};
use crate::validation::{validate_discount, validate_line_item, validate_tax_rate};

/// Computes the full monetary breakdown of an invoice.
///
/// ## Behavior
/// - Every item is validated up front; the first failure rejects the whole
///   request and no partial totals are produced.
/// - An empty item list is NOT an error: it yields all-zero totals.
/// - A discount exceeding the subtotal is clamped, never a negative base.
///
/// ## Example
/// ```rust
/// use quill_core::money::Money;
/// use quill_core::totals::compute_totals;
/// use quill_core::types::{LineItem, Quantity, TaxRate};
///
/// let items = vec![
///     LineItem::new("Training delivery", Quantity::from_whole(2), Money::from_minor(10_000)),
/// ];
/// let totals = compute_totals(&items, TaxRate::from_bps(750), None).unwrap();
///
/// assert_eq!(totals.subtotal.minor(), 20_000);
/// assert_eq!(totals.tax.minor(), 1_500); // 7.5%
/// assert_eq!(totals.grand_total.minor(), 21_500);
/// ```
pub fn compute_totals(
    items: &[LineItem],
    tax_rate: TaxRate,
    discount: Option<Discount>,
) -> Result<InvoiceTotals, ValidationError> {
    // Validate everything before computing anything
    validate_tax_rate(tax_rate)?;
    if let Some(ref discount) = discount {
        validate_discount(discount)?;
    }
    for item in items {
        validate_line_item(item)?;
    }

    let mut subtotal = Money::zero();
    for item in items {
        let line = item
            .unit_price
            .line_total(item.quantity)
            .ok_or_else(|| overflow("line_total"))?;
        subtotal = subtotal
            .checked_add(line)
            .ok_or_else(|| overflow("subtotal"))?;
    }

    let discount_amount = match discount {
        Some(Discount::Percentage(bps)) => subtotal.apply_rate(bps),
        Some(Discount::Amount(amount)) => amount.clamp_between(Money::zero(), subtotal),
        None => Money::zero(),
    };

    let taxable_base = subtotal - discount_amount;
    let tax = taxable_base.tax_amount(tax_rate);

    // The ONLY place grand_total is produced; the construction invariant
    // grand_total == taxable_base + tax holds for every instance.
    let grand_total = taxable_base
        .checked_add(tax)
        .ok_or_else(|| overflow("grand_total"))?;

    Ok(InvoiceTotals {
        subtotal,
        discount: discount_amount,
        taxable_base,
        tax,
        grand_total,
    })
}

/// Computes the rounded total of a single line (for per-line display).
pub fn line_total(item: &LineItem) -> Result<Money, ValidationError> {
    validate_line_item(item)?;
    item.unit_price
        .line_total(item.quantity)
        .ok_or_else(|| overflow("line_total"))
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quantity;

    fn item(description: &str, qty: Quantity, price_minor: i64) -> LineItem {
        LineItem::new(description, qty, Money::from_minor(price_minor))
    }

    #[test]
    fn test_empty_items_is_zero_not_error() {
        let totals = compute_totals(&[], TaxRate::from_bps(750), None).unwrap();
        assert_eq!(totals, InvoiceTotals::zero());
    }

    #[test]
    fn test_grand_total_construction_invariant() {
        let items = vec![
            item("Participant's Expenses", Quantity::from_whole(18), 65_000_000),
            item("Venue Logistics", Quantity::from_whole(2), 10_000_000),
        ];
        let totals = compute_totals(&items, TaxRate::from_bps(750), None).unwrap();

        assert_eq!(totals.subtotal.minor(), 1_190_000_000);
        assert_eq!(totals.tax.minor(), 89_250_000);
        assert_eq!(totals.grand_total.minor(), 1_279_250_000);
        assert_eq!(totals.grand_total, totals.taxable_base + totals.tax);
    }

    #[test]
    fn test_half_minor_unit_rounds_up() {
        // 20.01 × 0.5 = 10.005 → 10.01 (half-up, not bankers)
        let items = vec![item("Half unit", Quantity::from_thousandths(500), 2001)];
        let totals = compute_totals(&items, TaxRate::zero(), None).unwrap();
        assert_eq!(totals.subtotal.minor(), 1001);
        assert_eq!(totals.grand_total.minor(), 1001);
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        // Subtotal 10.01, 5% discount = 0.5005 → 0.50
        let items = vec![item("Widget", Quantity::from_whole(1), 1001)];
        let totals =
            compute_totals(&items, TaxRate::zero(), Some(Discount::Percentage(500))).unwrap();
        assert_eq!(totals.discount.minor(), 50);
        assert_eq!(totals.taxable_base.minor(), 951);

        // Subtotal 10.03, 5% discount = 0.5015 → 0.50... check an exact half:
        // subtotal 10.10, 5% = 0.505 → 0.51
        let items = vec![item("Widget", Quantity::from_whole(1), 1010)];
        let totals =
            compute_totals(&items, TaxRate::zero(), Some(Discount::Percentage(500))).unwrap();
        assert_eq!(totals.discount.minor(), 51);
    }

    #[test]
    fn test_absolute_discount_clamped_to_subtotal() {
        let items = vec![item("Widget", Quantity::from_whole(1), 1000)];
        let totals = compute_totals(
            &items,
            TaxRate::from_bps(750),
            Some(Discount::Amount(Money::from_minor(99_999))),
        )
        .unwrap();

        assert_eq!(totals.discount.minor(), 1000);
        assert_eq!(totals.taxable_base.minor(), 0); // clamped, never negative
        assert_eq!(totals.tax.minor(), 0);
        assert_eq!(totals.grand_total.minor(), 0);
    }

    #[test]
    fn test_negative_quantity_rejects_whole_request() {
        let items = vec![
            item("Fine", Quantity::from_whole(1), 1000),
            item("Broken", Quantity::from_whole(-1), 1000),
        ];
        let err = compute_totals(&items, TaxRate::zero(), None).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { .. }));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let items = vec![item("Broken", Quantity::from_whole(1), -5)];
        assert!(compute_totals(&items, TaxRate::zero(), None).is_err());
    }

    #[test]
    fn test_tax_rate_above_hundred_percent_rejected() {
        let items = vec![item("Widget", Quantity::from_whole(1), 1000)];
        let err = compute_totals(&items, TaxRate::from_bps(10001), None).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_line_total_overflow_rejected() {
        // Product far past the i64 range; representable inputs, so this is a
        // request defect, not a panic
        let items = vec![item("Astronomical", Quantity::from_whole(1_000_000), i64::MAX)];
        let err = compute_totals(&items, TaxRate::zero(), None).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }

    #[test]
    fn test_subtotal_overflow_rejected() {
        let items = vec![
            item("A", Quantity::from_whole(1), i64::MAX),
            item("B", Quantity::from_whole(1), i64::MAX),
        ];
        let err = compute_totals(&items, TaxRate::zero(), None).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }

    #[test]
    fn test_grand_total_overflow_rejected() {
        // Subtotal fits; adding 7.5% tax does not
        let items = vec![item("A", Quantity::from_whole(1), i64::MAX)];
        let err = compute_totals(&items, TaxRate::from_bps(750), None).unwrap_err();
        assert!(matches!(err, ValidationError::Overflow { .. }));
    }

    #[test]
    fn test_line_total_helper() {
        let single = item("Widget", Quantity::from_thousandths(1500), 200);
        assert_eq!(line_total(&single).unwrap().minor(), 300);
    }

    #[test]
    fn test_determinism() {
        let items = vec![
            item("A", Quantity::from_thousandths(1234), 999),
            item("B", Quantity::from_whole(7), 12_345),
        ];
        let a = compute_totals(&items, TaxRate::from_bps(825), Some(Discount::Percentage(250)))
            .unwrap();
        let b = compute_totals(&items, TaxRate::from_bps(825), Some(Discount::Percentage(250)))
            .unwrap();
        assert_eq!(a, b);
    }
}
