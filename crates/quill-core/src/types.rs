//! # Domain Types
//!
//! Core domain types used throughout Quill Invoicing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  InvoiceTotals  │   │ InvoiceDetails  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  description    │   │  subtotal       │   │  brand, client  │       │
//! │  │  quantity       │   │  discount       │   │  invoice number │       │
//! │  │  unit_price     │   │  taxable_base   │   │  payment info   │       │
//! │  └─────────────────┘   │  tax            │   └─────────────────┘       │
//! │                        │  grand_total    │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │    TaxRate      │   ┌─────────────────┐   │  CurrencyNames  │       │
//! │  │  bps (u32)      │   │    Quantity     │   │  major: Naira   │       │
//! │  │  750 = 7.5%     │   │  thousandths    │   │  minor: Kobo    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fixed-Point Everywhere
//! Quantities are thousandths, rates are basis points, money is minor units.
//! No `f64` enters a monetary computation; decimal strings exist only at the
//! boundary.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Quantity
// =============================================================================

/// An item quantity in fixed-point thousandths (3 decimal places).
///
/// ## Why Thousandths?
/// Quantities may be fractional (1.5 hours, 0.25 kg). Thousandths keep the
/// arithmetic in integers while covering every quantity the invoice schema
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths (1500 = 1.5).
    #[inline]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Quantity(thousandths)
    }

    /// Creates a whole-number quantity.
    #[inline]
    pub const fn from_whole(count: i64) -> Self {
        Quantity(count * 1000)
    }

    /// Returns the raw fixed-point value.
    #[inline]
    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    /// Checks whether the quantity is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}", self.0 / 1000)
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            let abs = self.0.abs();
            let frac = format!("{:03}", abs % 1000);
            write!(f, "{}{}.{}", sign, abs / 1000, frac.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 750 bps = 7.5% (the VAT rate of the original deployment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount applied to the invoice subtotal.
///
/// Either a percentage of the subtotal (basis points, rounded half-up) or an
/// absolute amount (clamped into `[0, subtotal]` during computation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage(u32),
    /// Absolute amount in minor units.
    Amount(Money),
}

// =============================================================================
// Line Item
// =============================================================================

/// A single charge line on an invoice.
///
/// Supplied by the caller, validated before any computation, immutable once
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// What is being charged for.
    pub description: String,

    /// How many units (fixed-point thousandths).
    pub quantity: Quantity,

    /// Price per unit in minor units.
    pub unit_price: Money,
}

impl LineItem {
    /// Convenience constructor.
    pub fn new(description: impl Into<String>, quantity: Quantity, unit_price: Money) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
        }
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// The computed monetary breakdown of one invoice.
///
/// Derived, never mutated after computation. The construction invariant
/// `grand_total == taxable_base + tax` holds for every instance because
/// `grand_total` is only ever produced by that addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line totals.
    pub subtotal: Money,

    /// Discount actually applied (already clamped).
    pub discount: Money,

    /// `subtotal - discount`; the base the tax applies to.
    pub taxable_base: Money,

    /// Tax on the taxable base, rounded half-up.
    pub tax: Money,

    /// `taxable_base + tax`. Never independently mutated.
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// All-zero totals (the result for an empty item list).
    pub const fn zero() -> Self {
        InvoiceTotals {
            subtotal: Money::zero(),
            discount: Money::zero(),
            taxable_base: Money::zero(),
            tax: Money::zero(),
            grand_total: Money::zero(),
        }
    }
}

// =============================================================================
// Currency Names
// =============================================================================

/// Configuration-supplied names of the two-tier currency.
///
/// The words algorithm is currency-agnostic; only the names change. Names are
/// invariant: no "s" is appended for plurals ("Five Hundred Naira", never
/// "Nairas").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyNames {
    /// Name of the major unit (e.g. "Naira").
    pub major: String,

    /// Name of the 1/100 minor unit (e.g. "Kobo").
    pub minor: String,
}

impl CurrencyNames {
    /// Constructs currency names.
    pub fn new(major: impl Into<String>, minor: impl Into<String>) -> Self {
        CurrencyNames {
            major: major.into(),
            minor: minor.into(),
        }
    }
}

impl Default for CurrencyNames {
    /// The original deployment invoices in Nigerian Naira.
    fn default() -> Self {
        CurrencyNames::new("Naira", "Kobo")
    }
}

// =============================================================================
// Invoice Details
// =============================================================================

/// Presentation metadata for an invoice document.
///
/// Everything here is pass-through for the rendering layer: the core never
/// computes with it. All fields are optional with neutral defaults so a
/// caller can send only what it has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDetails {
    // Brand details
    pub brand_name: String,
    pub brand_logo_url: String,
    pub brand_color: String,
    pub accent_color: String,
    pub rc_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,

    // Client & invoice details
    pub invoice_number: String,
    pub date: String,
    pub client_name: String,
    pub invoice_title: String,

    // Payment details
    pub payee_name: String,
    pub account_number: String,
    pub bank_name: String,
}

impl InvoiceDetails {
    /// Returns the invoice number, generating a draft identifier when the
    /// caller supplied none.
    pub fn invoice_number_or_draft(&self) -> String {
        if self.invoice_number.trim().is_empty() {
            format!("draft-{}", uuid::Uuid::new_v4())
        } else {
            self.invoice_number.clone()
        }
    }

    /// Returns the invoice date, defaulting to today (UTC) when absent.
    pub fn date_or_today(&self) -> String {
        if self.date.trim().is_empty() {
            chrono::Utc::now().format("%Y-%m-%d").to_string()
        } else {
            self.date.clone()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from_whole(3).to_string(), "3");
        assert_eq!(Quantity::from_thousandths(1500).to_string(), "1.5");
        assert_eq!(Quantity::from_thousandths(250).to_string(), "0.25");
    }

    #[test]
    fn test_tax_rate_percentage() {
        assert_eq!(TaxRate::from_bps(750).percentage(), 7.5);
        assert_eq!(TaxRate::zero().bps(), 0);
    }

    #[test]
    fn test_invoice_totals_zero() {
        let totals = InvoiceTotals::zero();
        assert!(totals.grand_total.is_zero());
        assert_eq!(totals.grand_total, totals.taxable_base + totals.tax);
    }

    #[test]
    fn test_currency_names_default() {
        let names = CurrencyNames::default();
        assert_eq!(names.major, "Naira");
        assert_eq!(names.minor, "Kobo");
    }

    #[test]
    fn test_invoice_number_fallback() {
        let details = InvoiceDetails::default();
        assert!(details.invoice_number_or_draft().starts_with("draft-"));

        let numbered = InvoiceDetails {
            invoice_number: "INV-100".to_string(),
            ..Default::default()
        };
        assert_eq!(numbered.invoice_number_or_draft(), "INV-100");
    }

    #[test]
    fn test_details_roundtrip_json() {
        let details = InvoiceDetails {
            brand_name: "Zatras Global Services Limited".to_string(),
            invoice_number: "100".to_string(),
            client_name: "NNPC Academy".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&details).unwrap();
        let back: InvoiceDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }
}
