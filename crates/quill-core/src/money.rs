//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an invoice that is a LEGAL document:                                │
//! │    19.99 × 100 can print as 1998.9999999999998 → disputed total        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    Every amount is an i64 count of minor units (kobo, cents, ...).      │
//! │    All arithmetic is exact; rounding happens once, explicitly,          │
//! │    with round-half-up.                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every operation that can produce a fraction of a minor unit rounds
//! **half-up** (an exact half rounds away from zero). This is fixed and not
//! configurable: the same line items must always produce the same total.
//!
//! ## Usage
//! ```rust
//! use quill_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // Arithmetic operations
//! let total = price + Money::from_minor(500); // 15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::{Quantity, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (e.g. kobo for Naira).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative intermediates (credit notes, clamping)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► line_total ──► InvoiceTotals.subtotal
///                                              │
///                          discount ◄──────────┤
///                          tax      ◄──────────┤
///                                              ▼
///                                   InvoiceTotals.grand_total ──► words
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).major_part(), 10);
    /// assert_eq!(Money::from_minor(-550).major_part(), -5);
    /// ```
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).minor_part(), 99);
    /// assert_eq!(Money::from_minor(-550).minor_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes a line total: unit price × quantity, rounded half-up.
    ///
    /// Quantities are fixed-point thousandths, so a fraction of a minor unit
    /// can appear and must be rounded exactly once, here. Returns `None`
    /// when the rounded product leaves the representable i64 range (neither
    /// price nor quantity magnitude is bounded by validation).
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    /// use quill_core::types::Quantity;
    ///
    /// let unit_price = Money::from_minor(2001);      // 20.01
    /// let half = Quantity::from_thousandths(500);    // 0.5
    ///
    /// // 20.01 × 0.5 = 10.005 → rounds half-up to 10.01
    /// assert_eq!(unit_price.line_total(half).unwrap().minor(), 1001);
    /// ```
    ///
    /// ## Invoice Workflow
    /// ```text
    /// LineItem { unit_price: 650000.00, quantity: 18 }
    ///      │
    ///      ▼
    /// line_total(qty) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// 11,700,000.00 → summed into the subtotal
    /// ```
    pub fn line_total(&self, quantity: Quantity) -> Option<Money> {
        // i128 so the product itself cannot overflow; the checked cast back
        // catches results past the i64 range
        let product = self.0 as i128 * quantity.thousandths() as i128;
        round_half_up(product, 1000).map(Money)
    }

    /// Applies a basis-point rate (tax, percentage discount), rounded half-up.
    ///
    /// ## Half-Up, Not Bankers
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF-UP (away from zero)                                     │
    /// │                                                                     │
    /// │    10.005 → 10.01      (exact half rounds up)                       │
    /// │    10.004 → 10.00                                                   │
    /// │                                                                     │
    /// │  The printed total is a legal monetary statement; the rounding      │
    /// │  rule is part of the contract and is fixed at half-up.              │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::money::Money;
    /// use quill_core::types::TaxRate;
    ///
    /// let base = Money::from_minor(1190000000);  // 11,900,000.00
    /// let vat = TaxRate::from_bps(750);          // 7.5%
    ///
    /// // 11,900,000.00 × 7.5% = 892,500.00
    /// assert_eq!(base.apply_rate(vat.bps()).minor(), 89250000);
    /// ```
    pub fn apply_rate(&self, bps: u32) -> Money {
        // Rates above 100% are rejected by validation before any money math;
        // clamping here keeps |result| <= |self| for every input
        let product = self.0 as i128 * i128::from(bps.min(10_000));
        match round_half_up(product, 10_000) {
            Some(minor) => Money(minor),
            // Unreachable: |product / 10000| <= |self.0|
            None => *self,
        }
    }

    /// Calculates the tax amount for this value at the given rate.
    ///
    /// Thin wrapper over [`Money::apply_rate`]; exists so call sites read as
    /// what they mean.
    #[inline]
    pub fn tax_amount(&self, rate: TaxRate) -> Money {
        self.apply_rate(rate.bps())
    }

    /// Clamps this value into `[lo, hi]`.
    ///
    /// Used for absolute discounts, which may never exceed the subtotal and
    /// may never be negative.
    #[inline]
    pub fn clamp_between(&self, lo: Money, hi: Money) -> Money {
        Money(self.0.clamp(lo.0, hi.0))
    }

    /// Checked addition; `None` when the sum leaves the i64 range.
    ///
    /// Accumulation over caller-supplied amounts (subtotals, grand totals)
    /// goes through this; the `Add` operator stays for values already known
    /// to be in range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Divides `numerator / denominator`, rounding an exact half away from zero.
///
/// `denominator` must be positive. Callers pass i128 products so the add of
/// half the denominator cannot overflow; `None` when the rounded result does
/// not fit an i64.
fn round_half_up(numerator: i128, denominator: i128) -> Option<i64> {
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    i64::try_from(rounded).ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the amount as a plain decimal string.
///
/// ## Note
/// No currency symbol: currency names are configuration-supplied and belong
/// to the rendering layer, not to the amount itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
