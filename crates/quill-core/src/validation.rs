//! # Validation Module
//!
//! Input validation for caller-supplied invoice data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Wire (prost/serde)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Malformed payloads never reach the core                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── quantity > 0, unit price ≥ 0, tax rate in [0, 100%]              │
//! │  └── The WHOLE request is rejected; no partial totals are produced    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Construction invariants (InvoiceTotals)                      │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of defect      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Discount, LineItem, Quantity, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a line-item description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be strictly positive (a zero-quantity line is a request defect)
///
/// ## Example
/// ```rust
/// use quill_core::types::Quantity;
/// use quill_core::validation::validate_quantity;
///
/// assert!(validate_quantity(Quantity::from_whole(5)).is_ok());
/// assert!(validate_quantity(Quantity::from_whole(0)).is_err());
/// assert!(validate_quantity(Quantity::from_thousandths(-500)).is_err());
/// ```
pub fn validate_quantity(quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: complimentary lines)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
///
/// ## Example
/// ```rust
/// use quill_core::types::TaxRate;
/// use quill_core::validation::validate_tax_rate;
///
/// assert!(validate_tax_rate(TaxRate::from_bps(750)).is_ok());
/// assert!(validate_tax_rate(TaxRate::from_bps(10001)).is_err());
/// ```
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a discount.
///
/// ## Rules
/// - Percentage discounts must be between 0 and 10000 bps
/// - Absolute discounts must be non-negative (clamping to the subtotal
///   happens later, during computation - an oversized discount is legal,
///   a negative one is a defect)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(bps) => {
            if *bps > 10000 {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: 0,
                    max: 10000,
                });
            }
        }
        Discount::Amount(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::MustNotBeNegative {
                    field: "discount".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates a line-item description.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates one complete line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_description(&item.description)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_whole(1)).is_ok());
        assert!(validate_quantity(Quantity::from_thousandths(1)).is_ok());

        assert!(validate_quantity(Quantity::from_whole(0)).is_err());
        assert!(validate_quantity(Quantity::from_whole(-1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_minor(0)).is_ok());
        assert!(validate_unit_price(Money::from_minor(1099)).is_ok());
        assert!(validate_unit_price(Money::from_minor(-1)).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_bps(0)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(750)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10001)).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(&Discount::Percentage(1000)).is_ok());
        assert!(validate_discount(&Discount::Percentage(10001)).is_err());

        assert!(validate_discount(&Discount::Amount(Money::from_minor(500))).is_ok());
        // Oversized is fine (clamped later); negative is a defect
        assert!(validate_discount(&Discount::Amount(Money::from_minor(i64::MAX))).is_ok());
        assert!(validate_discount(&Discount::Amount(Money::from_minor(-1))).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Venue Logistics").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"A".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let good = LineItem::new(
            "Participant's Expenses",
            Quantity::from_whole(18),
            Money::from_minor(65_000_000),
        );
        assert!(validate_line_item(&good).is_ok());

        let bad_quantity = LineItem::new(
            "Venue Logistics",
            Quantity::from_whole(0),
            Money::from_minor(100),
        );
        assert!(validate_line_item(&bad_quantity).is_err());
    }
}
