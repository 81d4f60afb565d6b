//! # quill-core: Pure Business Logic for Quill Invoicing
//!
//! This crate is the **heart** of Quill Invoicing. It contains all monetary
//! computation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quill Invoicing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   invoice-api (gRPC server)                     │   │
//! │  │    admit ──► compute totals ──► words ──► template ──► PDF     │   │
//! │  └─────────────┬───────────────────────────────┬─────────────────┘   │
//! │                │                               │                        │
//! │  ┌─────────────▼─────────────┐   ┌─────────────▼─────────────────┐    │
//! │  │   quill-limit             │   │   ★ quill-core (THIS CRATE) ★ │    │
//! │  │   RateLimiter over an     │   │                               │    │
//! │  │   external counter store  │   │  ┌───────┐ ┌────────┐        │    │
//! │  └───────────────────────────┘   │  │ money │ │ totals │        │    │
//! │                                  │  └───────┘ └────────┘        │    │
//! │                                  │  ┌───────┐ ┌──────────────┐  │    │
//! │                                  │  │ words │ │ validation   │  │    │
//! │                                  │  └───────┘ └──────────────┘  │    │
//! │                                  │                               │    │
//! │                                  │  NO I/O • PURE FUNCTIONS      │    │
//! │                                  └───────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, InvoiceTotals, CurrencyNames, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Invoice totals computation (subtotal/discount/tax/total)
//! - [`words`] - Amount-in-words rendering for the two-tier currency
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; totals are auditable
//! 2. **No I/O**: network, file system, counter store access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are minor units (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//! 5. **Round-half-up**: the one rounding rule, fixed, not configurable
//!
//! ## Example Usage
//!
//! ```rust
//! use quill_core::money::Money;
//! use quill_core::totals::compute_totals;
//! use quill_core::types::{CurrencyNames, LineItem, Quantity, TaxRate};
//! use quill_core::words::amount_in_words;
//!
//! let items = vec![
//!     LineItem::new("Venue Logistics", Quantity::from_whole(2), Money::from_minor(10_000_000)),
//! ];
//! let totals = compute_totals(&items, TaxRate::from_bps(750), None).unwrap();
//! let words = amount_in_words(totals.grand_total, &CurrencyNames::default()).unwrap();
//!
//! assert_eq!(totals.grand_total.minor(), 21_500_000);
//! assert_eq!(words, "Two Hundred and Fifteen Thousand Naira Only");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quill_core::Money` instead of
// `use quill_core::money::Money`

pub use error::{CoreError, ValidationError, WordsError};
pub use money::Money;
pub use totals::compute_totals;
pub use types::*;
pub use words::amount_in_words;
