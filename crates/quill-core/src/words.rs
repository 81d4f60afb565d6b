//! # Amount In Words
//!
//! Renders a monetary amount as grammatically correct English words in a
//! two-tier currency, the way the total appears on a printed invoice:
//!
//! ```text
//! 12,792,500.00 → "Twelve Million, Seven Hundred and Ninety-Two Thousand,
//!                  Five Hundred Naira Only"
//! ```
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       amount_in_words                                   │
//! │                                                                         │
//! │  Money ──► split major / minor (0-99)                                   │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  major integer → 3-digit groups → lookup tables → scale names          │
//! │       "and" before the final two-digit part of each group              │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  "<major words> <MajorName>[ and <minor words> <MinorName>] Only"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Word tables are static arrays indexed by magnitude, not cascading
//! branches, so adding another two-tier currency never touches control flow.
//!
//! ## Bound
//! The converter covers 0 through 999,999,999,999 major units (the largest
//! amount the ones/thousand/million/billion tables express). Anything above
//! fails with [`WordsError::AmountTooLarge`] rather than emit a wrong or
//! truncated string.

use crate::error::WordsError;
use crate::money::Money;
use crate::types::CurrencyNames;

/// Largest major-unit amount the converter renders.
pub const MAX_WORDS_MAJOR: i64 = 999_999_999_999;

// =============================================================================
// Word Tables
// =============================================================================

/// 0-19, indexed directly.
const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

/// Multiples of ten, indexed by tens digit (0 and 1 unused).
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Short-scale group names, indexed by thousand-group position.
const SCALES: [&str; 4] = ["", "Thousand", "Million", "Billion"];

// =============================================================================
// Conversion
// =============================================================================

/// Renders a non-negative monetary amount as words.
///
/// ## Output Forms
/// - `0.00`  → `"Zero <Major> Only"`
/// - `0.50`  → `"Fifty <Minor> Only"` (major clause omitted entirely)
/// - `12.00` → `"Twelve <Major> Only"`
/// - `12.50` → `"Twelve <Major> and Fifty <Minor> Only"`
///
/// Currency names are invariant: no "s" is appended for plurals. The result
/// always ends with `" Only"`, the closed-statement convention of printed
/// invoices.
///
/// ## Example
/// ```rust
/// use quill_core::money::Money;
/// use quill_core::types::CurrencyNames;
/// use quill_core::words::amount_in_words;
///
/// let names = CurrencyNames::default(); // Naira / Kobo
/// let words = amount_in_words(Money::from_major_minor(1_050, 25), &names).unwrap();
/// assert_eq!(words, "One Thousand, Fifty Naira and Twenty-Five Kobo Only");
/// ```
pub fn amount_in_words(amount: Money, names: &CurrencyNames) -> Result<String, WordsError> {
    if amount.is_negative() {
        return Err(WordsError::NegativeAmount {
            minor: amount.minor(),
        });
    }

    let major = amount.major_part();
    let minor = amount.minor_part();

    if major > MAX_WORDS_MAJOR {
        return Err(WordsError::AmountTooLarge {
            major,
            max: MAX_WORDS_MAJOR,
        });
    }

    if major == 0 && minor == 0 {
        return Ok(format!("Zero {} Only", names.major));
    }

    let mut result = String::new();

    if major > 0 {
        result.push_str(&number_to_words(major as u64));
        result.push(' ');
        result.push_str(&names.major);
    }

    if minor > 0 {
        if major > 0 {
            result.push_str(" and ");
        }
        result.push_str(&number_to_words(minor as u64));
        result.push(' ');
        result.push_str(&names.minor);
    }

    result.push_str(" Only");
    Ok(result)
}

/// Renders a positive integer (1..=999,999,999,999) as English words.
///
/// Groups of three digits, highest scale first, joined with ", ".
fn number_to_words(mut n: u64) -> String {
    debug_assert!(n > 0 && n <= MAX_WORDS_MAJOR as u64);

    // Collect 3-digit groups, lowest first
    let mut groups = [0u16; 4];
    let mut count = 0;
    while n > 0 {
        groups[count] = (n % 1000) as u16;
        n /= 1000;
        count += 1;
    }

    let mut parts = Vec::with_capacity(count);
    for level in (0..count).rev() {
        let group = groups[level];
        if group == 0 {
            continue;
        }
        let mut part = group_to_words(group);
        if !SCALES[level].is_empty() {
            part.push(' ');
            part.push_str(SCALES[level]);
        }
        parts.push(part);
    }

    parts.join(", ")
}

/// Renders one 3-digit group (1..=999), with "and" before the final
/// two-digit part when a hundreds digit is present.
fn group_to_words(n: u16) -> String {
    match n {
        1..=19 => ONES[n as usize].to_string(),
        20..=99 => tens_to_words(n),
        _ => {
            let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => hundreds,
                remainder if remainder < 20 => {
                    format!("{} and {}", hundreds, ONES[remainder as usize])
                }
                remainder => format!("{} and {}", hundreds, tens_to_words(remainder)),
            }
        }
    }
}

/// Renders 20..=99 ("Forty", "Forty-Five").
fn tens_to_words(n: u16) -> String {
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        ones => format!("{}-{}", tens, ONES[ones as usize]),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn naira() -> CurrencyNames {
        CurrencyNames::default()
    }

    fn words(major: i64, minor: i64) -> String {
        amount_in_words(Money::from_major_minor(major, minor), &naira()).unwrap()
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(words(0, 0), "Zero Naira Only");
    }

    #[test]
    fn test_minor_only_omits_major_clause() {
        assert_eq!(words(0, 50), "Fifty Kobo Only");
        assert_eq!(words(0, 1), "One Kobo Only");
    }

    #[test]
    fn test_major_only() {
        assert_eq!(words(1, 0), "One Naira Only");
        assert_eq!(words(12, 0), "Twelve Naira Only");
        assert_eq!(words(45, 0), "Forty-Five Naira Only");
        assert_eq!(words(100, 0), "One Hundred Naira Only");
    }

    #[test]
    fn test_major_and_minor() {
        assert_eq!(words(12, 50), "Twelve Naira and Fifty Kobo Only");
    }

    #[test]
    fn test_and_before_final_two_digit_group() {
        assert_eq!(words(203, 0), "Two Hundred and Three Naira Only");
        assert_eq!(words(999, 0), "Nine Hundred and Ninety-Nine Naira Only");
        assert_eq!(
            words(1_000_203, 0),
            "One Million, Two Hundred and Three Naira Only"
        );
    }

    #[test]
    fn test_scale_groups_joined_with_commas() {
        assert_eq!(words(1_000, 0), "One Thousand Naira Only");
        assert_eq!(words(1_050, 0), "One Thousand, Fifty Naira Only");
        assert_eq!(
            words(12_792_500, 0),
            "Twelve Million, Seven Hundred and Ninety-Two Thousand, Five Hundred Naira Only"
        );
    }

    #[test]
    fn test_zero_groups_are_skipped() {
        assert_eq!(words(1_000_000, 0), "One Million Naira Only");
        assert_eq!(
            words(1_000_000_001, 0),
            "One Billion, One Naira Only"
        );
    }

    #[test]
    fn test_currency_name_is_invariant() {
        // Never "Nairas", regardless of magnitude
        assert!(!words(500, 0).contains("Nairas"));
        assert!(!words(2, 2).contains("Kobos"));
    }

    #[test]
    fn test_always_ends_with_only() {
        for (major, minor) in [(0, 0), (0, 7), (19, 0), (1234, 56)] {
            assert!(words(major, minor).ends_with(" Only"));
        }
    }

    #[test]
    fn test_bound_is_exact() {
        let max = amount_in_words(
            Money::from_major_minor(MAX_WORDS_MAJOR, 99),
            &naira(),
        )
        .unwrap();
        assert_eq!(
            max,
            "Nine Hundred and Ninety-Nine Billion, Nine Hundred and Ninety-Nine Million, \
             Nine Hundred and Ninety-Nine Thousand, Nine Hundred and Ninety-Nine Naira \
             and Ninety-Nine Kobo Only"
        );

        let over = amount_in_words(
            Money::from_major_minor(MAX_WORDS_MAJOR + 1, 0),
            &naira(),
        );
        assert!(matches!(over, Err(WordsError::AmountTooLarge { .. })));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = amount_in_words(Money::from_minor(-1), &naira());
        assert!(matches!(err, Err(WordsError::NegativeAmount { .. })));
    }

    #[test]
    fn test_deterministic() {
        let amount = Money::from_major_minor(987_654_321, 9);
        let a = amount_in_words(amount, &naira()).unwrap();
        let b = amount_in_words(amount, &naira()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_other_currency_names() {
        let cedi = CurrencyNames::new("Cedi", "Pesewa");
        let words = amount_in_words(Money::from_major_minor(3, 25), &cedi).unwrap();
        assert_eq!(words, "Three Cedi and Twenty-Five Pesewa Only");
    }
}
