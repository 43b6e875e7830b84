//! Decimal-string amounts to on-chain integers.

use alloy_primitives::U256;
use alloy_primitives::utils::parse_units;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("invalid amount {input:?}: {reason}")]
    Invalid { input: String, reason: String },
}

/// Scale `input` by `10^decimals`.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::NotPositive);
    }

    // parse_units skips `_` separators; only plain decimal notation is accepted.
    if !is_plain_decimal(trimmed) {
        return Err(AmountError::Invalid {
            input: trimmed.to_owned(),
            reason: "expected digits with an optional decimal point".to_owned(),
        });
    }

    let value: U256 = parse_units(trimmed, decimals)
        .map_err(|err| AmountError::Invalid {
            input: trimmed.to_owned(),
            reason: err.to_string(),
        })?
        .into();

    if value.is_zero() {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

fn is_plain_decimal(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || c == '.') && input.matches('.').count() <= 1
}

/// Cheap gate for the submit control: empty and non-positive amounts disable it,
/// malformed ones do not so that submitting can report them.
pub fn is_submittable(input: &str, decimals: u8) -> bool {
    !matches!(
        parse_amount(input, decimals),
        Err(AmountError::Empty | AmountError::NotPositive)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEI: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn scales_by_eighteen_decimals() {
        assert_eq!(parse_amount("1.5", 18), Ok(U256::from(1_500_000_000_000_000_000u128)));
        assert_eq!(parse_amount("2", 18), Ok(U256::from(2 * WEI)));
        assert_eq!(parse_amount("0.000000000000000001", 18), Ok(U256::from(1)));
        assert_eq!(parse_amount("  3.25 ", 18), Ok(U256::from(3_250_000_000_000_000_000u128)));
    }

    #[test]
    fn full_precision_fraction_is_exact() {
        assert_eq!(
            parse_amount("123.456789012345678901", 18),
            Ok(U256::from(123_456_789_012_345_678_901u128))
        );
    }

    #[test]
    fn empty_and_non_positive_are_rejected() {
        assert_eq!(parse_amount("", 18), Err(AmountError::Empty));
        assert_eq!(parse_amount("   ", 18), Err(AmountError::Empty));
        assert_eq!(parse_amount("0", 18), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("0.000", 18), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("-1", 18), Err(AmountError::NotPositive));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(parse_amount("abc", 18), Err(AmountError::Invalid { .. })));
        for input in ["12abc", "1_000", "1e3", "+1", "1.2.3", "1 000"] {
            assert!(
                matches!(parse_amount(input, 18), Err(AmountError::Invalid { .. })),
                "{input:?} should be invalid"
            );
        }
    }

    #[test]
    fn submit_gate_lets_malformed_input_through() {
        assert!(is_submittable("1", 18));
        assert!(is_submittable("abc", 18));
        assert!(is_submittable("1_000", 18));
        assert!(!is_submittable("", 18));
        assert!(!is_submittable("0", 18));
        assert!(!is_submittable("-2", 18));
    }
}
