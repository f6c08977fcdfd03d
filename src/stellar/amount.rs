//! Native-asset amount parsing.
//!
//! Amounts travel as decimal strings and are converted to stroops
//! (1 XLM = 10_000_000 stroops) for envelope construction. Precision beyond
//! seven decimal places is rejected, never truncated.

use thiserror::Error;

/// Stroops per whole unit of the native asset.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Maximum supported fractional digits for the native asset.
pub const DECIMAL_PLACES: u32 = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a valid decimal number")]
    Malformed,

    #[error("amount has more than {DECIMAL_PLACES} decimal places")]
    TooManyDecimals,

    #[error("amount must be positive")]
    NotPositive,

    #[error("amount is too large")]
    Overflow,
}

/// Parse a decimal-string amount into stroops.
pub fn parse_native_amount(input: &str) -> Result<i64, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    if s.starts_with('-') {
        return Err(AmountError::NotPositive);
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Malformed);
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountError::Malformed);
    }
    if frac_part.len() as u32 > DECIMAL_PLACES {
        return Err(AmountError::TooManyDecimals);
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };

    let fraction: i64 = if frac_part.is_empty() {
        0
    } else {
        let parsed: i64 = frac_part.parse().map_err(|_| AmountError::Malformed)?;
        parsed * 10i64.pow(DECIMAL_PLACES - frac_part.len() as u32)
    };

    let stroops = whole
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|v| v.checked_add(fraction))
        .ok_or(AmountError::Overflow)?;

    if stroops <= 0 {
        return Err(AmountError::NotPositive);
    }

    Ok(stroops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(parse_native_amount("50").unwrap(), 500_000_000);
        assert_eq!(parse_native_amount("1").unwrap(), STROOPS_PER_UNIT);
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(parse_native_amount("100.5").unwrap(), 1_005_000_000);
        assert_eq!(parse_native_amount("0.0000001").unwrap(), 1);
        assert_eq!(parse_native_amount(".5").unwrap(), 5_000_000);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(parse_native_amount("0"), Err(AmountError::NotPositive));
        assert_eq!(parse_native_amount("0.0"), Err(AmountError::NotPositive));
        assert_eq!(parse_native_amount("-1"), Err(AmountError::NotPositive));
    }

    #[test]
    fn test_rejects_excess_precision() {
        // Eight decimal places is below one stroop; rejected, not truncated
        assert_eq!(
            parse_native_amount("1.00000001"),
            Err(AmountError::TooManyDecimals)
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_native_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_native_amount("."), Err(AmountError::Malformed));
        assert_eq!(parse_native_amount("1e5"), Err(AmountError::Malformed));
        assert_eq!(parse_native_amount("12a"), Err(AmountError::Malformed));
        assert_eq!(parse_native_amount("+5"), Err(AmountError::Malformed));
        assert_eq!(parse_native_amount("1.2.3"), Err(AmountError::Malformed));
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(
            parse_native_amount("99999999999999999999"),
            Err(AmountError::Overflow)
        );
    }
}
