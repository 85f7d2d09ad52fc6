//! Conversions between Horizon's decimal amount strings and stroops.
//!
//! Horizon reports balances as strings with seven decimal places
//! (`"100.0000000"`); XDR carries signed 64-bit stroop counts. No floating
//! point is involved in either direction.

use thiserror::Error;

use crate::config::{AMOUNT_DECIMALS, STROOPS_PER_LUMEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount {0:?}")]
    Invalid(String),

    #[error("amount {0:?} has more than seven decimal places")]
    TooPrecise(String),

    #[error("amount {0:?} does not fit in 64 bits of stroops")]
    Overflow(String),
}

/// Parses a decimal amount (`"12.5"`, `"100.0000000"`) into stroops.
pub fn to_stroops(amount: &str) -> Result<i64, AmountError> {
    let trimmed = amount.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(AmountError::Invalid(amount.to_string()));
    }
    if fraction.len() > AMOUNT_DECIMALS {
        return Err(AmountError::TooPrecise(amount.to_string()));
    }

    let overflow = || AmountError::Overflow(amount.to_string());
    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let fraction: i64 = format!("{fraction:0<width$}", width = AMOUNT_DECIMALS)
        .parse()
        .map_err(|_| AmountError::Invalid(amount.to_string()))?;

    let stroops = whole
        .checked_mul(STROOPS_PER_LUMEN)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(overflow)?;
    Ok(if negative { -stroops } else { stroops })
}

/// Formats stroops the way Horizon does: always seven decimal places.
pub fn format_stroops(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let abs = stroops.unsigned_abs();
    let per = STROOPS_PER_LUMEN as u64;
    format!(
        "{sign}{}.{:0width$}",
        abs / per,
        abs % per,
        width = AMOUNT_DECIMALS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_horizon_amounts() {
        assert_eq!(to_stroops("100.0000000"), Ok(1_000_000_000));
        assert_eq!(to_stroops("12.5"), Ok(125_000_000));
        assert_eq!(to_stroops("0.0000001"), Ok(1));
        assert_eq!(to_stroops("7"), Ok(70_000_000));
        assert_eq!(to_stroops(".5"), Ok(5_000_000));
        assert_eq!(to_stroops("-1.5"), Ok(-15_000_000));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(matches!(to_stroops(""), Err(AmountError::Invalid(_))));
        assert!(matches!(to_stroops("1.2.3"), Err(AmountError::Invalid(_))));
        assert!(matches!(to_stroops("abc"), Err(AmountError::Invalid(_))));
        assert!(matches!(
            to_stroops("1.00000001"),
            Err(AmountError::TooPrecise(_))
        ));
        assert!(matches!(
            to_stroops("922337203685.4775808"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn formats_with_seven_places() {
        assert_eq!(format_stroops(1_000_000_000), "100.0000000");
        assert_eq!(format_stroops(1), "0.0000001");
        assert_eq!(format_stroops(-15_000_000), "-1.5000000");
        assert_eq!(format_stroops(i64::MAX), "922337203685.4775807");
    }
}
