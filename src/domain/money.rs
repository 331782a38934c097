use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Largest amount accepted for a single expense or budget limit, in cents.
pub const MAX_AMOUNT_CENTS: Cents = 1_000_000 * 100;

/// Format cents as a plain decimal string, the way amounts are written to the ledger.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Convert cents back to a floating-point amount for JSON output.
pub fn cents_to_f64(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Convert a ledger amount to cents, rounding to the nearest cent.
///
/// Values beyond [`MAX_AMOUNT_CENTS`] in either direction are rejected: append
/// never writes them, and summing them could overflow.
pub fn amount_to_cents(value: f64) -> Option<Cents> {
    if !value.is_finite() || value.abs() > cents_to_f64(MAX_AMOUNT_CENTS) {
        return None;
    }
    Some((value * 100.0).round() as Cents)
}

/// Validate a user-supplied amount and convert it to cents.
///
/// The input must be numeric, strictly positive, no larger than
/// [`MAX_AMOUNT_CENTS`] and carry at most two decimals. Anything `f64`
/// accepts counts as numeric ("12", "12.5", "1e2"), except NaN and infinities.
pub fn validate_amount(input: &str) -> Result<Cents, AmountError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| AmountError::NotNumeric)?;
    if !value.is_finite() {
        return Err(AmountError::NotNumeric);
    }
    if value <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    if value > cents_to_f64(MAX_AMOUNT_CENTS) {
        return Err(AmountError::TooLarge);
    }

    // Division is correctly rounded, so any two-decimal input maps back to itself.
    let cents = (value * 100.0).round();
    if cents / 100.0 != value {
        return Err(AmountError::TooManyDecimals);
    }
    Ok(cents as Cents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    NotNumeric,
    NotPositive,
    TooLarge,
    TooManyDecimals,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::NotNumeric => write!(f, "amount must be a number"),
            AmountError::NotPositive => write!(f, "amount must be positive"),
            AmountError::TooLarge => write!(
                f,
                "amount exceeds the limit of {}",
                format_cents(MAX_AMOUNT_CENTS)
            ),
            AmountError::TooManyDecimals => write!(f, "amount allows at most 2 decimals"),
        }
    }
}

impl std::error::Error for AmountError {}
