use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Category, Cents, PaymentMethod};

/// Date format used for input and for the ledger's date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far into the future an expense may be dated.
pub const MAX_DAYS_AHEAD: i64 = 365;

/// How far into the past an expense may be dated (roughly ten years).
pub const MAX_DAYS_BACK: i64 = 3650;

/// Ledger columns, in the order they are written.
pub const LEDGER_COLUMNS: [&str; 4] = ["date", "category", "amount", "payment_method"];

/// Raw, unvalidated expense as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub payment_method: String,
}

/// A validated expense, ready to be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount_cents: Cents,
    pub payment_method: PaymentMethod,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        payment_method: PaymentMethod,
    ) -> Self {
        assert!(amount_cents > 0, "Expense amount must be positive");
        Self {
            date,
            category,
            amount_cents,
            payment_method,
        }
    }
}

/// A ledger line as handed back to clients.
///
/// Fields are the trimmed text of the ledger, not re-validated. `amount` is
/// `None` (serialized as `null`) when the column is not a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedExpense {
    pub date: String,
    pub category: String,
    pub amount: Option<f64>,
    pub payment_method: String,
}

/// Coerce a ledger amount column to a number, if it is one.
pub fn coerce_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse and range-check an expense date relative to `today`.
pub fn validate_date(input: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    // chrono accepts single-digit months and days; the ledger format does not.
    if input.len() != 10 {
        return Err(DateError::InvalidFormat);
    }
    let date =
        NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| DateError::InvalidFormat)?;

    if date > today + Duration::days(MAX_DAYS_AHEAD) {
        return Err(DateError::TooFarInFuture);
    }
    if date < today - Duration::days(MAX_DAYS_BACK) {
        return Err(DateError::TooOld);
    }
    Ok(date)
}

/// Lenient date parse for rows read back from the ledger.
pub fn parse_ledger_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    InvalidFormat,
    TooFarInFuture,
    TooOld,
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidFormat => write!(f, "invalid format, use YYYY-MM-DD"),
            DateError::TooFarInFuture => {
                write!(f, "more than {} days in the future", MAX_DAYS_AHEAD)
            }
            DateError::TooOld => write!(f, "more than {} days in the past", MAX_DAYS_BACK),
        }
    }
}

impl std::error::Error for DateError {}
