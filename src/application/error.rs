use thiserror::Error;

use crate::domain::{valid_values, AmountError, Category, DateError, PaymentMethod};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: DateError },

    #[error("Invalid category '{0}'. Use one of: {categories}", categories = valid_values(&Category::ALL))]
    InvalidCategory(String),

    #[error("Invalid payment method '{0}'. Use one of: {methods}", methods = valid_values(&PaymentMethod::ALL))]
    InvalidPaymentMethod(String),

    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: AmountError },

    #[error("Invalid period: {0} days (must be between 1 and 365)")]
    InvalidPeriod(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    /// True when the caller supplied bad input, as opposed to a storage failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AppError::Storage(_))
    }
}
