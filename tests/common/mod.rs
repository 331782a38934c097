// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use expense_mcp::application::ExpenseService;
use expense_mcp::domain::{Expense, ExpenseInput};
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixed reference date so reports and range checks are deterministic
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()
}

/// `today()` shifted back by `days`, formatted for input
pub fn days_ago(days: i64) -> String {
    (today() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Helper to create a test service over a ledger in a temporary directory.
/// The ledger file itself is not created.
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = ExpenseService::open(ledger_path(&temp_dir));
    Ok((service, temp_dir))
}

pub fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.csv")
}

/// Helper to write raw ledger contents
pub fn write_ledger(temp_dir: &TempDir, contents: &str) -> Result<()> {
    std::fs::write(ledger_path(temp_dir), contents)?;
    Ok(())
}

pub fn read_ledger(temp_dir: &TempDir) -> Result<String> {
    Ok(std::fs::read_to_string(ledger_path(temp_dir))?)
}

pub fn input(date: &str, category: &str, amount: &str, payment_method: &str) -> ExpenseInput {
    ExpenseInput {
        date: date.to_string(),
        category: category.to_string(),
        amount: amount.to_string(),
        payment_method: payment_method.to_string(),
    }
}

/// Record an expense dated `days` before `today()`
pub fn add(
    service: &ExpenseService,
    days: i64,
    category: &str,
    amount: &str,
    payment_method: &str,
) -> Result<Expense> {
    Ok(service.add_expense(&input(&days_ago(days), category, amount, payment_method), today())?)
}
