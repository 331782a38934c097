use chrono::{Duration, Local, NaiveDate};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::domain::{
    amount_to_cents, coerce_amount, parse_ledger_date, validate_amount, validate_date, Category,
    Cents, Expense, ExpenseInput, ExportedExpense, PaymentMethod,
};
use crate::storage::{LedgerFile, LedgerRow};

use super::reporting::{
    percentage, BudgetCheck, BudgetLevel, RecentExpense, ShareSummary, SpendingSummary,
    RECENT_LIMIT,
};
use super::AppError;

/// Longest reporting window, in days.
pub const MAX_PERIOD_DAYS: i64 = 365;

pub const DEFAULT_SUMMARY_DAYS: i64 = 7;
pub const DEFAULT_BUDGET_DAYS: i64 = 30;

/// Application service providing the expense operations.
/// This is the interface shared by the MCP server and the CLI.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    ledger: LedgerFile,
}

/// A ledger row whose date and amount both parsed.
struct DatedRow {
    date: NaiveDate,
    category: String,
    amount: Cents,
    payment_method: String,
}

impl ExpenseService {
    /// Create a new expense service over the given ledger.
    pub fn new(ledger: LedgerFile) -> Self {
        Self { ledger }
    }

    /// Open the ledger at `path` without touching the file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(LedgerFile::new(path))
    }

    /// Open the ledger at `path`, creating it with a header if missing.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let service = Self::open(path);
        service.ledger.ensure()?;
        Ok(service)
    }

    pub fn ledger(&self) -> &LedgerFile {
        &self.ledger
    }

    /// Today's date in local time, the reference point for validation and reports.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // ========================
    // Ledger operations
    // ========================

    /// Validate an expense without writing it.
    ///
    /// Checks run in order: date, category, amount, payment method.
    pub fn validate_expense(
        &self,
        input: &ExpenseInput,
        today: NaiveDate,
    ) -> Result<Expense, AppError> {
        let date = validate_date(&input.date, today).map_err(|reason| AppError::InvalidDate {
            input: input.date.clone(),
            reason,
        })?;

        let category = parse_category(&input.category)?;

        let amount_cents =
            validate_amount(&input.amount).map_err(|reason| AppError::InvalidAmount {
                input: input.amount.clone(),
                reason,
            })?;

        let payment_method = PaymentMethod::from_str(&input.payment_method)
            .ok_or_else(|| AppError::InvalidPaymentMethod(input.payment_method.clone()))?;

        Ok(Expense::new(date, category, amount_cents, payment_method))
    }

    /// Validate an expense and append it to the ledger.
    /// Nothing is written when validation fails.
    pub fn add_expense(
        &self,
        input: &ExpenseInput,
        today: NaiveDate,
    ) -> Result<Expense, AppError> {
        let expense = self.validate_expense(input, today).inspect_err(|e| {
            warn!(error = %e, "rejected expense");
        })?;

        self.ledger.append(&expense)?;
        info!(
            date = %expense.date,
            category = %expense.category,
            amount_cents = expense.amount_cents,
            payment_method = %expense.payment_method,
            "recorded expense"
        );
        Ok(expense)
    }

    /// Every ledger record in file order, amounts coerced to numbers.
    pub fn export_expenses(&self) -> Result<Vec<ExportedExpense>, AppError> {
        let rows = self.ledger.read_rows()?;
        Ok(rows
            .into_iter()
            .map(|row| ExportedExpense {
                amount: coerce_amount(&row.amount),
                date: row.date,
                category: row.category,
                payment_method: row.payment_method,
            })
            .collect())
    }

    /// The export as a JSON array.
    pub fn export_json(&self) -> Result<String, AppError> {
        let expenses = self.export_expenses()?;
        let json = serde_json::to_string(&expenses).map_err(anyhow::Error::from)?;
        Ok(json)
    }

    // ========================
    // Reports
    // ========================

    /// Spending over the last `days` days, broken down by category and payment method.
    pub fn summary(&self, days: i64, today: NaiveDate) -> Result<SpendingSummary, AppError> {
        let from_date = window_start(days, today)?;
        let rows: Vec<DatedRow> = self
            .dated_rows()?
            .into_iter()
            .filter(|row| row.date >= from_date)
            .collect();

        let total = rows
            .iter()
            .fold(0, |total: Cents, row| total.saturating_add(row.amount));
        let count = rows.len();
        let average = if count == 0 { 0 } else { total / count as Cents };

        let by_category = share_breakdown(&rows, |row| &row.category, total);
        let by_payment_method = share_breakdown(&rows, |row| &row.payment_method, total);

        let mut recent: Vec<RecentExpense> = rows
            .into_iter()
            .map(|row| RecentExpense {
                date: row.date,
                category: row.category,
                amount: row.amount,
                payment_method: row.payment_method,
            })
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_LIMIT);

        Ok(SpendingSummary {
            days,
            from_date,
            total,
            count,
            average,
            by_category,
            by_payment_method,
            recent,
        })
    }

    /// Compare a category's spending over the last `days` days against `limit`.
    pub fn check_budget(
        &self,
        category: &str,
        limit: &str,
        days: i64,
        today: NaiveDate,
    ) -> Result<BudgetCheck, AppError> {
        let category = parse_category(category)?;
        let limit_cents = validate_amount(limit).map_err(|reason| AppError::InvalidAmount {
            input: limit.to_string(),
            reason,
        })?;
        let from_date = window_start(days, today)?;

        let (spent, count) = self
            .dated_rows()?
            .iter()
            .filter(|row| row.date >= from_date && row.category == category.as_str())
            .fold((0, 0), |(spent, count): (Cents, usize), row| {
                (spent.saturating_add(row.amount), count + 1)
            });

        let used = percentage(spent, limit_cents);
        Ok(BudgetCheck {
            category,
            days,
            from_date,
            limit: limit_cents,
            spent,
            remaining: limit_cents.saturating_sub(spent),
            percentage: used,
            count,
            level: BudgetLevel::from_percentage(used),
        })
    }

    /// Ledger rows usable for reporting; rows with a bad date or amount are skipped.
    fn dated_rows(&self) -> Result<Vec<DatedRow>, AppError> {
        let rows = self.ledger.read_rows()?;
        Ok(rows.into_iter().filter_map(dated_row).collect())
    }
}

fn dated_row(row: LedgerRow) -> Option<DatedRow> {
    let date = parse_ledger_date(&row.date);
    let amount = coerce_amount(&row.amount).and_then(amount_to_cents);
    let (Some(date), Some(amount)) = (date, amount) else {
        warn!(
            line = row.line,
            date = %row.date,
            amount = %row.amount,
            "skipping ledger row in report"
        );
        return None;
    };
    Some(DatedRow {
        date,
        category: row.category,
        amount,
        payment_method: row.payment_method,
    })
}

fn parse_category(input: &str) -> Result<Category, AppError> {
    Category::from_str(input).ok_or_else(|| AppError::InvalidCategory(input.to_string()))
}

/// First date of a window covering `days` days up to and including `today`.
fn window_start(days: i64, today: NaiveDate) -> Result<NaiveDate, AppError> {
    if !(1..=MAX_PERIOD_DAYS).contains(&days) {
        return Err(AppError::InvalidPeriod(days));
    }
    Ok(today - Duration::days(days - 1))
}

/// Group totals by key, largest first (ties broken by key).
fn share_breakdown<'a>(
    rows: &'a [DatedRow],
    key: impl Fn(&'a DatedRow) -> &'a String,
    total: Cents,
) -> Vec<ShareSummary> {
    let mut totals: HashMap<&str, Cents> = HashMap::new();
    for row in rows {
        *totals.entry(key(row).as_str()).or_insert(0) += row.amount;
    }

    let mut shares: Vec<ShareSummary> = totals
        .into_iter()
        .map(|(key, amount)| ShareSummary {
            key: key.to_string(),
            total: amount,
            percentage: percentage(amount, total),
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()
    }

    #[test]
    fn test_window_start() {
        assert_eq!(
            window_start(1, today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()
        );
        assert_eq!(
            window_start(7, today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 16).unwrap()
        );
    }

    #[test]
    fn test_window_start_rejects_out_of_range() {
        assert!(matches!(window_start(0, today()), Err(AppError::InvalidPeriod(0))));
        assert!(matches!(window_start(366, today()), Err(AppError::InvalidPeriod(366))));
        assert!(matches!(window_start(-3, today()), Err(AppError::InvalidPeriod(-3))));
    }

    #[test]
    fn test_dated_row_skips_unparseable_rows() {
        let row = |date: &str, amount: &str| LedgerRow {
            line: 2,
            date: date.to_string(),
            category: "Food".to_string(),
            amount: amount.to_string(),
            payment_method: "cash".to_string(),
        };
        assert!(dated_row(row("2025-11-20", "12.50")).is_some());
        assert!(dated_row(row("yesterday", "12.50")).is_none());
        assert!(dated_row(row("2025-11-20", "n/a")).is_none());
        assert!(dated_row(row("2025-11-20", "90000000000000000")).is_none());
    }

    #[test]
    fn test_dated_row_reads_amounts_like_export() {
        let row = LedgerRow {
            line: 3,
            date: "2025-11-20".to_string(),
            category: "Food".to_string(),
            amount: "1e2".to_string(),
            payment_method: "cash".to_string(),
        };
        let dated = dated_row(row).unwrap();
        assert_eq!(dated.amount, 10000);
    }
}
