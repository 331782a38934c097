use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Cents};

/// Number of entries listed under "recent" in a summary.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub days: i64,
    /// First date included in the window
    pub from_date: NaiveDate,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    pub by_category: Vec<ShareSummary>,
    pub by_payment_method: Vec<ShareSummary>,
    pub recent: Vec<RecentExpense>,
}

impl SpendingSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Total spent under one key (category or payment method) and its share of the whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSummary {
    pub key: String,
    pub total: Cents,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Cents,
    pub payment_method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    WithinBudget,
    ApproachingLimit,
    NearLimit,
    Exceeded,
}

impl BudgetLevel {
    /// Classify how much of a budget has been used.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 70.0 {
            BudgetLevel::WithinBudget
        } else if percentage < 90.0 {
            BudgetLevel::ApproachingLimit
        } else if percentage < 100.0 {
            BudgetLevel::NearLimit
        } else {
            BudgetLevel::Exceeded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::WithinBudget => "Within budget",
            BudgetLevel::ApproachingLimit => "Approaching the limit",
            BudgetLevel::NearLimit => "Close to the limit",
            BudgetLevel::Exceeded => "Budget exceeded",
        }
    }
}

impl std::fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Above this share of the limit, reports suggest cutting back.
pub const BUDGET_WARNING_PERCENTAGE: f64 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub category: Category,
    pub days: i64,
    pub from_date: NaiveDate,
    pub limit: Cents,
    pub spent: Cents,
    /// May be negative once the budget is exceeded
    pub remaining: Cents,
    pub percentage: f64,
    pub count: usize,
    pub level: BudgetLevel,
}

impl BudgetCheck {
    pub fn should_warn(&self) -> bool {
        self.percentage > BUDGET_WARNING_PERCENTAGE
    }
}

/// Share of `part` in `whole`, as a percentage. Zero when `whole` is zero.
pub fn percentage(part: Cents, whole: Cents) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
