use std::fmt::Write;

use crate::application::{BudgetCheck, ShareSummary, SpendingSummary};
use crate::domain::{format_cents, Expense};

pub fn expense_recorded(expense: &Expense) -> String {
    format!(
        "Expense recorded:\n \
         - Date: {}\n \
         - Category: {}\n \
         - Amount: ${}\n \
         - Payment method: {}",
        expense.date,
        expense.category,
        format_cents(expense.amount_cents),
        expense.payment_method
    )
}

pub fn summary(summary: &SpendingSummary) -> String {
    if summary.is_empty() {
        return format!("No expenses in the last {} days.", summary.days);
    }

    let mut out = String::new();
    let _ = writeln!(out, "**Summary - last {} days**\n", summary.days);
    let _ = writeln!(out, "Total: ${}", format_cents(summary.total));
    let _ = writeln!(out, "Transactions: {}", summary.count);
    let _ = writeln!(out, "Average: ${}\n", format_cents(summary.average));

    let _ = writeln!(out, "**By category:**");
    write_shares(&mut out, &summary.by_category);

    let _ = writeln!(out, "\n**By payment method:**");
    write_shares(&mut out, &summary.by_payment_method);

    let _ = writeln!(out, "\n**Recent:**");
    for expense in &summary.recent {
        let _ = writeln!(
            out,
            "  - {} | {} | ${}",
            expense.date,
            expense.category,
            format_cents(expense.amount)
        );
    }
    out
}

pub fn budget(check: &BudgetCheck) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "**Budget - {}**\n", check.category);
    let _ = writeln!(out, "Period: {} days", check.days);
    let _ = writeln!(out, "Budget: ${}", format_cents(check.limit));
    let _ = writeln!(
        out,
        "Spent: ${} ({:.1}%)",
        format_cents(check.spent),
        check.percentage
    );
    let _ = writeln!(out, "Remaining: ${}", format_cents(check.remaining));
    let _ = writeln!(out, "Transactions: {}", check.count);
    let _ = writeln!(out, "{}", check.level);
    if check.should_warn() {
        let _ = write!(out, "\nConsider reducing spending on {}.", check.category);
    }
    out
}

/// Ledger rows are not re-validated, so keys are shown verbatim.
fn write_shares(out: &mut String, shares: &[ShareSummary]) {
    for share in shares {
        let _ = writeln!(
            out,
            "  - {}: ${} ({:.1}%)",
            share.key,
            format_cents(share.total),
            share.percentage
        );
    }
}
