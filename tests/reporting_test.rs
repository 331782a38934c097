mod common;

use anyhow::Result;
use common::{add, days_ago, test_service, today, write_ledger};
use expense_mcp::application::{AppError, BudgetLevel};
use expense_mcp::domain::Category;

#[test]
fn test_summary_totals_and_breakdowns() -> Result<()> {
    let (service, _temp) = test_service()?;

    add(&service, 0, "Food", "30", "card")?;
    add(&service, 1, "Food", "20", "cash")?;
    add(&service, 2, "Transport", "40", "card")?;
    add(&service, 3, "Health", "10", "transfer")?;

    let summary = service.summary(7, today())?;
    assert_eq!(summary.total, 10000);
    assert_eq!(summary.count, 4);
    assert_eq!(summary.average, 2500);

    let categories: Vec<_> = summary
        .by_category
        .iter()
        .map(|s| (s.key.as_str(), s.total, s.percentage))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("Food", 5000, 50.0),
            ("Transport", 4000, 40.0),
            ("Health", 1000, 10.0)
        ]
    );

    let methods: Vec<_> = summary
        .by_payment_method
        .iter()
        .map(|s| (s.key.as_str(), s.total))
        .collect();
    assert_eq!(methods, vec![("card", 7000), ("cash", 2000), ("transfer", 1000)]);
    Ok(())
}

#[test]
fn test_summary_window_boundaries() -> Result<()> {
    let (service, _temp) = test_service()?;

    add(&service, 6, "Food", "1", "cash")?; // first day of a 7-day window
    add(&service, 7, "Food", "2", "cash")?; // just outside it
    add(&service, 30, "Food", "4", "cash")?;

    let summary = service.summary(7, today())?;
    assert_eq!(summary.from_date.format("%Y-%m-%d").to_string(), days_ago(6));
    assert_eq!(summary.count, 1);
    assert_eq!(summary.total, 100);

    let summary = service.summary(31, today())?;
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total, 700);
    Ok(())
}

#[test]
fn test_summary_includes_future_dated_expenses() -> Result<()> {
    let (service, _temp) = test_service()?;
    add(&service, -3, "Entertainment", "15", "card")?;

    let summary = service.summary(1, today())?;
    assert_eq!(summary.count, 1);
    Ok(())
}

#[test]
fn test_summary_recent_is_latest_five_by_date() -> Result<()> {
    let (service, _temp) = test_service()?;
    for days in [5, 0, 3, 1, 6, 2, 4] {
        add(&service, days, "Other", "1", "cash")?;
    }

    let summary = service.summary(7, today())?;
    assert_eq!(summary.count, 7);
    let recent: Vec<_> = summary
        .recent
        .iter()
        .map(|e| e.date.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(
        recent,
        vec![days_ago(0), days_ago(1), days_ago(2), days_ago(3), days_ago(4)]
    );
    Ok(())
}

#[test]
fn test_summary_skips_unparseable_rows() -> Result<()> {
    let (service, temp) = test_service()?;
    write_ledger(
        &temp,
        &format!(
            "date,category,amount,payment_method\n\
             {d},Food,abc,cash\n\
             not-a-date,Food,5.00,cash\n\
             {d},Food,2.50,cash\n",
            d = days_ago(1)
        ),
    )?;

    let summary = service.summary(7, today())?;
    assert_eq!(summary.count, 1);
    assert_eq!(summary.total, 250);

    // Export still returns every row
    assert_eq!(service.export_expenses()?.len(), 3);
    Ok(())
}

#[test]
fn test_reports_skip_out_of_range_amounts() -> Result<()> {
    let (service, temp) = test_service()?;
    write_ledger(
        &temp,
        &format!(
            "date,category,amount,payment_method\n\
             {d2},Food,90000000000000000,cash\n\
             {d1},Food,90000000000000000,cash\n\
             {d1},Food,-90000000000000000,card\n\
             {d1},Food,12.00,card\n",
            d2 = days_ago(2),
            d1 = days_ago(1)
        ),
    )?;

    let summary = service.summary(7, today())?;
    assert_eq!(summary.count, 1);
    assert_eq!(summary.total, 1200);

    let check = service.check_budget("Food", "1000000", 30, today())?;
    assert_eq!(check.spent, 1200);
    assert_eq!(check.count, 1);
    Ok(())
}

#[test]
fn test_reports_and_export_agree_on_amounts() -> Result<()> {
    let (service, temp) = test_service()?;
    write_ledger(
        &temp,
        &format!(
            "{d},Food,1e2,cash\n\
             {d},Food,0.5,cash\n",
            d = days_ago(1)
        ),
    )?;

    let amounts: Vec<_> = service
        .export_expenses()?
        .into_iter()
        .map(|e| e.amount)
        .collect();
    assert_eq!(amounts, vec![Some(100.0), Some(0.5)]);

    let summary = service.summary(7, today())?;
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total, 10050);
    Ok(())
}

#[test]
fn test_empty_summary() -> Result<()> {
    let (service, _temp) = test_service()?;
    add(&service, 40, "Food", "10", "cash")?;

    let summary = service.summary(7, today())?;
    assert!(summary.is_empty());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average, 0);
    assert!(summary.by_category.is_empty());
    assert!(summary.recent.is_empty());
    Ok(())
}

#[test]
fn test_summary_rejects_invalid_period() -> Result<()> {
    let (service, _temp) = test_service()?;

    assert!(matches!(
        service.summary(0, today()),
        Err(AppError::InvalidPeriod(0))
    ));
    assert!(matches!(
        service.summary(400, today()),
        Err(AppError::InvalidPeriod(400))
    ));
    assert!(service.summary(365, today()).is_ok());
    Ok(())
}

#[test]
fn test_budget_check_levels() -> Result<()> {
    let (service, _temp) = test_service()?;
    add(&service, 1, "Food", "60", "card")?;
    add(&service, 2, "Food", "15", "cash")?;
    add(&service, 2, "Transport", "500", "card")?; // other category
    add(&service, 45, "Food", "500", "card")?; // outside the window

    let check = service.check_budget("Food", "100", 30, today())?;
    assert_eq!(check.category, Category::Food);
    assert_eq!(check.limit, 10000);
    assert_eq!(check.spent, 7500);
    assert_eq!(check.remaining, 2500);
    assert_eq!(check.count, 2);
    assert_eq!(check.percentage, 75.0);
    assert_eq!(check.level, BudgetLevel::ApproachingLimit);
    assert!(!check.should_warn());

    let check = service.check_budget("Food", "80", 30, today())?;
    assert_eq!(check.level, BudgetLevel::NearLimit);
    assert!(check.should_warn());

    let check = service.check_budget("Food", "50", 30, today())?;
    assert_eq!(check.level, BudgetLevel::Exceeded);
    assert_eq!(check.remaining, -2500);

    let check = service.check_budget("Health", "50", 30, today())?;
    assert_eq!(check.spent, 0);
    assert_eq!(check.level, BudgetLevel::WithinBudget);
    Ok(())
}

#[test]
fn test_budget_check_validates_input() -> Result<()> {
    let (service, _temp) = test_service()?;

    assert!(matches!(
        service.check_budget("Rent", "100", 30, today()),
        Err(AppError::InvalidCategory(_))
    ));
    assert!(matches!(
        service.check_budget("Food", "-5", 30, today()),
        Err(AppError::InvalidAmount { .. })
    ));
    assert!(matches!(
        service.check_budget("Food", "100", 0, today()),
        Err(AppError::InvalidPeriod(0))
    ));
    Ok(())
}
