use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::{ExpenseService, DEFAULT_BUDGET_DAYS, DEFAULT_SUMMARY_DAYS};
use crate::domain::{
    category_listing, format_cents, payment_method_listing, ExpenseInput, ReferenceEntry,
};
use crate::mcp::{find_prompt, ExpenseServer, ALL_PROMPTS};
use crate::storage::DEFAULT_LEDGER_PATH;

/// expense-mcp - flat-file expense ledger for assistants
#[derive(Parser)]
#[command(name = "expense-mcp")]
#[command(about = "Record expenses in a CSV ledger and serve them over MCP")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, global = true, env = "EXPENSE_LEDGER", default_value = DEFAULT_LEDGER_PATH)]
    pub ledger: String,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        amount: String,

        /// Category: Food, Transport, Entertainment, Utilities, Health, Education, Other
        #[arg(short, long)]
        category: String,

        /// Payment method: cash, card, transfer
        #[arg(short = 'm', long = "method")]
        payment_method: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Export all expenses as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Summarize recent spending
    Summary {
        /// Number of days to look back
        #[arg(short, long, default_value_t = DEFAULT_SUMMARY_DAYS)]
        days: i64,
    },

    /// Check a category's spending against a limit
    Budget {
        /// Category to check
        category: String,

        /// Budget limit for the period (e.g., "400" or "400.00")
        limit: String,

        /// Period in days
        #[arg(short, long, default_value_t = DEFAULT_BUDGET_DAYS)]
        days: i64,
    },

    /// List valid categories
    Categories,

    /// List valid payment methods
    PaymentMethods,

    /// Print a static prompt (omit the name to list them)
    Prompt {
        /// Prompt name
        name: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_logging(self.verbose);

        match self.command {
            Commands::Serve => {
                let service = ExpenseService::init(&self.ledger)?;
                info!(
                    ledger = %service.ledger().path().display(),
                    "starting MCP server on stdio"
                );

                let server = ExpenseServer::new(service)
                    .serve(stdio())
                    .await
                    .inspect_err(|e| tracing::error!(error = ?e, "failed to start MCP server"))?;
                let reason = server.waiting().await?;
                info!(?reason, "MCP server stopped");
            }

            Commands::Add {
                amount,
                category,
                payment_method,
                date,
            } => {
                let service = ExpenseService::open(&self.ledger);
                let today = ExpenseService::today();
                let input = ExpenseInput {
                    date: date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                    category,
                    amount,
                    payment_method,
                };

                let expense = service.add_expense(&input, today)?;
                println!(
                    "Recorded expense: {} {} {} ({})",
                    expense.date,
                    expense.category,
                    format_cents(expense.amount_cents),
                    expense.payment_method
                );
            }

            Commands::Export { output, pretty } => {
                let service = ExpenseService::open(&self.ledger);
                run_export_command(&service, output.as_deref(), pretty)?;
            }

            Commands::Summary { days } => {
                let service = ExpenseService::open(&self.ledger);
                run_summary_command(&service, days)?;
            }

            Commands::Budget {
                category,
                limit,
                days,
            } => {
                let service = ExpenseService::open(&self.ledger);
                run_budget_command(&service, &category, &limit, days)?;
            }

            Commands::Categories => print_listing(&category_listing()),

            Commands::PaymentMethods => print_listing(&payment_method_listing()),

            Commands::Prompt { name } => match name {
                Some(name) => {
                    let prompt = find_prompt(&name).with_context(|| {
                        format!(
                            "Unknown prompt '{}'. Available: {}",
                            name,
                            ALL_PROMPTS.map(|p| p.name).join(", ")
                        )
                    })?;
                    println!("{}", prompt.text);
                }
                None => {
                    for prompt in ALL_PROMPTS {
                        println!("{:<20} {}", prompt.name, prompt.description);
                    }
                }
            },
        }

        Ok(())
    }
}

/// Log to stderr; stdout carries the MCP protocol when serving.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn run_export_command(service: &ExpenseService, output: Option<&str>, pretty: bool) -> Result<()> {
    use std::fs::File;
    use std::io::stdout;

    let expenses = service.export_expenses()?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &expenses)?;
    } else {
        serde_json::to_writer(&mut writer, &expenses)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    if output.is_some() {
        eprintln!("Exported {} expenses", expenses.len());
    }
    Ok(())
}

fn run_summary_command(service: &ExpenseService, days: i64) -> Result<()> {
    let summary = service.summary(days, ExpenseService::today())?;
    if summary.is_empty() {
        println!("No expenses in the last {} days.", days);
        return Ok(());
    }

    println!("Last {} days (since {})", days, summary.from_date);
    println!("{}", "-".repeat(50));
    println!("{:<20} {:>12}", "Total", format_cents(summary.total));
    println!("{:<20} {:>12}", "Transactions", summary.count);
    println!("{:<20} {:>12}", "Average", format_cents(summary.average));

    println!();
    println!("{:<20} {:>12} {:>8}", "CATEGORY", "AMOUNT", "SHARE");
    for share in &summary.by_category {
        println!(
            "{:<20} {:>12} {:>7.1}%",
            share.key,
            format_cents(share.total),
            share.percentage
        );
    }

    println!();
    println!("{:<20} {:>12} {:>8}", "PAYMENT METHOD", "AMOUNT", "SHARE");
    for share in &summary.by_payment_method {
        println!(
            "{:<20} {:>12} {:>7.1}%",
            share.key,
            format_cents(share.total),
            share.percentage
        );
    }

    println!();
    println!(
        "{:<12} {:<15} {:>12} {:<10}",
        "DATE", "CATEGORY", "AMOUNT", "METHOD"
    );
    for expense in &summary.recent {
        println!(
            "{:<12} {:<15} {:>12} {:<10}",
            expense.date.to_string(),
            expense.category,
            format_cents(expense.amount),
            expense.payment_method
        );
    }
    Ok(())
}

fn run_budget_command(
    service: &ExpenseService,
    category: &str,
    limit: &str,
    days: i64,
) -> Result<()> {
    let check = service.check_budget(category, limit, days, ExpenseService::today())?;

    println!(
        "{:<15} {:<10} {:>12} {:>12} {:>12} {:>8}",
        "CATEGORY", "PERIOD", "LIMIT", "SPENT", "REMAINING", "USED"
    );
    println!("{}", "-".repeat(74));
    println!(
        "{:<15} {:<10} {:>12} {:>12} {:>12} {:>7.1}%",
        check.category.as_str(),
        format!("{}d", check.days),
        format_cents(check.limit),
        format_cents(check.spent),
        format_cents(check.remaining),
        check.percentage
    );
    println!("{} ({} transactions)", check.level, check.count);
    if check.should_warn() {
        println!("Consider reducing spending on {}.", check.category);
    }
    Ok(())
}

fn print_listing(entries: &[ReferenceEntry]) {
    println!("{:<15} {:<15} {:<15}", "ID", "ENGLISH", "SPANISH");
    println!("{}", "-".repeat(45));
    for entry in entries {
        println!("{:<15} {:<15} {:<15}", entry.id, entry.english, entry.spanish);
    }
}
