use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::application::{LedgerConfig, LedgerService, DEFAULT_PAGE_SIZE};
use crate::domain::{
    format_cents, parse_amount, CategoryOrder, ExpenseDraft, ExpensePatch, ExpenseRecord,
};
use crate::storage::SqliteStore;

/// Spendbook - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "A local-first expense tracker with a wallet balance and category reports")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "SPENDBOOK_DB", default_value = "spendbook.db")]
    pub database: String,

    /// Income baseline used on first run (e.g., "5000" or "5000.00")
    #[arg(long, env = "SPENDBOOK_OPENING_BALANCE", default_value = "5000")]
    pub opening_balance: String,

    /// Expenses shown per page by `list`
    #[arg(long, env = "SPENDBOOK_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record an expense
    Add {
        /// Short title (e.g., "Lunch")
        title: String,

        /// Price (e.g., "12.50" or "12")
        price: String,

        /// Category: food, entertainment, travel, shopping, grocery, others
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense (the wallet is not refunded)
    Delete {
        /// Expense ID
        id: String,
    },

    /// Add income to the wallet
    Income {
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
    },

    /// List expenses, one page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show wallet balance and total expenses
    Summary {
        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show spending per category
    Categories {
        /// Ordering: first-seen, descending
        #[arg(short, long, default_value = "descending")]
        order: String,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Recompute the wallet balance from income and recorded expenses
    Reconcile,
}

impl Cli {
    /// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_logging(&self) {
        let level = if self.verbose { "spendbook=debug" } else { "spendbook=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn config(&self) -> Result<LedgerConfig> {
        let opening_balance = parse_amount(&self.opening_balance)
            .context("Invalid opening balance. Use '5000.00' or '5000'")?;
        Ok(LedgerConfig::default()
            .with_opening_balance(opening_balance)
            .with_page_size(self.page_size))
    }

    pub async fn run(self) -> Result<()> {
        let config = self.config()?;

        if matches!(self.command, Commands::Init) {
            let service = LedgerService::init(&self.database, config).await?;
            println!("Database initialized: {}", self.database);
            println!(
                "Wallet balance: {}",
                format_cents(service.current_balance())
            );
            return Ok(());
        }

        let mut service = LedgerService::connect(&self.database, config)
            .await
            .with_context(|| {
                format!(
                    "Could not open '{}'. Run `spendbook init` first",
                    self.database
                )
            })?;

        match self.command {
            Commands::Init => {}

            Commands::Add {
                title,
                price,
                category,
                date,
            } => {
                let date = date.unwrap_or_else(|| Utc::now().date_naive().to_string());
                let draft = ExpenseDraft::from_input(&title, &price, &category, &date)?;
                let record = service.add_expense(draft).await?;

                println!(
                    "Added expense: {} {} [{}] ({})",
                    record.title,
                    format_cents(record.price),
                    record.category,
                    record.id
                );
                println!(
                    "Wallet balance: {}",
                    format_cents(service.current_balance())
                );
            }

            Commands::Edit {
                id,
                title,
                price,
                category,
                date,
            } => {
                let expense_id = parse_expense_id(&id)?;
                let patch = ExpensePatch::from_input(
                    title.as_deref(),
                    price.as_deref(),
                    category.as_deref(),
                    date.as_deref(),
                )?;
                if patch.is_empty() {
                    println!("Nothing to change.");
                    return Ok(());
                }

                let record = service.edit_expense(expense_id, patch).await?;
                println!("Updated expense:");
                print_expense(&record);
            }

            Commands::Delete { id } => {
                let expense_id = parse_expense_id(&id)?;
                match service.delete_expense(expense_id).await? {
                    Some(record) => println!(
                        "Deleted expense: {} {}",
                        record.title,
                        format_cents(record.price)
                    ),
                    None => println!("No expense with ID {}", expense_id),
                }
            }

            Commands::Income { amount } => {
                let balance = service.add_income(&amount).await?;
                println!("Wallet balance: {}", format_cents(balance));
            }

            Commands::List { page } => run_list_command(&service, page),

            Commands::Summary { format } => {
                let summary = service.summary();
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                    _ => {
                        println!("Wallet Balance:  {:>15}", format_cents(summary.current_balance));
                        println!("Total Income:    {:>15}", format_cents(summary.total_balance));
                        println!("Expenses:        {:>15}", format_cents(summary.total_expenses));
                        println!("{}", "-".repeat(32));
                        println!("Transactions:    {:>15}", summary.expense_count);
                    }
                }
            }

            Commands::Categories { order, format } => {
                let order = CategoryOrder::from_str(&order).with_context(|| {
                    format!("Invalid order '{}'. Use first-seen or descending", order)
                })?;
                let report = service.category_report(order);

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => {
                        if report.categories.is_empty() {
                            println!("No expenses recorded.");
                            return Ok(());
                        }
                        println!(
                            "{:<15} {:>12} {:>8} {:>8}",
                            "CATEGORY", "TOTAL", "COUNT", "PERCENT"
                        );
                        println!("{}", "-".repeat(46));
                        for cat in &report.categories {
                            println!(
                                "{:<15} {:>12} {:>8} {:>7.1}%",
                                cat.category,
                                format_cents(cat.total),
                                cat.count,
                                cat.percentage
                            );
                        }
                        println!("{}", "-".repeat(46));
                        println!("{:<15} {:>12}", "TOTAL", format_cents(report.total));
                    }
                }
            }

            Commands::Reconcile => {
                let before = service.current_balance();
                let after = service.reconcile().await?;
                if before == after {
                    println!("Wallet balance already matches: {}", format_cents(after));
                } else {
                    println!(
                        "Wallet balance reconciled: {} -> {}",
                        format_cents(before),
                        format_cents(after)
                    );
                }
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &LedgerService<SqliteStore>, page: usize) {
    if service.expenses().is_empty() {
        println!("No expenses recorded.");
        return;
    }

    let page = service.page(page);

    println!(
        "{:<36} {:<10} {:<20} {:<13} {:>10}",
        "ID", "DATE", "TITLE", "CATEGORY", "PRICE"
    );
    println!("{}", "-".repeat(93));
    for record in &page.items {
        println!(
            "{:<36} {:<10} {:<20} {:<13} {:>10}",
            record.id,
            record.date.format("%Y-%m-%d"),
            truncate(&record.title, 20),
            record.category,
            format_cents(record.price)
        );
    }
    println!();

    let window: Vec<String> = page
        .window
        .iter()
        .map(|n| {
            if *n == page.page_number {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    println!(
        "Page {} of {}  << {} >>",
        page.page_number,
        page.page_count,
        window.join(" ")
    );
}

fn print_expense(record: &ExpenseRecord) {
    println!("  ID:        {}", record.id);
    println!("  Title:     {}", record.title);
    println!("  Price:     {}", format_cents(record.price));
    println!("  Category:  {}", record.category);
    println!("  Date:      {}", record.date.format("%Y-%m-%d"));
}

fn parse_expense_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).context("Invalid expense ID format (expected UUID)")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
