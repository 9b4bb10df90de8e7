// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spendbook::application::{LedgerConfig, LedgerService};
use spendbook::domain::{Category, Cents, ExpenseDraft};
use spendbook::{MemoryStore, SqliteStore};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService<SqliteStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap(), LedgerConfig::default()).await?;
    Ok((service, temp_dir))
}

/// Reopen the database behind a temp dir created by `test_service`
pub async fn reopen(temp_dir: &TempDir) -> Result<LedgerService<SqliteStore>> {
    let db_path = temp_dir.path().join("test.db");
    Ok(LedgerService::connect(db_path.to_str().unwrap(), LedgerConfig::default()).await?)
}

/// Helper to create an in-memory service
pub async fn memory_service() -> Result<LedgerService<MemoryStore>> {
    Ok(LedgerService::load(MemoryStore::new(), LedgerConfig::default()).await?)
}

/// Helper to parse a date string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to build a valid draft
pub fn draft(title: &str, price: Cents, category: Category) -> ExpenseDraft {
    ExpenseDraft::new(title, price, category, parse_date("2024-01-15")).unwrap()
}
