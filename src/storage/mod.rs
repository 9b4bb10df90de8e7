mod memory;
mod repository;
mod sqlite;

pub use memory::*;
pub use repository::*;
pub use sqlite::*;

use anyhow::Result;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Key holding the current spendable balance.
pub const WALLET_BALANCE_KEY: &str = "walletBalance";

/// Key holding the income baseline.
pub const TOTAL_BALANCE_KEY: &str = "totalBalance";

/// Key holding the expense list, in insertion order.
pub const EXPENSES_KEY: &str = "expenses";

/// A durable string key-value store.
///
/// Values are opaque strings; the [`Repository`] layers JSON encoding on top.
#[allow(async_fn_in_trait)]
pub trait Store {
    /// Read a value, `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write several keys at once. Either all writes land or none do.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_many(&[(key, value)]).await
    }
}
