use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::domain::{Cents, ExpenseRecord, WalletState};

use super::{Store, EXPENSES_KEY, TOTAL_BALANCE_KEY, WALLET_BALANCE_KEY};

/// Ledger state as read back from the store. Absent keys stay `None`.
#[derive(Debug, Clone, Default)]
pub struct StoredLedger {
    pub expenses: Vec<ExpenseRecord>,
    pub wallet_balance: Option<Cents>,
    pub total_balance: Option<Cents>,
}

/// Typed access to the three ledger keys of a [`Store`].
pub struct Repository<S> {
    store: S,
}

impl<S: Store> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read all ledger keys.
    pub async fn load(&self) -> Result<StoredLedger> {
        Ok(StoredLedger {
            expenses: self.load_expenses().await?,
            wallet_balance: self.get_json(WALLET_BALANCE_KEY).await?,
            total_balance: self.get_json(TOTAL_BALANCE_KEY).await?,
        })
    }

    /// Read the expense list. A missing or empty value is an empty list.
    pub async fn load_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        match self.store.get(EXPENSES_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).context("Invalid expenses value in store")
            }
            _ => Ok(Vec::new()),
        }
    }

    pub async fn save_expenses(&self, expenses: &[ExpenseRecord]) -> Result<()> {
        self.store
            .set(EXPENSES_KEY, serde_json::to_string(expenses)?)
            .await
    }

    pub async fn save_total_balance(&self, total: Cents) -> Result<()> {
        self.store
            .set(TOTAL_BALANCE_KEY, serde_json::to_string(&total)?)
            .await
    }

    /// Persist the expense list and the current balance in one write.
    pub async fn save_expenses_and_balance(
        &self,
        expenses: &[ExpenseRecord],
        wallet_balance: Cents,
    ) -> Result<()> {
        self.store
            .set_many(&[
                (EXPENSES_KEY, serde_json::to_string(expenses)?),
                (WALLET_BALANCE_KEY, serde_json::to_string(&wallet_balance)?),
            ])
            .await
    }

    /// Persist both balances in one write.
    pub async fn save_wallet(&self, wallet: &WalletState) -> Result<()> {
        self.store
            .set_many(&[
                (
                    WALLET_BALANCE_KEY,
                    serde_json::to_string(&wallet.current_balance)?,
                ),
                (
                    TOTAL_BALANCE_KEY,
                    serde_json::to_string(&wallet.total_balance)?,
                ),
            ])
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.store
            .get(key)
            .await?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .with_context(|| format!("Invalid value for key '{}'", key))
    }
}
