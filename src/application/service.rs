use crate::domain::{
    category_totals, checked_total_expenses, page_count, page_window, paginate, parse_amount,
    total_expenses, CategoryOrder, CategoryTotal, Cents, ExpenseDraft, ExpenseId, ExpensePatch,
    ExpenseRecord, ParseCentsError, WalletState,
};
use crate::storage::{Repository, SqliteStore, Store};

use super::{AppError, CategoryReport, ExpensePage, LedgerConfig, LedgerSummary};

/// Application service owning the expense list and the wallet.
/// This is the primary interface for any client (CLI, TUI, etc.).
///
/// State is read from the store once, in [`LedgerService::load`], and every
/// mutation is flushed back before it becomes visible in memory.
pub struct LedgerService<S: Store> {
    repo: Repository<S>,
    config: LedgerConfig,
    expenses: Vec<ExpenseRecord>,
    wallet: WalletState,
}

impl LedgerService<SqliteStore> {
    /// Open (creating if needed) a SQLite database at the given path.
    pub async fn init(database_path: &str, config: LedgerConfig) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = SqliteStore::init(&db_url).await?;
        Self::load(store, config).await
    }

    /// Open an existing SQLite database.
    pub async fn connect(database_path: &str, config: LedgerConfig) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = SqliteStore::connect(&db_url).await?;
        store.migrate().await?;
        Self::load(store, config).await
    }
}

impl<S: Store> LedgerService<S> {
    /// Read the ledger back from the store.
    ///
    /// A missing income baseline is initialised to the configured opening
    /// balance and written back; a missing wallet balance starts equal to the
    /// baseline.
    pub async fn load(store: S, config: LedgerConfig) -> Result<Self, AppError> {
        let repo = Repository::new(store);
        let stored = repo.load().await?;

        let total_balance = match stored.total_balance {
            Some(total) => total,
            None => {
                tracing::info!(
                    opening_balance = config.opening_balance,
                    "no income baseline stored, using opening balance"
                );
                repo.save_total_balance(config.opening_balance).await?;
                config.opening_balance
            }
        };
        let wallet = WalletState {
            total_balance,
            current_balance: stored.wallet_balance.unwrap_or(total_balance),
        };

        tracing::debug!(
            expenses = stored.expenses.len(),
            current_balance = wallet.current_balance,
            total_balance = wallet.total_balance,
            "ledger loaded"
        );

        Ok(Self {
            repo,
            config,
            expenses: stored.expenses,
            wallet,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    // ========================
    // Queries
    // ========================

    /// All expenses, in insertion order.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn get_expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn wallet(&self) -> WalletState {
        self.wallet
    }

    pub fn current_balance(&self) -> Cents {
        self.wallet.current_balance
    }

    pub fn total_balance(&self) -> Cents {
        self.wallet.total_balance
    }

    /// Sum of all expense prices, recomputed on every call.
    pub fn total_expenses(&self) -> Cents {
        total_expenses(&self.expenses)
    }

    pub fn category_totals(&self, order: CategoryOrder) -> Vec<CategoryTotal> {
        category_totals(&self.expenses, order)
    }

    pub fn category_report(&self, order: CategoryOrder) -> CategoryReport {
        CategoryReport::new(self.category_totals(order), self.total_expenses())
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            current_balance: self.wallet.current_balance,
            total_balance: self.wallet.total_balance,
            total_expenses: self.total_expenses(),
            expense_count: self.expenses.len(),
        }
    }

    pub fn page_count(&self) -> usize {
        page_count(self.expenses.len(), self.config.page_size)
    }

    /// One page of expenses using the configured page size.
    /// The page number is clamped to the pages that exist.
    pub fn page(&self, page_number: usize) -> ExpensePage {
        let pages = self.page_count();
        let page_number = page_number.clamp(1, pages.max(1));
        ExpensePage {
            items: paginate(&self.expenses, self.config.page_size, page_number).to_vec(),
            page_number,
            page_count: pages,
            window: page_window(page_number, pages),
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense, drawing its price from the current balance.
    ///
    /// Rejected without any change if the draft is invalid or the price
    /// exceeds the current balance.
    pub async fn add_expense(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord, AppError> {
        let draft = draft.validate()?;
        let wallet = self
            .wallet
            .after_expense(draft.price)
            .ok_or(AppError::InsufficientFunds {
                balance: self.wallet.current_balance,
                required: draft.price,
            })?;

        let record = ExpenseRecord::from_draft(draft);
        let mut expenses = self.expenses.clone();
        expenses.push(record.clone());
        ensure_total_fits(&expenses)?;

        self.repo
            .save_expenses_and_balance(&expenses, wallet.current_balance)
            .await?;

        self.expenses = expenses;
        self.wallet = wallet;

        tracing::info!(
            id = %record.id,
            price = record.price,
            category = %record.category,
            current_balance = self.wallet.current_balance,
            "expense added"
        );
        Ok(record)
    }

    /// Overwrite fields of an existing expense.
    ///
    /// The wallet balance is left as is, even if the price changes.
    pub async fn edit_expense(
        &mut self,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<ExpenseRecord, AppError> {
        let patch = patch.validate()?;

        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            tracing::warn!(%id, "edit requested for unknown expense");
            return Err(AppError::ExpenseNotFound(id));
        };

        let mut expenses = self.expenses.clone();
        expenses[index].apply(patch);
        ensure_total_fits(&expenses)?;
        self.repo.save_expenses(&expenses).await?;

        let updated = expenses[index].clone();
        self.expenses = expenses;

        tracing::info!(%id, price = updated.price, "expense edited");
        Ok(updated)
    }

    /// Remove an expense. Returns the removed record, or `None` if no
    /// expense had that id. The price is not credited back to the wallet.
    pub async fn delete_expense(
        &mut self,
        id: ExpenseId,
    ) -> Result<Option<ExpenseRecord>, AppError> {
        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            tracing::debug!(%id, "delete requested for unknown expense");
            return Ok(None);
        };

        let mut expenses = self.expenses.clone();
        let removed = expenses.remove(index);
        self.repo.save_expenses(&expenses).await?;
        self.expenses = expenses;

        tracing::info!(%id, "expense deleted");
        Ok(Some(removed))
    }

    /// Add income from raw user input. Both the current balance and the
    /// income baseline grow by the amount. Returns the new current balance.
    ///
    /// Empty, non-numeric or negative input changes nothing.
    pub async fn add_income(&mut self, amount: &str) -> Result<Cents, AppError> {
        let amount = parse_amount(amount)?;
        let Some(wallet) = self.wallet.after_income(amount) else {
            tracing::warn!(amount, "income would overflow the wallet balance");
            return Err(ParseCentsError::Overflow.into());
        };

        self.repo.save_wallet(&wallet).await?;
        self.wallet = wallet;

        tracing::info!(
            amount,
            current_balance = self.wallet.current_balance,
            "income added"
        );
        Ok(self.wallet.current_balance)
    }

    /// Recompute the current balance as the income baseline minus all
    /// recorded expenses, and persist it. Returns the new current balance.
    pub async fn reconcile(&mut self) -> Result<Cents, AppError> {
        let wallet = checked_total_expenses(&self.expenses)
            .and_then(|spent| self.wallet.reconciled(spent))
            .ok_or(AppError::InvalidAmount(ParseCentsError::Overflow))?;
        self.repo.save_wallet(&wallet).await?;

        if wallet.current_balance != self.wallet.current_balance {
            tracing::info!(
                from = self.wallet.current_balance,
                to = wallet.current_balance,
                "wallet balance reconciled"
            );
        }
        self.wallet = wallet;
        Ok(self.wallet.current_balance)
    }
}

/// Reject an expense list whose total no longer fits in [`Cents`].
fn ensure_total_fits(expenses: &[ExpenseRecord]) -> Result<(), AppError> {
    match checked_total_expenses(expenses) {
        Some(_) => Ok(()),
        None => Err(AppError::InvalidAmount(ParseCentsError::Overflow)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Category;
    use crate::storage::MemoryStore;

    fn draft(price: Cents, category: Category) -> ExpenseDraft {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        ExpenseDraft::new("test", price, category, date).unwrap()
    }

    async fn service() -> LedgerService<MemoryStore> {
        LedgerService::load(MemoryStore::new(), LedgerConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_run_writes_opening_balance() {
        let service = service().await;
        assert_eq!(service.total_balance(), 500000);
        assert_eq!(service.current_balance(), 500000);
        assert_eq!(
            service.store().get("totalBalance").await.unwrap(),
            Some("500000".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_expense_deducts_price() {
        let mut service = service().await;
        let record = service.add_expense(draft(20000, Category::Food)).await.unwrap();

        assert_eq!(service.current_balance(), 480000);
        assert_eq!(service.total_balance(), 500000);
        assert_eq!(service.expenses(), &[record]);
    }

    #[tokio::test]
    async fn test_add_expense_exact_balance_allowed() {
        let mut service = service().await;
        service.add_expense(draft(500000, Category::Travel)).await.unwrap();
        assert_eq!(service.current_balance(), 0);

        let result = service.add_expense(draft(1, Category::Travel)).await;
        assert!(matches!(
            result,
            Err(AppError::InsufficientFunds {
                balance: 0,
                required: 1
            })
        ));
    }

    #[tokio::test]
    async fn test_page_reports_window() {
        let mut service = service().await;
        for _ in 0..12 {
            service.add_expense(draft(100, Category::Others)).await.unwrap();
        }

        let page = service.page(3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.window, vec![1, 2, 3]);
        assert_eq!(page.items[0].id, service.expenses()[10].id);
    }

    #[tokio::test]
    async fn test_page_number_is_clamped() {
        let mut service = service().await;
        for _ in 0..12 {
            service.add_expense(draft(100, Category::Others)).await.unwrap();
        }

        let page = service.page(9);
        assert_eq!(page.page_number, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, service.expenses()[11].id);

        let page = service.page(0);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items.len(), 5);
    }
}
