use serde::{Deserialize, Serialize};

use super::Cents;

/// Income baseline written on first run when none is stored (5000.00).
pub const DEFAULT_TOTAL_BALANCE: Cents = 5000_00;

/// The two balances the ledger keeps.
///
/// `total_balance` is the income baseline and only grows with income.
/// `current_balance` is what can still be spent; expenses are drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub total_balance: Cents,
    pub current_balance: Cents,
}

impl WalletState {
    /// A fresh wallet where nothing has been spent yet.
    pub fn new(total_balance: Cents) -> Self {
        Self {
            total_balance,
            current_balance: total_balance,
        }
    }

    pub fn can_afford(&self, price: Cents) -> bool {
        price <= self.current_balance
    }

    /// Balance left after spending `price`, or `None` if it would go negative.
    pub fn after_expense(&self, price: Cents) -> Option<WalletState> {
        if !self.can_afford(price) {
            return None;
        }
        Some(WalletState {
            current_balance: self.current_balance - price,
            ..*self
        })
    }

    /// Both balances grow by the income amount. `None` if either overflows.
    pub fn after_income(&self, amount: Cents) -> Option<WalletState> {
        Some(WalletState {
            total_balance: self.total_balance.checked_add(amount)?,
            current_balance: self.current_balance.checked_add(amount)?,
        })
    }

    /// Current balance recomputed from the baseline and what was spent.
    pub fn reconciled(&self, total_expenses: Cents) -> Option<WalletState> {
        Some(WalletState {
            current_balance: self.total_balance.checked_sub(total_expenses)?,
            ..*self
        })
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_BALANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wallet() {
        let wallet = WalletState::default();
        assert_eq!(wallet.total_balance, 500000);
        assert_eq!(wallet.current_balance, 500000);
    }

    #[test]
    fn test_after_expense_within_balance() {
        let wallet = WalletState::new(10000);
        let next = wallet.after_expense(10000).unwrap();
        assert_eq!(next.current_balance, 0);
        assert_eq!(next.total_balance, 10000);
    }

    #[test]
    fn test_after_expense_rejects_overdraft() {
        let wallet = WalletState::new(10000);
        assert!(!wallet.can_afford(10001));
        assert_eq!(wallet.after_expense(10001), None);
    }

    #[test]
    fn test_after_income_raises_both_balances() {
        let wallet = WalletState {
            total_balance: 10000,
            current_balance: 4000,
        };
        let next = wallet.after_income(2500).unwrap();
        assert_eq!(next.total_balance, 12500);
        assert_eq!(next.current_balance, 6500);
    }

    #[test]
    fn test_reconciled() {
        let wallet = WalletState {
            total_balance: 10000,
            current_balance: 1,
        };
        assert_eq!(wallet.reconciled(3000).unwrap().current_balance, 7000);
    }

    #[test]
    fn test_income_overflow_is_rejected() {
        let wallet = WalletState::new(Cents::MAX - 10);
        assert_eq!(wallet.after_income(11), None);
        assert!(wallet.after_income(10).is_some());
    }

    #[test]
    fn test_reconcile_overflow_is_rejected() {
        let wallet = WalletState::new(Cents::MIN + 5);
        assert_eq!(wallet.reconciled(6), None);
    }
}
