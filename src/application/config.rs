use crate::domain::{Cents, DEFAULT_TOTAL_BALANCE};

/// Number of expenses shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Knobs for a ledger session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Income baseline written on first run when the store has none
    pub opening_balance: Cents,
    /// Expenses per page in the transaction list
    pub page_size: usize,
}

impl LedgerConfig {
    pub fn with_opening_balance(mut self, opening_balance: Cents) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            opening_balance: DEFAULT_TOTAL_BALANCE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.opening_balance, 500000);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        assert_eq!(LedgerConfig::default().with_page_size(0).page_size, 1);
    }
}
