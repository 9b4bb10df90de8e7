use serde::{Deserialize, Serialize};

use crate::domain::{CategoryTotal, Cents, ExpenseRecord};

/// Headline figures for the wallet view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub current_balance: Cents,
    pub total_balance: Cents,
    pub total_expenses: Cents,
    pub expense_count: usize,
}

/// Category breakdown of all expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Cents,
    pub count: usize,
    pub percentage: f64,
}

impl CategoryReport {
    pub fn new(totals: Vec<CategoryTotal>, total: Cents) -> Self {
        let categories = totals
            .into_iter()
            .map(|t| CategorySummary {
                category: t.category.to_string(),
                total: t.total,
                count: t.count,
                percentage: if total > 0 {
                    t.total as f64 * 100.0 / total as f64
                } else {
                    0.0
                },
            })
            .collect();
        Self { categories, total }
    }
}

/// One page of the transaction list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensePage {
    pub items: Vec<ExpenseRecord>,
    pub page_number: usize,
    pub page_count: usize,
    /// Page numbers to offer as navigation buttons
    pub window: Vec<usize>,
}
