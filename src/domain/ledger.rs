use serde::{Deserialize, Serialize};

use super::{Category, Cents, ExpenseRecord};

/// Sum of all expense prices, `None` if it does not fit in [`Cents`].
pub fn checked_total_expenses(records: &[ExpenseRecord]) -> Option<Cents> {
    records
        .iter()
        .try_fold(0 as Cents, |total, record| total.checked_add(record.price))
}

/// Sum of all expense prices, saturating at the numeric bounds.
pub fn total_expenses(records: &[ExpenseRecord]) -> Cents {
    records
        .iter()
        .fold(0, |total: Cents, record| total.saturating_add(record.price))
}

/// Spending for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
}

/// How category totals are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryOrder {
    /// Order in which each category first appears in the records
    #[default]
    FirstSeen,
    /// Largest total first; ties keep first-seen order
    Descending,
}

impl CategoryOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first-seen" | "first_seen" => Some(CategoryOrder::FirstSeen),
            "descending" | "desc" => Some(CategoryOrder::Descending),
            _ => None,
        }
    }
}

/// Group records by category, summing prices.
/// Only categories that have at least one record are returned.
pub fn category_totals(records: &[ExpenseRecord], order: CategoryOrder) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in records {
        match totals.iter_mut().find(|t| t.category == record.category) {
            Some(entry) => {
                entry.total = entry.total.saturating_add(record.price);
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: record.category,
                total: record.price,
                count: 1,
            }),
        }
    }

    if order == CategoryOrder::Descending {
        // sort_by is stable, so equal totals stay in first-seen order
        totals.sort_by(|a, b| b.total.cmp(&a.total));
    }

    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::ExpenseDraft;

    fn make_record(price: Cents, category: Category) -> ExpenseRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ExpenseRecord::from_draft(ExpenseDraft::new("item", price, category, date).unwrap())
    }

    #[test]
    fn test_total_expenses_empty() {
        assert_eq!(total_expenses(&[]), 0);
        assert!(category_totals(&[], CategoryOrder::FirstSeen).is_empty());
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let records = vec![
            make_record(200, Category::Travel),
            make_record(500, Category::Food),
            make_record(100, Category::Travel),
        ];

        let totals = category_totals(&records, CategoryOrder::FirstSeen);

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: Category::Travel,
                    total: 300,
                    count: 2
                },
                CategoryTotal {
                    category: Category::Food,
                    total: 500,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_category_totals_descending_order() {
        let records = vec![
            make_record(100, Category::Others),
            make_record(200, Category::Travel),
            make_record(500, Category::Food),
            make_record(100, Category::Shopping),
        ];

        let categories: Vec<Category> = category_totals(&records, CategoryOrder::Descending)
            .into_iter()
            .map(|t| t.category)
            .collect();

        assert_eq!(
            categories,
            vec![
                Category::Food,
                Category::Travel,
                Category::Others,
                Category::Shopping
            ]
        );
    }

    #[test]
    fn test_category_totals_sum_to_total_expenses() {
        let records = vec![
            make_record(1999, Category::Food),
            make_record(250, Category::Grocery),
            make_record(0, Category::Others),
            make_record(7000, Category::Travel),
            make_record(1, Category::Food),
        ];

        for order in [CategoryOrder::FirstSeen, CategoryOrder::Descending] {
            let sum: Cents = category_totals(&records, order).iter().map(|t| t.total).sum();
            assert_eq!(sum, total_expenses(&records));
        }
    }

    #[test]
    fn test_totals_do_not_overflow() {
        let mut big = make_record(0, Category::Travel);
        big.price = Cents::MAX;
        let records = vec![big.clone(), big, make_record(100, Category::Food)];

        assert_eq!(checked_total_expenses(&records), None);
        assert_eq!(total_expenses(&records), Cents::MAX);
        let totals = category_totals(&records, CategoryOrder::Descending);
        assert_eq!(totals[0].total, Cents::MAX);
        assert_eq!(checked_total_expenses(&records[2..]), Some(100));
    }

    #[test]
    fn test_category_order_parse() {
        assert_eq!(CategoryOrder::from_str("desc"), Some(CategoryOrder::Descending));
        assert_eq!(
            CategoryOrder::from_str("first-seen"),
            Some(CategoryOrder::FirstSeen)
        );
        assert_eq!(CategoryOrder::from_str("random"), None);
    }
}
