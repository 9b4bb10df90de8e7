use thiserror::Error;

use crate::domain::{Cents, ExpenseId, ParseCentsError, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid expense: {0}")]
    InvalidExpense(#[from] ValidationError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseCentsError),

    #[error("Insufficient wallet balance: balance {balance}, required {required}")]
    InsufficientFunds { balance: Cents, required: Cents },

    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
