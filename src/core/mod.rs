//! Core budgeting and conversion logic

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod ledger;
pub mod log;
pub mod model;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, CurrencyConverter};
pub use currency::CurrencyRateProvider;
pub use error::FinanceError;
pub use ledger::Ledger;
pub use model::{Budget, BudgetScope, Category, Period, Transaction, TransactionType};
