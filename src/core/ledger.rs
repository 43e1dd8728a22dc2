//! In-memory ledger of categories, transactions and budgets.
//!
//! The ledger is the data store the aggregations read from: it hands out
//! already-scoped slices of records (per month, expenses only, and so on) and
//! never computes totals itself.

use super::error::FinanceError;
use super::model::{Budget, BudgetScope, Category, Period, Transaction, TransactionType};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Ledger {
    pub fn new(
        categories: Vec<Category>,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
    ) -> Self {
        Ledger {
            categories,
            transactions,
            budgets,
        }
    }

    /// Checks that every category reference points at a known category.
    pub fn validate(&self) -> Result<(), FinanceError> {
        for txn in &self.transactions {
            if let Some(id) = &txn.category_id {
                self.category(id).map_err(|_| {
                    FinanceError::not_found(format!(
                        "category {id} referenced by transaction {}",
                        txn.id
                    ))
                })?;
            }
        }
        for budget in &self.budgets {
            if let BudgetScope::Category(id) = budget.scope() {
                self.category(id).map_err(|_| {
                    FinanceError::not_found(format!(
                        "category {id} referenced by budget {}",
                        budget.id()
                    ))
                })?;
            }
        }
        debug!(
            categories = self.categories.len(),
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "Ledger validated"
        );
        Ok(())
    }

    pub fn category(&self, id: &str) -> Result<&Category, FinanceError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| FinanceError::not_found(format!("category {id}")))
    }

    /// Display name for an optional category reference.
    pub fn category_name(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.category(id).ok())
            .map_or(UNCATEGORIZED, |c| c.name.as_str())
    }

    /// Every transaction, newest date first. Same-day entries keep their
    /// recorded order.
    pub fn transactions_newest_first(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.transactions.iter().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    pub fn categories_of(&self, kind: TransactionType) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.kind == kind).collect()
    }

    pub fn transactions_in(&self, period: Period) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .collect()
    }

    pub fn expenses_in(&self, period: Period) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.date))
            .collect()
    }

    pub fn budgets_in(&self, period: Period) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|b| b.period() == period)
            .collect()
    }

    /// The total budget for a month. Only the first one is meaningful when
    /// several were recorded.
    pub fn total_budget(&self, period: Period) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|b| b.period() == period && b.is_total())
    }
}
