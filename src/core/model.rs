//! Ledger records: transactions, categories, budgets and the monthly period they are scoped to.

use super::currency::DEFAULT_CURRENCY;
use super::error::FinanceError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub is_default: bool,
}

/// A single income or expense entry. Amounts are never negative; the
/// direction is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub id: String,
    amount: f64,
    pub kind: TransactionType,
    pub category_id: Option<String>,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionType,
    #[serde(default)]
    category_id: Option<String>,
    date: NaiveDate,
    #[serde(default)]
    note: Option<String>,
    #[serde(default = "default_currency")]
    currency: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        kind: TransactionType,
        category_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Self, FinanceError> {
        let id = id.into();
        if !amount.is_finite() || amount < 0.0 {
            return Err(FinanceError::validation(format!(
                "transaction {id} has invalid amount {amount}"
            )));
        }
        Ok(Transaction {
            id,
            amount,
            kind,
            category_id: category_id.map(str::to_string),
            date,
            note: None,
            currency: default_currency(),
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with its direction applied: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = FinanceError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let txn = Transaction::new(
            record.id,
            record.amount,
            record.kind,
            record.category_id.as_deref(),
            record.date,
        )?
        .with_currency(record.currency);
        Ok(match record.note {
            Some(note) => txn.with_note(note),
            None => txn,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        TransactionRecord {
            id: txn.id,
            amount: txn.amount,
            kind: txn.kind,
            category_id: txn.category_id,
            date: txn.date,
            note: txn.note,
            currency: txn.currency,
        }
    }
}

/// What a budget caps: every expense of the month, or one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BudgetScope {
    Total,
    Category(String),
}

impl BudgetScope {
    pub fn category_id(&self) -> Option<&str> {
        match self {
            BudgetScope::Total => None,
            BudgetScope::Category(id) => Some(id),
        }
    }
}

/// A monthly spending limit. Construction rejects non-positive amounts and
/// out-of-range months so progress can always divide by `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BudgetRecord", into = "BudgetRecord")]
pub struct Budget {
    id: String,
    scope: BudgetScope,
    amount: f64,
    period: Period,
    currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BudgetRecord {
    id: String,
    #[serde(default)]
    category_id: Option<String>,
    amount: f64,
    month: u32,
    year: i32,
    #[serde(default = "default_currency")]
    currency: String,
}

impl Budget {
    pub fn new(
        id: impl Into<String>,
        scope: BudgetScope,
        amount: f64,
        period: Period,
        currency: impl Into<String>,
    ) -> Result<Self, FinanceError> {
        let id = id.into();
        if !amount.is_finite() || amount <= 0.0 {
            return Err(FinanceError::validation(format!(
                "budget {id} amount must be positive, got {amount}"
            )));
        }
        Ok(Budget {
            id,
            scope,
            amount,
            period,
            currency: currency.into(),
        })
    }

    pub fn total(id: impl Into<String>, amount: f64, period: Period) -> Result<Self, FinanceError> {
        Budget::new(id, BudgetScope::Total, amount, period, DEFAULT_CURRENCY)
    }

    pub fn for_category(
        id: impl Into<String>,
        category_id: impl Into<String>,
        amount: f64,
        period: Period,
    ) -> Result<Self, FinanceError> {
        Budget::new(
            id,
            BudgetScope::Category(category_id.into()),
            amount,
            period,
            DEFAULT_CURRENCY,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> &BudgetScope {
        &self.scope
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_total(&self) -> bool {
        self.scope == BudgetScope::Total
    }
}

impl TryFrom<BudgetRecord> for Budget {
    type Error = FinanceError;

    fn try_from(record: BudgetRecord) -> Result<Self, Self::Error> {
        let scope = match record.category_id {
            Some(id) => BudgetScope::Category(id),
            None => BudgetScope::Total,
        };
        let period = Period::new(record.year, record.month)?;
        Budget::new(record.id, scope, record.amount, period, record.currency)
    }
}

impl From<Budget> for BudgetRecord {
    fn from(budget: Budget) -> Self {
        BudgetRecord {
            id: budget.id,
            category_id: budget.scope.category_id().map(str::to_string),
            amount: budget.amount,
            month: budget.period.month,
            year: budget.period.year,
            currency: budget.currency,
        }
    }
}

/// A calendar month. Budgets and dashboards are always scoped to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, FinanceError> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Period { year, month })
    }

    pub fn current() -> Self {
        Period::of(Local::now().date_naive())
    }

    pub fn of(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first_day() {
            Some(day) => write!(f, "{}", day.format("%B %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

impl FromStr for Period {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FinanceError::validation(format!("invalid period '{s}', expected YYYY-MM"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Period::new(year, month)
    }
}
