//! Spending aggregations over already-scoped transaction lists.
//!
//! Every function here is a pure fold: the same inputs always produce the same
//! output and nothing is cached between calls.
use crate::core::ledger::Ledger;
use crate::core::model::{Budget, BudgetScope, Period, Transaction, TransactionType};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Spending measured against one budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub spent: f64,
    /// Clamped at zero; overspend shows up in `percent_used` instead.
    pub remaining: f64,
    /// Unrounded and may exceed 100.
    pub percent_used: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetProgress {
    pub fn status(&self) -> BudgetStatus {
        if self.percent_used > 100.0 {
            BudgetStatus::Over
        } else if self.percent_used > 80.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    /// Fill level of a progress bar, capped at 100.
    pub fn bar_percent(&self) -> f64 {
        self.percent_used.min(100.0)
    }
}

/// Computes spent, remaining and percent used for `budget`.
///
/// `transactions` must already be narrowed to the budget's month and to
/// expenses. A total budget counts all of them; a category budget only those
/// with a matching category.
pub fn compute_budget_progress<'a>(
    budget: &Budget,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> BudgetProgress {
    let spent: f64 = match budget.scope() {
        BudgetScope::Total => transactions.into_iter().map(Transaction::amount).sum(),
        BudgetScope::Category(category_id) => transactions
            .into_iter()
            .filter(|t| t.category_id.as_deref() == Some(category_id.as_str()))
            .map(Transaction::amount)
            .sum(),
    };

    BudgetProgress {
        spent,
        remaining: (budget.amount() - spent).max(0.0),
        percent_used: (spent / budget.amount()) * 100.0,
    }
}

#[derive(Debug, Clone)]
pub struct BudgetLine<'a> {
    pub budget: &'a Budget,
    pub label: String,
    pub progress: BudgetProgress,
}

/// Budgets of one month with their progress.
#[derive(Debug, Clone)]
pub struct BudgetReport<'a> {
    pub period: Period,
    pub total: Option<BudgetLine<'a>>,
    pub categories: Vec<BudgetLine<'a>>,
}

impl BudgetReport<'_> {
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.categories.is_empty()
    }
}

fn budget_line<'a>(ledger: &Ledger, budget: &'a Budget, expenses: &[&Transaction]) -> BudgetLine<'a> {
    BudgetLine {
        budget,
        label: ledger.category_name(budget.scope().category_id()).to_string(),
        progress: compute_budget_progress(budget, expenses.iter().copied()),
    }
}

pub fn budget_report(ledger: &Ledger, period: Period) -> BudgetReport<'_> {
    let expenses = ledger.expenses_in(period);
    debug!(%period, expenses = expenses.len(), "Building budget report");

    let total = ledger.total_budget(period).map(|budget| BudgetLine {
        label: "Total Monthly Budget".to_string(),
        ..budget_line(ledger, budget, &expenses)
    });
    let categories = ledger
        .budgets_in(period)
        .into_iter()
        .filter(|b| !b.is_total())
        .map(|budget| budget_line(ledger, budget, &expenses))
        .collect();

    BudgetReport {
        period,
        total,
        categories,
    }
}

/// Headline figures of the dashboard for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    /// Sum of every total budget recorded for the month.
    pub total_budget: f64,
    /// Not clamped: negative when the month is over budget.
    pub remaining_budget: f64,
}

pub fn dashboard_summary<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    budgets: impl IntoIterator<Item = &'a Budget>,
) -> DashboardSummary {
    let (income, expenses) =
        transactions
            .into_iter()
            .fold((0.0, 0.0), |(income, expenses), t| match t.kind {
                TransactionType::Income => (income + t.amount(), expenses),
                TransactionType::Expense => (income, expenses + t.amount()),
            });
    let total_budget: f64 = budgets
        .into_iter()
        .filter(|b| b.is_total())
        .map(Budget::amount)
        .sum();

    DashboardSummary {
        income,
        expenses,
        balance: income - expenses,
        total_budget,
        remaining_budget: total_budget - expenses,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseShare {
    pub category: String,
    pub amount: f64,
    pub percent: f64,
}

/// Expense totals per category name, largest first.
pub fn expense_breakdown<'a>(
    ledger: &Ledger,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<ExpenseShare> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for txn in transactions.into_iter().filter(|t| t.is_expense()) {
        *totals
            .entry(ledger.category_name(txn.category_id.as_deref()))
            .or_default() += txn.amount();
    }

    let grand_total: f64 = totals.values().sum();
    let mut shares: Vec<ExpenseShare> = totals
        .into_iter()
        .map(|(category, amount)| ExpenseShare {
            category: category.to_string(),
            amount,
            percent: if grand_total > 0.0 {
                amount / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

#[derive(Debug, Clone)]
pub struct TimelineDay<'a> {
    pub date: NaiveDate,
    /// Income minus expenses for the day.
    pub net: f64,
    pub transactions: Vec<&'a Transaction>,
}

/// Groups transactions by day, newest first, keeping at most `max_days` days.
pub fn timeline<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    max_days: usize,
) -> Vec<TimelineDay<'a>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Transaction>> = BTreeMap::new();
    for txn in transactions {
        by_date.entry(txn.date).or_default().push(txn);
    }

    by_date
        .into_iter()
        .rev()
        .take(max_days)
        .map(|(date, transactions)| TimelineDay {
            date,
            net: transactions.iter().map(|t| t.signed_amount()).sum(),
            transactions,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    pub period: Period,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Income and expense totals per month, oldest first.
pub fn monthly_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<Period, (f64, f64)> = BTreeMap::new();
    for txn in transactions {
        let entry = months.entry(Period::of(txn.date)).or_default();
        match txn.kind {
            TransactionType::Income => entry.0 += txn.amount(),
            TransactionType::Expense => entry.1 += txn.amount(),
        }
    }

    months
        .into_iter()
        .map(|(period, (income, expenses))| MonthlyTotals {
            period,
            income,
            expenses,
        })
        .collect()
}
