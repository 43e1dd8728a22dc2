use super::ui;
use crate::core::aggregate::{
    DashboardSummary, ExpenseShare, TimelineDay, dashboard_summary, expense_breakdown, timeline,
};
use crate::core::ledger::Ledger;
use crate::core::model::{Period, TransactionType};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Number of days shown in the recent activity table.
const TIMELINE_DAYS: usize = 10;

fn summary_table(summary: &DashboardSummary, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Balance"),
        ui::header_cell("Budget"),
        ui::header_cell("Remaining Budget"),
    ]);
    table.add_row(vec![
        ui::money_cell(summary.income, currency),
        ui::money_cell(summary.expenses, currency),
        ui::signed_money_cell(summary.balance, currency),
        ui::money_cell(summary.total_budget, currency),
        ui::signed_money_cell(summary.remaining_budget, currency),
    ]);
    table.to_string()
}

fn breakdown_table(shares: &[ExpenseShare], currency: &str) -> String {
    if shares.is_empty() {
        return ui::style_text("No expenses recorded this month", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Spent"),
        ui::header_cell("Share"),
    ]);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.category),
            ui::money_cell(share.amount, currency),
            Cell::new(format!("{:.0}%", share.percent)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

fn timeline_table(ledger: &Ledger, days: &[TimelineDay<'_>], currency: &str) -> String {
    if days.is_empty() {
        return ui::style_text("No transactions recorded", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Note"),
        ui::header_cell("Amount"),
    ]);
    for day in days {
        table.add_row(vec![
            Cell::new(day.date.format("%b %d, %Y")),
            Cell::new(""),
            Cell::new(""),
            ui::signed_money_cell(day.net, currency),
        ]);
        for txn in &day.transactions {
            let sign = match txn.kind {
                TransactionType::Income => "+",
                TransactionType::Expense => "-",
            };
            table.add_row(vec![
                Cell::new(""),
                Cell::new(ledger.category_name(txn.category_id.as_deref())),
                Cell::new(txn.note.as_deref().unwrap_or("")),
                Cell::new(format!("{sign}{}", ui::format_money(txn.amount(), currency)))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table.to_string()
}

/// Renders the dashboard for one month in `currency`.
pub fn render(ledger: &Ledger, period: Period, currency: &str) -> String {
    let transactions = ledger.transactions_in(period);
    let summary = dashboard_summary(transactions.iter().copied(), ledger.budgets_in(period));
    let shares = expense_breakdown(ledger, transactions.iter().copied());
    let days = timeline(transactions.iter().copied(), TIMELINE_DAYS);

    let mut output = format!(
        "Dashboard: {}\n\n",
        ui::style_text(&period.to_string(), ui::StyleType::Title)
    );
    output.push_str(&summary_table(&summary, currency));
    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text("Expense Breakdown", ui::StyleType::TotalLabel)
    ));
    output.push_str(&breakdown_table(&shares, currency));
    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text("Recent Activity", ui::StyleType::TotalLabel)
    ));
    output.push_str(&timeline_table(ledger, &days, currency));
    output
}

pub fn run(ledger: &Ledger, period: Period, currency: &str) -> Result<()> {
    println!("{}", render(ledger, period, currency));
    Ok(())
}
