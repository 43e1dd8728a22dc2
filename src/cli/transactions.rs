use super::ui;
use crate::core::aggregate::{MonthlyTotals, monthly_totals};
use crate::core::ledger::Ledger;
use crate::core::model::{Transaction, TransactionType};
use anyhow::Result;
use comfy_table::{Cell, Color};

fn type_cell(kind: TransactionType) -> Cell {
    match kind {
        TransactionType::Income => Cell::new("▲ income").fg(Color::Green),
        TransactionType::Expense => Cell::new("▼ expense").fg(Color::Red),
    }
}

fn transactions_table(ledger: &Ledger, transactions: &[&Transaction]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Type"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Note"),
    ]);
    for txn in transactions {
        table.add_row(vec![
            Cell::new(txn.date.format("%b %d, %Y")),
            type_cell(txn.kind),
            Cell::new(ledger.category_name(txn.category_id.as_deref())),
            ui::signed_money_cell(txn.signed_amount(), &txn.currency),
            Cell::new(txn.note.as_deref().unwrap_or("")),
        ]);
    }
    table.to_string()
}

// Amounts are summed as recorded; no currency conversion happens here.
fn history_table(months: &[MonthlyTotals], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Net"),
    ]);
    for month in months.iter().rev() {
        table.add_row(vec![
            Cell::new(month.period),
            ui::money_cell(month.income, currency),
            ui::money_cell(month.expenses, currency),
            ui::signed_money_cell(month.net(), currency),
        ]);
    }
    table.to_string()
}

/// Renders every transaction, newest first, followed by per-month totals.
pub fn render(ledger: &Ledger, currency: &str) -> String {
    let transactions = ledger.transactions_newest_first();
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Transactions", ui::StyleType::Title)
    );

    if transactions.is_empty() {
        output.push_str(&ui::style_text(
            "No transactions found.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    output.push_str(&transactions_table(ledger, &transactions));
    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text("Monthly History", ui::StyleType::TotalLabel)
    ));
    output.push_str(&history_table(
        &monthly_totals(transactions.iter().copied()),
        currency,
    ));
    output
}

pub fn run(ledger: &Ledger, currency: &str) -> Result<()> {
    println!("{}", render(ledger, currency));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Category;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_render_lists_newest_first_with_history() {
        let ledger = Ledger::new(
            vec![Category {
                id: "food".to_string(),
                name: "Groceries".to_string(),
                kind: TransactionType::Expense,
                is_default: false,
            }],
            vec![
                Transaction::new("t1", 42.0, TransactionType::Expense, Some("food"), date(4, 20))
                    .unwrap()
                    .with_note("Weekly shop"),
                Transaction::new("t2", 15.5, TransactionType::Expense, None, date(5, 2))
                    .unwrap()
                    .with_currency("USD"),
                Transaction::new("t3", 3000.0, TransactionType::Income, None, date(5, 1)).unwrap(),
            ],
            Vec::new(),
        );

        let output = render(&ledger, "THB");
        let newest = output.find("May 02, 2024").expect("newest row");
        let middle = output.find("May 01, 2024").expect("middle row");
        let oldest = output.find("Apr 20, 2024").expect("oldest row");
        assert!(newest < middle && middle < oldest);

        assert!(output.contains("Groceries"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Weekly shop"));
        assert!(output.contains("-15.50 USD"));
        assert!(output.contains("3000.00 THB"));

        assert!(output.contains("Monthly History"));
        assert!(output.contains("May 2024"));
        assert!(output.contains("April 2024"));
        assert!(output.contains("2984.50 THB"));
    }

    #[test]
    fn test_render_without_transactions() {
        let output = render(&Ledger::default(), "THB");
        assert!(output.contains("No transactions found."));
        assert!(!output.contains("Monthly History"));
    }
}
