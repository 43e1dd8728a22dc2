use super::ui;
use crate::core::aggregate::{BudgetLine, BudgetReport, budget_report};
use crate::core::ledger::Ledger;
use crate::core::model::Period;
use anyhow::Result;
use comfy_table::Cell;

const BAR_WIDTH: usize = 20;

fn budget_row(line: &BudgetLine<'_>) -> Vec<Cell> {
    let currency = line.budget.currency();
    let progress = &line.progress;
    vec![
        Cell::new(&line.label),
        ui::money_cell(line.budget.amount(), currency),
        ui::money_cell(progress.spent, currency),
        ui::money_cell(progress.remaining, currency),
        ui::progress_bar_cell(progress.bar_percent(), progress.status(), BAR_WIDTH),
        ui::percent_used_cell(progress.percent_used, progress.status()),
    ]
}

impl BudgetReport<'_> {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "Budgets: {}\n\n",
            ui::style_text(&self.period.to_string(), ui::StyleType::Title)
        );

        if self.is_empty() {
            output.push_str(&ui::style_text(
                "No budgets set for this month.",
                ui::StyleType::Subtle,
            ));
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Budget"),
            ui::header_cell("Amount"),
            ui::header_cell("Spent"),
            ui::header_cell("Remaining"),
            ui::header_cell("Progress"),
            ui::header_cell("Used"),
        ]);

        for line in self.total.iter().chain(self.categories.iter()) {
            table.add_row(budget_row(line));
        }
        output.push_str(&table.to_string());
        output
    }
}

pub fn run(ledger: &Ledger, period: Period) -> Result<()> {
    let report = budget_report(ledger, period);
    println!("{}", report.display_as_table());
    Ok(())
}
