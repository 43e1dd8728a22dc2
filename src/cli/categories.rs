use super::ui;
use crate::core::ledger::Ledger;
use crate::core::model::{Category, TransactionType};
use anyhow::Result;
use comfy_table::{Cell, Color};

fn category_table(categories: &[&Category]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Name"), ui::header_cell("Default")]);
    for category in categories {
        let default_cell = if category.is_default {
            Cell::new("default").fg(Color::DarkGrey)
        } else {
            Cell::new("")
        };
        table.add_row(vec![Cell::new(&category.name), default_cell]);
    }
    table.to_string()
}

/// Renders income and expense categories as two sections.
pub fn render(ledger: &Ledger) -> String {
    let mut output = format!("{}\n", ui::style_text("Categories", ui::StyleType::Title));

    if ledger.categories.is_empty() {
        output.push('\n');
        output.push_str(&ui::style_text(
            "No categories found.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    for (title, kind) in [
        ("Income Categories", TransactionType::Income),
        ("Expense Categories", TransactionType::Expense),
    ] {
        let categories = ledger.categories_of(kind);
        if categories.is_empty() {
            continue;
        }
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text(title, ui::StyleType::TotalLabel)
        ));
        output.push_str(&category_table(&categories));
        output.push('\n');
    }
    output
}

pub fn run(ledger: &Ledger) -> Result<()> {
    println!("{}", render(ledger));
    Ok(())
}
