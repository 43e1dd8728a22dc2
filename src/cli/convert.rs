use super::ui;
use crate::core::convert::{ConversionResult, CurrencyConverter};
use crate::core::currency::{SUPPORTED_CURRENCIES, find_currency};
use anyhow::Result;
use comfy_table::Cell;

impl ConversionResult {
    pub fn display(&self) -> String {
        let label = |code: &str| find_currency(code).map_or("", |c| c.label);
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell("Rate"),
        ]);
        table.add_row(vec![
            Cell::new(format!("{} {}", self.from, label(&self.from))),
            Cell::new(format!("{} {}", self.to, label(&self.to))),
            Cell::new(self.rate),
        ]);

        format!(
            "{}\n\n{} = {}",
            table,
            ui::format_money(self.original_amount, &self.from),
            ui::style_text(
                &ui::format_money(self.converted_amount, &self.to),
                ui::StyleType::TotalValue
            )
        )
    }
}

pub async fn run(converter: &CurrencyConverter, amount: f64, from: &str, to: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let result = converter.convert(amount, from, to).await;
    pb.finish_and_clear();

    println!("{}", result?.display());
    Ok(())
}

pub fn list_currencies() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for currency in SUPPORTED_CURRENCIES {
        table.add_row(vec![Cell::new(currency.code), Cell::new(currency.label)]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_conversion() {
        let result = ConversionResult {
            original_amount: 100.0,
            converted_amount: 90.0,
            rate: 0.9,
            from: "USD".to_string(),
            to: "EUR".to_string(),
        };
        let output = result.display();
        assert!(output.contains("US Dollar"));
        assert!(output.contains("Euro"));
        assert!(output.contains("100.00 USD"));
        assert!(output.contains("90.00 EUR"));
    }

    #[test]
    fn test_list_currencies() {
        let output = list_currencies();
        for currency in SUPPORTED_CURRENCIES {
            assert!(output.contains(currency.code));
        }
    }
}
