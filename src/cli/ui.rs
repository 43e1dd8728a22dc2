use crate::core::aggregate::BudgetStatus;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount with two decimals and the currency code.
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Right aligned money cell.
pub fn money_cell(amount: f64, currency: &str) -> Cell {
    Cell::new(format_money(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Money cell coloured by sign.
pub fn signed_money_cell(amount: f64, currency: &str) -> Cell {
    let color = if amount >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    money_cell(amount, currency).fg(color)
}

fn status_color(status: BudgetStatus) -> Color {
    match status {
        BudgetStatus::OnTrack => Color::Green,
        BudgetStatus::Warning => Color::Yellow,
        BudgetStatus::Over => Color::Red,
    }
}

/// Percentage used, one decimal, coloured by budget status.
pub fn percent_used_cell(percent: f64, status: BudgetStatus) -> Cell {
    Cell::new(format!("{percent:.1}%"))
        .fg(status_color(status))
        .set_alignment(CellAlignment::Right)
}

/// Text progress bar of `width` characters for a percentage capped at 100.
pub fn progress_bar_cell(bar_percent: f64, status: BudgetStatus, width: usize) -> Cell {
    let filled = ((bar_percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
    Cell::new(bar).fg(status_color(status))
}

/// Creates a spinner shown while waiting on a network call.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, "THB"), "1234.50 THB");
        assert_eq!(format_money(-3.0, "USD"), "-3.00 USD");
    }

    #[test]
    fn test_progress_bar_cell_caps_fill() {
        let half = progress_bar_cell(50.0, BudgetStatus::OnTrack, 10);
        assert_eq!(half.content(), "█████░░░░░");

        let full = progress_bar_cell(100.0, BudgetStatus::Over, 4);
        assert_eq!(full.content(), "████");
    }
}
