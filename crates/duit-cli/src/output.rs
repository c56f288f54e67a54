//! Plain-text rendering helpers shared by the command handlers.

use std::cmp;

use colored::Colorize;

use duit_domain::UsageLevel;

const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

/// Renders a header row plus data rows with padded columns.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths: Vec<usize> = columns.iter().map(|column| column.name.len()).collect();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, visible_width(value));
            }
        }
    }

    let mut output = Vec::with_capacity(rows.len() + 1);
    let header: Vec<String> = columns.iter().map(|c| c.name.to_string()).collect();
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (index, column) in columns.iter().enumerate() {
        if index > 0 {
            line.push_str(&" ".repeat(COLUMN_GAP));
        }
        let width = widths.get(index).copied().unwrap_or(0);
        let value = cells.get(index).map(String::as_str).unwrap_or("");
        // Pad by the visible width so color escapes never skew the column.
        let pad = " ".repeat(width.saturating_sub(visible_width(value)));
        match column.align {
            Align::Left => {
                line.push_str(value);
                line.push_str(&pad);
            }
            Align::Right => {
                line.push_str(&pad);
                line.push_str(value);
            }
        }
    }
    line.trim_end().to_string()
}

/// Character count of a cell as the terminal shows it, skipping over ANSI
/// escape sequences.
fn visible_width(value: &str) -> usize {
    let mut width = 0;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for follower in chars.by_ref() {
                if follower.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Formats an amount as e.g. `IDR 1.500.000`, using dots as thousands
/// separators per the id-ID locale. Fractional parts are kept only when
/// present.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    // Round to cents first so a fraction like .999 carries into the whole
    // part instead of printing as a third digit.
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    formatted.push_str(&grouped);
    if fraction > 0 {
        formatted.push_str(&format!(",{fraction:02}"));
    }

    format!("{currency} {formatted}")
}

/// Renders a percentage with its usage color, or a dash when the budget has
/// no allocation to compare against.
pub fn format_usage(percent: Option<f64>, level: UsageLevel) -> String {
    match percent {
        Some(value) => {
            let text = format!("{value:.1}%");
            match level {
                UsageLevel::Normal => text.green().to_string(),
                UsageLevel::Warning => text.yellow().to_string(),
                UsageLevel::Critical => text.red().to_string(),
            }
        }
        None => "-".to_string(),
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rupiah_thousands_with_dots() {
        assert_eq!(format_amount(1_500_000.0, "IDR"), "IDR 1.500.000");
        assert_eq!(format_amount(950.0, "IDR"), "IDR 950");
        assert_eq!(format_amount(0.0, "IDR"), "IDR 0");
    }

    #[test]
    fn keeps_sign_and_fraction() {
        assert_eq!(format_amount(-200_000.0, "IDR"), "IDR -200.000");
        assert_eq!(format_amount(12.5, "USD"), "USD 12,50");
    }

    #[test]
    fn fraction_rounding_carries_into_the_whole_part() {
        assert_eq!(format_amount(12.999, "USD"), "USD 13");
        assert_eq!(format_amount(9.999, "USD"), "USD 10");
        assert_eq!(format_amount(0.994, "USD"), "USD 0,99");
    }

    #[test]
    fn pads_columns_and_respects_alignment() {
        let columns = [Column::left("Name"), Column::right("Amount")];
        let rows = vec![
            vec!["Food".to_string(), "1.500.000".to_string()],
            vec!["Transport".to_string(), "800.000".to_string()],
        ];
        let lines = render_table(&columns, &rows);
        assert_eq!(lines[0], "Name          Amount");
        assert_eq!(lines[1], "Food       1.500.000");
        assert_eq!(lines[2], "Transport    800.000");
    }

    #[test]
    fn color_escapes_do_not_skew_column_widths() {
        let columns = [Column::left("Category"), Column::right("Usage")];
        let colored_cell = "\u{1b}[33m80.0%\u{1b}[0m".to_string();
        let rows = vec![
            vec!["Food".to_string(), colored_cell.clone()],
            vec!["Entertainment".to_string(), "95.0%".to_string()],
        ];
        let lines = render_table(&columns, &rows);
        assert_eq!(lines[0], "Category       Usage");
        assert_eq!(lines[1], format!("Food           {colored_cell}"));
        assert_eq!(lines[2], "Entertainment  95.0%");
    }

    #[test]
    fn missing_allocation_renders_a_dash() {
        assert_eq!(format_usage(None, UsageLevel::Normal), "-");
    }
}
