use anyhow::{Context, Result};

use crate::data_provider::DataProvider;
use crate::stats::Selection;
use crate::table_model::TableViewModel;

/// Plain-text grid, numeric columns right-aligned
pub fn format_table(view: &TableViewModel) -> String {
    let widths = view.column_widths();
    let numeric = |col: usize| col >= 3 && col != 5;

    let format_line = |cells: Vec<String>| {
        cells
            .iter()
            .enumerate()
            .map(|(col, text)| {
                if numeric(col) {
                    format!("{:>width$}", text, width = widths[col])
                } else {
                    format!("{:<width$}", text, width = widths[col])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = (0..view.column_count())
        .filter_map(|c| view.column_label(c).map(str::to_string))
        .collect();
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let mut out = String::new();
    out.push_str(&format_line(header));
    out.push('\n');
    out.push_str(&"─".repeat(total));
    out.push('\n');
    for row in 0..view.row_count() {
        if let Some(cells) = view.row_cells(row) {
            out.push_str(&format_line(cells));
            out.push('\n');
        }
    }
    out
}

pub async fn run(provider: &DataProvider, team: &str, year: &str) -> Result<()> {
    let year = super::parse_year(year)?;
    let selection = Selection::new(team, year);

    let table = provider
        .fetch_weekly_stats(year, team)
        .await
        .with_context(|| format!("Failed to load stats for {}", selection))?;
    let view = TableViewModel::new(table);

    println!("\n{} ({} rows)\n", selection, view.row_count());
    print!("{}", format_table(&view));
    println!();
    Ok(())
}
