//! Table rendering for query results.

use crate::market_data::{HistoricalSeries, OverviewRecord};
use crate::provider::{CompanyWeighting, SectorWeighting};
use crate::ui;
use comfy_table::Cell;

pub fn indices_table(country: &str, names: &[String]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Index")]);
    for name in names {
        table.add_row(vec![Cell::new(name)]);
    }

    format!(
        "Indices ({})\n\n{}",
        ui::style_text(country, ui::StyleType::Subtle),
        table
    )
}

pub fn history_table(index_name: &str, series: &HistoricalSeries) -> String {
    if series.is_empty() {
        return format!("{index_name}\n\nNo data found.");
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Open"),
        ui::header_cell("High"),
        ui::header_cell("Low"),
        ui::header_cell("Close"),
    ]);
    for point in series {
        table.add_row(vec![
            Cell::new(&point.date),
            ui::numeric_cell(format!("{:.2}", point.open)),
            ui::numeric_cell(format!("{:.2}", point.high)),
            ui::numeric_cell(format!("{:.2}", point.low)),
            ui::numeric_cell(format!("{:.2}", point.close)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(index_name, ui::StyleType::Title),
        table
    )
}

pub fn overview_table(index_name: &str, records: &[OverviewRecord]) -> String {
    if records.is_empty() {
        return format!("{index_name}\n\nNo data found.");
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Last"),
        ui::header_cell("Change"),
        ui::header_cell("Change (%)"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.symbol),
            Cell::new(&record.name),
            ui::numeric_cell(format!("{:.2}", record.last)),
            ui::change_cell(&record.change),
            ui::change_cell(&record.change_percentage),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(index_name, ui::StyleType::Title),
        table
    )
}

pub fn weightings_table(index_name: &str, weightings: &[CompanyWeighting]) -> String {
    if weightings.is_empty() {
        return format!("{index_name}\n\nNo data found.");
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Company"),
        ui::header_cell("Weighting"),
    ]);
    for row in weightings {
        table.add_row(vec![
            Cell::new(&row.company),
            ui::numeric_cell(format!("{:.4}", row.weighting)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(index_name, ui::StyleType::Title),
        table
    )
}

pub fn sectors_table(index_name: &str, weightings: &[SectorWeighting]) -> String {
    if weightings.is_empty() {
        return format!("{index_name}\n\nNo data found.");
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Sector"), ui::header_cell("Weighting")]);
    for row in weightings {
        table.add_row(vec![
            Cell::new(&row.sector),
            ui::numeric_cell(format!("{:.4}", row.weighting)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text(index_name, ui::StyleType::Title),
        table
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::PricePoint;

    #[test]
    fn test_history_table_lists_each_bar() {
        let series = vec![PricePoint {
            date: "2021/08/02".to_string(),
            open: 760.1,
            high: 765.2,
            low: 758.0,
            close: 764.3,
        }];
        let output = history_table("AEX", &series);
        assert!(output.contains("2021/08/02"));
        assert!(output.contains("764.30"));
    }

    #[test]
    fn test_empty_results_render_placeholder() {
        let output = history_table("AEX", &Vec::new());
        assert!(output.contains("No data found."));

        let output = sectors_table("AEX", &[]);
        assert!(output.contains("No data found."));
    }

    #[test]
    fn test_weightings_table_lists_companies() {
        let weightings = vec![CompanyWeighting {
            company: "Acme".to_string(),
            weighting: 0.35,
        }];
        let output = weightings_table("AEX", &weightings);
        assert!(output.contains("Acme"));
        assert!(output.contains("0.3500"));
    }
}
