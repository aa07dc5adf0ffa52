//! Table rendering for CLI output

use chrono::Local;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

const PASS_ICON: &str = "✅";
const FAIL_ICON: &str = "❌";

/// Outcome of one suite scenario, for display and JSON reports
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRow {
    pub name: String,
    pub template: String,
    pub namespace: String,
    pub resource: String,
    pub passed: bool,
    pub detail: String,
}

/// Table renderer for formatted output
pub struct TableRenderer;

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the suite outcome as a formatted table with a summary line
    pub fn render_suite_report(&self, chart: &str, rows: &[ScenarioRow]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("SCENARIO").set_alignment(CellAlignment::Left),
                Cell::new("TEMPLATE").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("RESOURCE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for row in rows {
            let (icon, status, color) = if row.passed {
                (PASS_ICON, "Pass", Color::Green)
            } else {
                (FAIL_ICON, "Fail", Color::Red)
            };

            table.add_row(vec![
                Cell::new(&row.name),
                Cell::new(&row.template),
                Cell::new(&row.namespace),
                Cell::new(&row.resource),
                Cell::new(format!("{icon} {status}")).fg(color),
            ]);
        }

        let passed = rows.iter().filter(|row| row.passed).count();
        let summary = if passed == rows.len() {
            format!("{passed}/{} scenarios passed", rows.len())
                .green()
                .to_string()
        } else {
            format!("{passed}/{} scenarios passed", rows.len())
                .red()
                .to_string()
        };

        let mut output = String::new();
        output.push_str(&format!(
            "Chart: {chart}  ({})\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&format!("{table}\n"));
        output.push_str(&summary);

        for row in rows.iter().filter(|row| !row.passed) {
            output.push_str(&format!("\n\n{}: {}", row.name.red(), row.detail));
        }

        output
    }
}
