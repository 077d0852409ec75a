//! Plain-text export: a statistics header followed by a grid table
//!
//! ```text
//! +---------+-------+--------------------+
//! | kind    | text  | url                |
//! +=========+=======+====================+
//! | Link    | Home  | http://a.test/     |
//! +---------+-------+--------------------+
//! ```
//!
//! Cells containing newlines span several physical rows.

use crate::output::traits::{ExportContext, ExportResult, Renderer, DOCUMENT_TITLE, TABLE_HEADERS};
use crate::results::FinalizedResults;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, results: &FinalizedResults, context: &ExportContext) -> ExportResult<Vec<u8>> {
        let mut out = String::new();

        out.push_str(DOCUMENT_TITLE);
        out.push('\n');
        out.push_str(&"=".repeat(DOCUMENT_TITLE.chars().count()));
        out.push('\n');
        out.push_str(&format!(
            "Generated: {}\n",
            context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        for (label, value) in context.stats.labelled() {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        out.push('\n');

        let rows: Vec<[String; 3]> = results
            .iter()
            .map(|item| {
                [
                    item.kind().to_string(),
                    item.text().to_string(),
                    item.url().unwrap_or_default().to_string(),
                ]
            })
            .collect();
        let header = TABLE_HEADERS.map(str::to_string);
        out.push_str(&grid_table(&header, &rows));

        Ok(out.into_bytes())
    }
}

fn grid_table(header: &[String; 3], rows: &[[String; 3]]) -> String {
    let mut widths = [0usize; 3];
    for row in std::iter::once(header).chain(rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            let cell_width = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            *width = (*width).max(cell_width);
        }
    }

    let mut table = String::new();
    table.push_str(&rule(&widths, '-'));
    table.push_str(&table_row(header, &widths));
    table.push_str(&rule(&widths, '='));
    for row in rows {
        table.push_str(&table_row(row, &widths));
        table.push_str(&rule(&widths, '-'));
    }
    table
}

fn rule(widths: &[usize; 3], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn table_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut out = String::new();
    for line_index in 0..height {
        out.push('|');
        for (lines, width) in split.iter().zip(widths) {
            let segment = lines.get(line_index).copied().unwrap_or("");
            let pad = width - segment.chars().count();
            out.push(' ');
            out.push_str(segment);
            out.extend(std::iter::repeat(' ').take(pad + 1));
            out.push('|');
        }
        out.push('\n');
    }
    out
}
