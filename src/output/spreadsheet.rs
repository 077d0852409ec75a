//! Excel workbook export

use crate::output::traits::{ExportContext, ExportError, ExportResult, Renderer, TABLE_HEADERS};
use crate::results::FinalizedResults;
use rust_xlsxwriter::{Format, Workbook};

/// Writes a `Results` sheet (one row per item) and a `Summary` sheet
pub struct SpreadsheetRenderer;

impl Renderer for SpreadsheetRenderer {
    fn render(&self, results: &FinalizedResults, context: &ExportContext) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name("Results")?;
        for (col, header) in (0u16..).zip(TABLE_HEADERS) {
            sheet.write_string_with_format(0, col, header, &bold)?;
        }
        for (index, item) in results.iter().enumerate() {
            let row = u32::try_from(index + 1)
                .map_err(|_| ExportError::Format("too many rows for a worksheet".to_string()))?;
            sheet.write_string(row, 0, item.kind().to_string())?;
            sheet.write_string(row, 1, item.text())?;
            if let Some(url) = item.url() {
                sheet.write_string(row, 2, url)?;
            }
        }

        let summary = workbook.add_worksheet();
        summary.set_name("Summary")?;
        for (row, (label, value)) in (0u32..).zip(context.stats.labelled()) {
            summary.write_string_with_format(row, 0, label, &bold)?;
            summary.write_number(row, 1, value as f64)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}
