//! CSV export with a UTF-8 byte-order mark

use crate::output::traits::{ExportContext, ExportResult, Renderer, TABLE_HEADERS};
use crate::results::FinalizedResults;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct DelimitedRenderer;

impl Renderer for DelimitedRenderer {
    fn render(&self, results: &FinalizedResults, _context: &ExportContext) -> ExportResult<Vec<u8>> {
        let mut buffer = UTF8_BOM.to_vec();

        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer.write_record(TABLE_HEADERS)?;
            for item in results {
                let kind = item.kind().to_string();
                writer.write_record([kind.as_str(), item.text(), item.url().unwrap_or("")])?;
            }
            writer.flush()?;
        }

        Ok(buffer)
    }
}
