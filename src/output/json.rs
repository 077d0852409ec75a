//! JSON export of the ordered item records

use crate::output::traits::{ExportContext, ExportResult, Renderer};
use crate::results::FinalizedResults;

/// Serializes the items verbatim with two-space indentation
///
/// Non-ASCII text is written as UTF-8, not as `\u` escapes.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, results: &FinalizedResults, _context: &ExportContext) -> ExportResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(results.items())?)
    }
}
