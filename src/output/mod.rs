//! Output module for exporting finalized crawl results
//!
//! This module handles:
//! - Selecting a renderer for each of the six export formats
//! - Computing the result statistics once per export
//! - Writing rendered output to a file or any other sink

mod delimited;
mod html;
mod json;
mod markdown;
mod spreadsheet;
pub mod stats;
mod text;
mod traits;

pub use delimited::DelimitedRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::{format_markdown, MarkdownRenderer};
pub use spreadsheet::SpreadsheetRenderer;
pub use stats::ResultStats;
pub use text::TextRenderer;
pub use traits::{
    ExportContext, ExportError, ExportFormat, ExportResult, ExportSummary, Renderer,
    DOCUMENT_TITLE, TABLE_HEADERS,
};

use crate::results::FinalizedResults;
use std::io::Write;
use std::path::Path;

/// Returns the renderer for a format
pub fn renderer_for(format: ExportFormat) -> Box<dyn Renderer> {
    match format {
        ExportFormat::Xlsx => Box::new(SpreadsheetRenderer),
        ExportFormat::Csv => Box::new(DelimitedRenderer),
        ExportFormat::Json => Box::new(JsonRenderer),
        ExportFormat::Html => Box::new(HtmlRenderer),
        ExportFormat::Markdown => Box::new(MarkdownRenderer),
        ExportFormat::Text => Box::new(TextRenderer),
    }
}

/// Renders the results in memory without writing them anywhere
pub fn render_export(
    results: &FinalizedResults,
    format: ExportFormat,
) -> ExportResult<(Vec<u8>, ExportSummary)> {
    let context = ExportContext {
        stats: results.stats(),
        generated_at: chrono::Utc::now(),
    };

    let bytes = renderer_for(format).render(results, &context)?;
    let summary = ExportSummary {
        format,
        stats: context.stats,
        bytes_written: bytes.len(),
    };

    Ok((bytes, summary))
}

/// Renders the results and writes them to `sink`
pub fn write_export<W: Write>(
    results: &FinalizedResults,
    format: ExportFormat,
    sink: &mut W,
) -> ExportResult<ExportSummary> {
    let (bytes, summary) = render_export(results, format)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(summary)
}

/// Exports the results to a file
///
/// The output is fully rendered before the file is created, so a rendering
/// failure never leaves a truncated file behind.
///
/// # Arguments
///
/// * `results` - The finalized results to export
/// * `format` - The output format
/// * `path` - Destination file, overwritten if it exists
///
/// # Returns
///
/// * `Ok(ExportSummary)` - Statistics and byte count of the written file
/// * `Err(ExportError)` - Rendering or writing failed
pub fn export_to_path(
    results: &FinalizedResults,
    format: ExportFormat,
    path: &Path,
) -> ExportResult<ExportSummary> {
    let (bytes, summary) = render_export(results, format)?;
    std::fs::write(path, &bytes)?;

    tracing::info!(
        "Exported {} items as {} to {}",
        summary.stats.total,
        format,
        path.display()
    );

    Ok(summary)
}
