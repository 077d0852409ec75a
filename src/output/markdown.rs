//! Markdown export
//!
//! This module renders the results as a markdown outline: statistics first,
//! then one heading per item with its text, a reference link for link
//! items, and a horizontal rule between blocks.

use crate::output::traits::{ExportContext, ExportResult, Renderer, DOCUMENT_TITLE};
use crate::results::FinalizedResults;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, results: &FinalizedResults, context: &ExportContext) -> ExportResult<Vec<u8>> {
        Ok(format_markdown(results, context).into_bytes())
    }
}

/// Formats the results as a markdown string
pub fn format_markdown(results: &FinalizedResults, context: &ExportContext) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", DOCUMENT_TITLE));
    md.push_str(&format!(
        "_Generated {}_\n\n",
        context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for (label, value) in context.stats.labelled() {
        md.push_str(&format!("- **{}**: {}\n", label, value));
    }
    md.push('\n');

    for item in results {
        md.push_str(&format!("## {}\n\n", item.kind()));
        md.push_str(&format!("{}\n\n", item.text()));
        if let Some(url) = item.url() {
            md.push_str(&format!("[Link]({})\n\n", url));
        }
        md.push_str("---\n\n");
    }

    md
}
