//! HTML document export
//!
//! The document is a summary block with the four statistics followed by one
//! card per item. Link items render as clickable anchors.

use crate::output::traits::{ExportContext, ExportResult, Renderer, DOCUMENT_TITLE};
use crate::results::FinalizedResults;

const STYLE: &str = r#"        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            margin: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .summary { display: flex; gap: 24px; justify-content: center; }
        .item { border-bottom: 1px solid #eee; padding: 15px 0; }
        .type { color: #666; font-size: 0.9em; }
        .text { margin: 10px 0; }
        .url { color: #0066cc; word-break: break-all; }
        h1 { color: #333; text-align: center; }
"#;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, results: &FinalizedResults, context: &ExportContext) -> ExportResult<Vec<u8>> {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(&format!("    <title>{}</title>\n", DOCUMENT_TITLE));
        html.push_str("    <style>\n");
        html.push_str(STYLE);
        html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
        html.push_str(&format!("        <h1>{}</h1>\n", DOCUMENT_TITLE));
        html.push_str(&format!(
            "        <p class=\"type\">Generated {}</p>\n",
            context.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        html.push_str("        <ul class=\"summary\">\n");
        for (label, value) in context.stats.labelled() {
            html.push_str(&format!(
                "            <li>{}: <strong>{}</strong></li>\n",
                label, value
            ));
        }
        html.push_str("        </ul>\n");

        for item in results {
            html.push_str("        <div class=\"item\">\n");
            html.push_str(&format!(
                "            <div class=\"type\">{}</div>\n",
                escape_html(&item.kind().to_string())
            ));
            html.push_str(&format!(
                "            <div class=\"text\">{}</div>\n",
                escape_html(item.text())
            ));
            if let Some(url) = item.url() {
                let url = escape_html(url);
                html.push_str(&format!(
                    "            <a href=\"{}\" class=\"url\">{}</a>\n",
                    url, url
                ));
            }
            html.push_str("        </div>\n");
        }

        html.push_str("    </div>\n</body>\n</html>\n");
        Ok(html.into_bytes())
    }
}

/// Escapes text for use in element content and double-quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
