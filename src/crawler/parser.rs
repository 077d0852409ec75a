//! HTML extraction stage
//!
//! This module turns a page body into:
//! - Extracted items (links, headings h1-h3, paragraphs) per enabled toggle
//! - The list of resolvable hrefs to follow, independent of the toggles

use crate::results::ExtractedItem;
use crate::url::resolve_url;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Which extractors run for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub links: bool,
    pub headings: bool,
    pub text: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            links: true,
            headings: true,
            text: true,
        }
    }
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Items in extraction order: links, then h1, h2, h3, then paragraphs
    pub items: Vec<ExtractedItem>,

    /// Every resolvable href on the page, in document order
    pub links: Vec<Url>,
}

/// Parses HTML content and runs the enabled extractors
///
/// # Extraction Rules
///
/// - `<a>` without an href (or with an empty one) is skipped
/// - hrefs that do not resolve to http/https are skipped
/// - headings are emitted even when their text is empty
/// - whitespace-only paragraphs are skipped
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `options` - Which extractors to run
///
/// # Example
///
/// ```
/// use web_scraper::crawler::{parse_page, ExtractionOptions};
/// use url::Url;
///
/// let html = r#"<html><body><h1>Title</h1><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &base_url, &ExtractionOptions::default());
/// assert_eq!(parsed.items.len(), 2);
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_page(html: &str, base_url: &Url, options: &ExtractionOptions) -> ParsedPage {
    let document = Html::parse_document(html);

    let anchors = extract_anchors(&document, base_url);

    let mut items = Vec::new();
    if options.links {
        items.extend(
            anchors
                .iter()
                .map(|(text, url)| ExtractedItem::link(text.clone(), url.as_str())),
        );
    }
    if options.headings {
        items.extend(extract_headings(&document));
    }
    if options.text {
        items.extend(extract_paragraphs(&document));
    }

    ParsedPage {
        items,
        links: anchors.into_iter().map(|(_, url)| url).collect(),
    }
}

/// Extracts `(visible text, resolved url)` for every anchor with a usable href
fn extract_anchors(document: &Html, base_url: &Url) -> Vec<(String, Url)> {
    let mut anchors = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let href = match element.value().attr("href") {
                Some(href) if !href.trim().is_empty() => href,
                _ => continue,
            };

            match resolve_url(href, base_url) {
                Ok(url) => anchors.push((element_text(&element), url)),
                Err(e) => tracing::trace!("Skipping href {:?}: {}", href, e),
            }
        }
    }

    anchors
}

/// Extracts h1, then h2, then h3 headings
fn extract_headings(document: &Html) -> Vec<ExtractedItem> {
    let mut headings = Vec::new();

    for level in 1..=3u8 {
        let Ok(selector) = Selector::parse(&format!("h{}", level)) else {
            continue;
        };
        headings.extend(
            document
                .select(&selector)
                .map(|element| ExtractedItem::heading(level, element_text(&element))),
        );
    }

    headings
}

/// Extracts all paragraphs with non-whitespace text
fn extract_paragraphs(document: &Html) -> Vec<ExtractedItem> {
    let Ok(p_selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&p_selector)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .map(ExtractedItem::paragraph)
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
