//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The fetch capability and its HTTP implementation
//! - HTML extraction of links, headings and paragraphs
//! - The filter stage applied to each page's items
//! - Depth-first scheduling with a per-crawl visited set
//! - Overall crawl coordination and the background worker

mod controller;
mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod request;
mod scheduler;

pub use controller::{CrawlController, CrawlHandle};
pub use coordinator::{run_crawl, Coordinator, CrawlEvent, CrawlReport, CrawlStatus, PageFailure};
pub use fetcher::{
    build_http_client, is_parseable_content_type, FetchError, FetchedPage, Fetcher, HttpFetcher,
    DEFAULT_USER_AGENT,
};
pub use filter::{compile_exclude_pattern, parse_min_text_length, ItemFilter};
pub use parser::{parse_page, ExtractionOptions, ParsedPage};
pub use request::{CrawlRequest, CrawlRequestBuilder};
pub use scheduler::{Frontier, Visit};
