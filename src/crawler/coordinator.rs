//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that, for each URL taken from the
//! frontier, runs fetch → extract → filter → accumulate and schedules the
//! page's links while depth remains. Failures of non-seed pages are recorded
//! and reported without interrupting the traversal; a seed failure is fatal.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_page;
use crate::crawler::request::CrawlRequest;
use crate::crawler::scheduler::Frontier;
use crate::results::{ExtractedItem, FinalizedResults, ResultSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Terminal status of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStatus {
    /// The frontier was exhausted
    Completed,
    /// The seed page could not be fetched
    Failed(String),
    /// The crawl was cancelled between two pages
    Cancelled,
}

/// Notification sent from the crawl worker to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A page was fetched; `items` is the batch just merged into the results
    PageCompleted {
        url: String,
        items: Vec<ExtractedItem>,
    },

    /// A page could not be fetched
    PageFailed { url: String, reason: String },

    /// The crawl ended; no further events follow
    Finished(CrawlStatus),
}

/// A page-scoped failure recorded during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub reason: String,
}

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub status: CrawlStatus,
    pub results: FinalizedResults,
    /// Number of fetch attempts, successful or not
    pub pages_fetched: usize,
    pub failures: Vec<PageFailure>,
}

/// Runs one crawl from a [`CrawlRequest`]
pub struct Coordinator {
    request: CrawlRequest,
    fetcher: Arc<dyn Fetcher>,
    events: Option<UnboundedSender<CrawlEvent>>,
    cancelled: Arc<AtomicBool>,
}

impl Coordinator {
    pub fn new(request: CrawlRequest, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            request,
            fetcher,
            events: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sends page batches and page failures to `sender`
    pub fn with_events(mut self, sender: UnboundedSender<CrawlEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Checks `flag` before every visit and stops once it is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Runs the crawl loop until the frontier is empty, the seed fails, or
    /// the crawl is cancelled
    ///
    /// The result set is always finalized and returned, whatever the status.
    pub async fn run(self) -> CrawlReport {
        let seed = self.request.seed_url().clone();
        let seed_key = seed.as_str().to_string();
        let mut frontier = Frontier::new(seed, self.request.max_depth());
        let mut results = ResultSet::new();
        let mut failures = Vec::new();
        let mut pages_fetched = 0;
        let start_time = std::time::Instant::now();

        tracing::info!(
            "Starting crawl of {} (max depth {})",
            seed_key,
            self.request.max_depth()
        );

        let status = loop {
            if self.cancelled.load(Ordering::SeqCst) {
                tracing::info!("Crawl cancelled with {} pages pending", frontier.pending());
                break CrawlStatus::Cancelled;
            }

            let Some(visit) = frontier.next_visit() else {
                break CrawlStatus::Completed;
            };
            let url_str = visit.url.to_string();
            tracing::debug!(
                "Processing URL: {} (depth remaining {})",
                url_str,
                visit.depth_remaining
            );

            pages_fetched += 1;
            let page = match self.fetcher.fetch(&visit.url).await {
                Ok(page) => page,
                Err(e) => {
                    let reason = e.to_string();
                    failures.push(PageFailure {
                        url: url_str.clone(),
                        reason: reason.clone(),
                    });
                    self.notify(CrawlEvent::PageFailed {
                        url: url_str.clone(),
                        reason: reason.clone(),
                    });

                    if url_str == seed_key {
                        tracing::error!("Seed page failed, aborting crawl: {}", reason);
                        break CrawlStatus::Failed(reason);
                    }
                    tracing::warn!("Skipping {}: {}", url_str, reason);
                    continue;
                }
            };

            let parsed = parse_page(&page.body, &page.url, self.request.extraction());
            let batch = self.request.filter().apply(parsed.items);
            let appended = results.append_page(batch.clone());
            self.notify(CrawlEvent::PageCompleted {
                url: url_str,
                items: batch,
            });

            let scheduled = if visit.depth_remaining > 1 {
                frontier.schedule_children(parsed.links, visit.depth_remaining - 1)
            } else {
                0
            };
            tracing::debug!("{} items kept, {} links scheduled", appended, scheduled);
        };

        tracing::info!(
            "Crawl finished ({:?}): {} pages fetched, {} failed, {} items in {:?}",
            status,
            pages_fetched,
            failures.len(),
            results.len(),
            start_time.elapsed()
        );

        CrawlReport {
            status,
            results: results.finalize(),
            pages_fetched,
            failures,
        }
    }

    fn notify(&self, event: CrawlEvent) {
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                tracing::debug!("Progress receiver dropped; event discarded");
            }
        }
    }
}

/// Runs a crawl to completion without progress notifications
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use web_scraper::crawler::{run_crawl, HttpFetcher, DEFAULT_USER_AGENT};
/// use web_scraper::CrawlRequest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = CrawlRequest::builder("https://example.com/").max_depth(2).build()?;
/// let fetcher = Arc::new(HttpFetcher::with_user_agent(DEFAULT_USER_AGENT)?);
/// let report = run_crawl(request, fetcher).await;
/// println!("{} items", report.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(request: CrawlRequest, fetcher: Arc<dyn Fetcher>) -> CrawlReport {
    Coordinator::new(request, fetcher).run().await
}
