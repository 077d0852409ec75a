//! Crawl worker lifecycle
//!
//! A [`CrawlController`] runs at most one crawl at a time on a tokio task.
//! The caller gets a [`CrawlHandle`] that streams [`CrawlEvent`]s over an
//! unbounded channel and yields the final [`CrawlReport`].

use crate::crawler::coordinator::{Coordinator, CrawlEvent, CrawlReport};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::request::CrawlRequest;
use crate::ScraperError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Starts crawls and rejects overlapping ones
pub struct CrawlController {
    fetcher: Arc<dyn Fetcher>,
    active: Arc<AtomicBool>,
}

impl CrawlController {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns true while a started crawl has not yet finished
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Spawns a crawl on the current tokio runtime
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlHandle)` - The crawl is running
    /// * `Err(ScraperError::CrawlInProgress)` - Another crawl is still active;
    ///   the request is dropped, not queued
    pub fn start(&self, request: CrawlRequest) -> Result<CrawlHandle, ScraperError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Rejected crawl of {}: a crawl is already running", request.seed_url());
            return Err(ScraperError::CrawlInProgress);
        }

        let guard = ActiveGuard(self.active.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));

        let coordinator = Coordinator::new(request, self.fetcher.clone())
            .with_events(tx.clone())
            .with_cancel_flag(cancelled.clone());

        let task = tokio::spawn(async move {
            let report = coordinator.run().await;
            // Released before Finished so the caller can start again right away
            drop(guard);
            let _ = tx.send(CrawlEvent::Finished(report.status.clone()));
            report
        });

        Ok(CrawlHandle {
            events: rx,
            cancelled,
            task,
        })
    }
}

/// Clears the controller's active flag even if the worker panics
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Caller-side end of a running crawl
pub struct CrawlHandle {
    events: mpsc::UnboundedReceiver<CrawlEvent>,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<CrawlReport>,
}

impl CrawlHandle {
    /// Waits for the next progress event; `None` once the worker is gone
    pub async fn next_event(&mut self) -> Option<CrawlEvent> {
        self.events.recv().await
    }

    /// Asks the worker to stop before its next page
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Waits for the worker and returns its report
    pub async fn finish(self) -> Result<CrawlReport, ScraperError> {
        self.task
            .await
            .map_err(|e| ScraperError::Worker(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::coordinator::CrawlStatus;
    use crate::crawler::fetcher::{FetchError, FetchedPage};
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use url::Url;

    /// Serves the same page for every URL, optionally waiting for a release
    struct GatedFetcher {
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl Fetcher for GatedFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(FetchedPage {
                url: url.clone(),
                body: "<h1>Title</h1><p>Body text</p>".to_string(),
            })
        }
    }

    fn request() -> CrawlRequest {
        CrawlRequest::builder("http://seed-host/").build().unwrap()
    }

    #[tokio::test]
    async fn test_events_end_with_finished() {
        let controller = CrawlController::new(Arc::new(GatedFetcher { gate: None }));
        let mut handle = controller.start(request()).unwrap();

        let mut events = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }

        assert!(matches!(events[0], CrawlEvent::PageCompleted { .. }));
        assert_eq!(
            events.last(),
            Some(&CrawlEvent::Finished(CrawlStatus::Completed))
        );

        let report = handle.finish().await.unwrap();
        assert_eq!(report.results.len(), 2);
        assert!(!controller.is_active());
    }

    #[tokio::test]
    async fn test_second_start_rejected_while_active() {
        let gate = Arc::new(Notify::new());
        let controller = CrawlController::new(Arc::new(GatedFetcher {
            gate: Some(gate.clone()),
        }));

        let handle = controller.start(request()).unwrap();
        assert!(controller.is_active());
        assert!(matches!(
            controller.start(request()),
            Err(ScraperError::CrawlInProgress)
        ));

        gate.notify_one();
        let report = handle.finish().await.unwrap();
        assert_eq!(report.status, CrawlStatus::Completed);

        assert!(!controller.is_active());
        gate.notify_one();
        let again = controller.start(request()).unwrap();
        assert!(again.finish().await.is_ok());
    }

    /// Serves an endless chain `/` -> `/p1` -> `/p2` ..., one page per release
    struct ChainFetcher {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl Fetcher for ChainFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            self.gate.notified().await;
            let index: u32 = url
                .path()
                .trim_start_matches("/p")
                .trim_start_matches('/')
                .parse()
                .unwrap_or(0);
            Ok(FetchedPage {
                url: url.clone(),
                body: format!(
                    r#"<h1>page {}</h1><a href="/p{}">next</a>"#,
                    index,
                    index + 1
                ),
            })
        }
    }

    #[tokio::test]
    async fn test_cancel_keeps_completed_pages() {
        let gate = Arc::new(Notify::new());
        let controller = CrawlController::new(Arc::new(ChainFetcher { gate: gate.clone() }));
        let request = CrawlRequest::builder("http://seed-host/")
            .max_depth(10)
            .build()
            .unwrap();

        let mut handle = controller.start(request).unwrap();
        gate.notify_one();

        let first_page = match handle.next_event().await {
            Some(CrawlEvent::PageCompleted { items, .. }) => items,
            other => panic!("expected the seed page first, got {:?}", other),
        };
        handle.cancel();
        // Lets a fetch that was already waiting finish
        gate.notify_one();

        let mut last = None;
        while let Some(event) = handle.next_event().await {
            last = Some(event);
        }
        assert_eq!(last, Some(CrawlEvent::Finished(CrawlStatus::Cancelled)));

        let report = handle.finish().await.unwrap();
        assert_eq!(report.status, CrawlStatus::Cancelled);
        assert!(report.pages_fetched >= 1 && report.pages_fetched < 10);
        assert_eq!(report.results.len(), report.pages_fetched * 2);
        assert_eq!(&report.results.items()[..first_page.len()], &first_page[..]);
        assert_eq!(first_page[1].text(), "page 0");
        assert!(!controller.is_active());
    }
}
