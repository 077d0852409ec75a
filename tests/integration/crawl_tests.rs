//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! HTTP fetcher through the full fetch → extract → filter → export cycle.

use std::sync::Arc;
use web_scraper::config::{load_settings, save_settings, Settings};
use web_scraper::crawler::{
    run_crawl, CrawlEvent, FetchError, Fetcher, HttpFetcher, DEFAULT_USER_AGENT,
};
use web_scraper::output::{export_to_path, ResultStats};
use web_scraper::{CrawlController, CrawlRequest, CrawlStatus, ExportFormat, ItemKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Arc<dyn Fetcher> {
    Arc::new(HttpFetcher::with_user_agent(DEFAULT_USER_AGENT).expect("Failed to build client"))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_page_extraction_at_depth_one() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<h1>Welcome</h1><p>Hello there</p>
           <a href="/a">A</a><a href="/b">B</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "<p>never</p>", 0).await;
    mount_page(&server, "/b", "<p>never</p>", 0).await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(
        report.results.stats(),
        ResultStats {
            total: 4,
            links: 2,
            headings: 1,
            paragraphs: 1,
        }
    );

    let link_urls: Vec<_> = report.results.iter().filter_map(|i| i.url()).collect();
    assert_eq!(
        link_urls,
        vec![
            format!("{}/a", server.uri()),
            format!("{}/b", server.uri())
        ]
    );
}

#[tokio::test]
async fn test_depth_two_follows_links_in_document_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#, 1).await;
    mount_page(&server, "/a", r#"<h2>Page A</h2><a href="/deep">deep</a>"#, 1).await;
    mount_page(&server, "/b", "<h2>Page B</h2>", 1).await;
    mount_page(&server, "/deep", "<h2>Too deep</h2>", 0).await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .max_depth(2)
        .extract_links(false)
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.pages_fetched, 3);

    let headings: Vec<_> = report.results.iter().map(|i| i.text().to_string()).collect();
    assert_eq!(headings, vec!["Page A", "Page B"]);
    assert!(report
        .results
        .iter()
        .all(|i| i.kind() == ItemKind::Heading(2)));
}

#[tokio::test]
async fn test_self_link_is_fetched_once() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<a href="/">self</a><a href="/a">A</a>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/">home</a><p>A</p>"#, 1).await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .max_depth(5)
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.pages_fetched, 2);
}

#[tokio::test]
async fn test_failing_child_does_not_stop_crawl() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<a href="/missing">gone</a><a href="/ok">ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "<p>still here</p>", 1).await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .max_depth(2)
        .extract_links(false)
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert_eq!(report.status, CrawlStatus::Completed);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, format!("{}/missing", server.uri()));
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results.items()[0].text(), "still here");
}

#[tokio::test]
async fn test_seed_failure_fails_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .max_depth(3)
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert!(matches!(report.status, CrawlStatus::Failed(_)));
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn test_non_html_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/data.json", server.uri())).unwrap();
    let result = fetcher().fetch(&url).await;
    assert!(matches!(result, Err(FetchError::NotHtml { .. })));
}

#[tokio::test]
async fn test_plain_text_seed_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<h1>Notes</h1><p>served as plain text</p>")
                .insert_header("content-type", "text/plain; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = CrawlRequest::builder(format!("{}/notes.txt", server.uri()))
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    assert_eq!(report.status, CrawlStatus::Completed);
    let texts: Vec<_> = report.results.iter().map(|i| i.text()).collect();
    assert_eq!(texts, vec!["Notes", "served as plain text"]);
}

#[tokio::test]
async fn test_filters_apply_to_crawled_pages() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<p>Buy ADS now</p><p>ok</p><p>A real paragraph</p>",
        1,
    )
    .await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .min_text_length(3)
        .exclude_pattern("ads")
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;

    let texts: Vec<_> = report.results.iter().map(|i| i.text()).collect();
    assert_eq!(texts, vec!["A real paragraph"]);
}

#[tokio::test]
async fn test_controller_streams_events() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<p>root</p><a href="/missing">x</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let controller = CrawlController::new(fetcher());
    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .max_depth(2)
        .build()
        .unwrap();
    let mut handle = controller.start(request).unwrap();

    let mut completed = 0;
    let mut failed = 0;
    let mut finished = None;
    while let Some(event) = handle.next_event().await {
        match event {
            CrawlEvent::PageCompleted { .. } => completed += 1,
            CrawlEvent::PageFailed { .. } => failed += 1,
            CrawlEvent::Finished(status) => finished = Some(status),
        }
    }

    assert_eq!(completed, 1);
    assert_eq!(failed, 1);
    assert_eq!(finished, Some(CrawlStatus::Completed));

    let report = handle.finish().await.unwrap();
    assert_eq!(report.results.len(), 2);
    assert!(!controller.is_active());
}

#[tokio::test]
async fn test_crawl_then_export_every_format() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<h1>Title</h1><p>Body text</p><a href="/next">Next</a>"#,
        1,
    )
    .await;

    let request = CrawlRequest::builder(format!("{}/", server.uri()))
        .build()
        .unwrap();
    let report = run_crawl(request, fetcher()).await;
    let expected = report.results.stats();

    let dir = tempfile::tempdir().unwrap();
    for format in ExportFormat::ALL {
        let path = dir.path().join(format!("results.{}", format.extension()));
        let summary = export_to_path(&report.results, format, &path).unwrap();
        assert_eq!(summary.stats, expected);
        assert_eq!(
            std::fs::metadata(&path).unwrap().len() as usize,
            summary.bytes_written
        );
    }

    let json = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["type"], "Link");
    assert_eq!(records[1]["type"], "Heading (h1)");
    assert_eq!(records[2]["url"], serde_json::Value::Null);

    let workbook = std::fs::read(dir.path().join("results.xlsx")).unwrap();
    let strings = xlsx_part(&workbook, "xl/sharedStrings.xml");
    let next_url = format!("{}/next", server.uri());
    for text in ["Link", "Next", next_url.as_str(), "Title", "Body text", "Total items"] {
        assert!(strings.contains(&format!(">{}</t>", text)), "missing {}", text);
    }
    let summary = xlsx_part(&workbook, "xl/worksheets/sheet2.xml");
    let total = regex::Regex::new(r#"<c r="B1"[^>]*><v>([^<]*)</v>"#)
        .unwrap()
        .captures(&summary)
        .map(|c| c[1].to_string());
    assert_eq!(total, Some(expected.total.to_string()));
}

fn xlsx_part(bytes: &[u8], name: &str) -> String {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut part = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut part)
        .unwrap();
    part
}

#[tokio::test]
async fn test_settings_drive_a_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<h1>From settings</h1><p>skip me</p>", 1).await;

    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.toml");
    let settings = Settings {
        last_url: format!("{}/", server.uri()),
        extract_text: false,
        ..Settings::default()
    };
    save_settings(&settings_path, &settings).unwrap();

    let loaded = load_settings(&settings_path).unwrap();
    let report = run_crawl(loaded.to_request().unwrap(), fetcher()).await;

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results.items()[0].text(), "From settings");
}
