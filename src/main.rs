//! Web Scraper main entry point
//!
//! This is the command-line interface for the web scraper.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_scraper::config::{load_settings, save_settings, Settings, DEFAULT_SETTINGS_FILE};
use web_scraper::crawler::{CrawlEvent, CrawlHandle, CrawlReport, HttpFetcher, DEFAULT_USER_AGENT};
use web_scraper::output::export_to_path;
use web_scraper::{CrawlController, CrawlStatus, ExportFormat, ExtractedItem};

/// Web Scraper: extract links, headings and paragraphs from a site
///
/// Fetches the seed page, optionally follows links up to the given depth,
/// prints every extracted item, and exports the results on request.
/// Options left out fall back to the values saved by the previous run.
#[derive(Parser, Debug)]
#[command(name = "web-scraper")]
#[command(version)]
#[command(about = "Structured content extraction with bounded recursive crawling", long_about = None)]
struct Cli {
    /// Seed URL; `https://` is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Crawl depth (1 = seed page only)
    #[arg(short, long, value_name = "DEPTH")]
    depth: Option<u32>,

    /// Extract links
    #[arg(long, overrides_with = "no_links")]
    links: bool,

    /// Do not extract links (they are still followed)
    #[arg(long, overrides_with = "links")]
    no_links: bool,

    /// Extract headings
    #[arg(long, overrides_with = "no_headings")]
    headings: bool,

    /// Do not extract headings
    #[arg(long, overrides_with = "headings")]
    no_headings: bool,

    /// Extract paragraphs
    #[arg(long, overrides_with = "no_text")]
    text: bool,

    /// Do not extract paragraphs
    #[arg(long, overrides_with = "text")]
    no_text: bool,

    /// Minimum text length; non-numeric values mean no minimum
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    min_length: Option<String>,

    /// Case-insensitive regex; matching items are dropped ("" clears it)
    #[arg(long, value_name = "REGEX")]
    exclude: Option<String>,

    /// Export format: xlsx, csv, json, html, md or txt
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<ExportFormat>,

    /// Export destination; the format is inferred from its extension
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Settings file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Switch between the dark and light theme and save the choice
    #[arg(long)]
    toggle_theme: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut settings = load_settings(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    if cli.toggle_theme {
        settings.theme = settings.theme.toggle();
        save_settings(&cli.settings, &settings)?;
        println!("Theme set to {}", settings.theme);
        if cli.url.is_none() {
            return Ok(());
        }
    }

    apply_overrides(&cli, &mut settings);
    let export = resolve_export(cli.format, cli.output.as_deref())?;

    let request = settings.to_request()?;
    tracing::info!(
        "Crawling {} (depth {})",
        request.seed_url(),
        request.max_depth()
    );

    let fetcher = HttpFetcher::with_user_agent(DEFAULT_USER_AGENT)?;
    let controller = CrawlController::new(Arc::new(fetcher));
    let handle = controller.start(request)?;
    let report = drive_crawl(handle).await?;

    save_settings(&cli.settings, &settings)?;

    match &report.status {
        CrawlStatus::Completed => {}
        CrawlStatus::Cancelled => tracing::warn!("Crawl cancelled, keeping partial results"),
        CrawlStatus::Failed(reason) => bail!("Crawl failed: {}", reason),
    }

    print_report(&report);

    if report.results.is_empty() {
        println!("No data found");
        return Ok(());
    }

    if let Some((format, path)) = export {
        let summary = export_to_path(&report.results, format, &path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!(
            "✓ Saved {} items ({} bytes) to {}",
            summary.stats.total,
            summary.bytes_written,
            path.display()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_scraper=info,warn"),
            1 => EnvFilter::new("web_scraper=debug,info"),
            2 => EnvFilter::new("web_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Folds command-line arguments over the saved settings
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(url) = &cli.url {
        settings.last_url = url.trim().to_string();
    }
    if let Some(depth) = cli.depth {
        settings.depth = depth;
    }
    if let Some(raw) = &cli.min_length {
        settings.min_text_length = web_scraper::crawler::parse_min_text_length(raw);
    }
    if let Some(pattern) = &cli.exclude {
        settings.exclude_pattern = pattern.clone();
    }

    settings.extract_links = toggle(cli.links, cli.no_links, settings.extract_links);
    settings.extract_headings = toggle(cli.headings, cli.no_headings, settings.extract_headings);
    settings.extract_text = toggle(cli.text, cli.no_text, settings.extract_text);
}

fn toggle(on: bool, off: bool, saved: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => saved,
    }
}

/// Picks the export format and destination, or `None` when not exporting
fn resolve_export(
    format: Option<ExportFormat>,
    output: Option<&Path>,
) -> anyhow::Result<Option<(ExportFormat, PathBuf)>> {
    match (format, output) {
        (None, None) => Ok(None),
        (Some(format), Some(path)) => Ok(Some((format, path.to_path_buf()))),
        (Some(format), None) => Ok(Some((
            format,
            PathBuf::from(format!("web_scraper_results.{}", format.extension())),
        ))),
        (None, Some(path)) => match ExportFormat::from_path(path) {
            Some(format) => Ok(Some((format, path.to_path_buf()))),
            None => bail!(
                "Cannot infer the export format from {}; pass --format",
                path.display()
            ),
        },
    }
}

/// Prints progress until the worker finishes; Ctrl-C cancels the crawl
async fn drive_crawl(mut handle: CrawlHandle) -> anyhow::Result<CrawlReport> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancelling = false;

    loop {
        let event = tokio::select! {
            event = handle.next_event() => event,
            result = &mut ctrl_c, if !cancelling => {
                if let Err(e) = result {
                    tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                }
                tracing::info!("Cancelling crawl after the current page");
                cancelling = true;
                handle.cancel();
                continue;
            }
        };

        match event {
            Some(CrawlEvent::PageCompleted { url, items }) => {
                tracing::debug!("{} items from {}", items.len(), url);
                for item in &items {
                    print_item(item);
                }
            }
            Some(CrawlEvent::PageFailed { url, reason }) => {
                tracing::warn!("Skipped {}: {}", url, reason);
            }
            Some(CrawlEvent::Finished(status)) => {
                tracing::debug!("Crawl finished: {:?}", status);
                break;
            }
            None => break,
        }
    }

    Ok(handle.finish().await?)
}

fn print_item(item: &ExtractedItem) {
    println!("Type: {}", item.kind());
    println!("Text: {}", item.text());
    if let Some(url) = item.url() {
        println!("URL: {}", url);
    }
    println!("{}", "─".repeat(50));
}

fn print_report(report: &CrawlReport) {
    let stats = report.results.stats();
    println!();
    println!(
        "Fetched {} pages ({} failed)",
        report.pages_fetched,
        report.failures.len()
    );
    for (label, value) in stats.labelled() {
        println!("  {}: {}", label, value);
    }
}
