//! CLI runner
//!
//! Runs one archive search end to end: resolve the credential, drive the
//! fetch on its own task with progress flowing back over a channel, then
//! render and export whatever came back. All console output lives here;
//! the fetch engine itself is silent.

use super::commands::Cli;
use crate::config::{FetchLimits, SearchConfig, ARCHIVE_ENDPOINT};
use crate::error::{Error, Result};
use crate::fetch::{FetchEvent, FetchResult, PaginatedFetcher, Termination};
use crate::http::HttpTransport;
use crate::output::{joined_field, text_field, ExportConfig, Exporter};
use std::time::Duration;
use tokio::sync::mpsc;

/// Executes the CLI
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the search
    pub async fn run(&self) -> Result<()> {
        let token = self.resolve_token()?;
        let search = SearchConfig::new(&self.cli.keyword, token)
            .with_country(&self.cli.country)
            .with_limit(self.cli.limit);
        search.validate()?;

        let limits = FetchLimits::new()
            .with_max_pages(self.cli.max_pages)
            .with_request_timeout(Duration::from_secs(self.cli.timeout_secs));

        let (events, mut progress) = mpsc::unbounded_channel();
        let fetcher = PaginatedFetcher::new(HttpTransport::new())
            .with_limits(limits)
            .with_events(events);
        let cancel = fetcher.cancel_token();

        // Ctrl-C becomes a cooperative cancel; the fetch keeps whatever
        // it already has.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        println!(
            "Searching the Ad Library for '{}' in {} ...",
            search.keyword, search.country
        );

        let endpoint = ARCHIVE_ENDPOINT.clone();
        let spec = search.initial_spec();
        let fetch = tokio::spawn(async move { fetcher.fetch_all(&endpoint, spec).await });

        // The channel closes when the fetch task drops its sender.
        while let Some(event) = progress.recv().await {
            match event {
                FetchEvent::PageFetched { page, records } => {
                    println!("  page {page}: {records} ads");
                }
                FetchEvent::Retrying {
                    attempt,
                    max_retries,
                } => {
                    println!("  timeout, retrying ({attempt}/{max_retries})");
                }
            }
        }

        let result = fetch
            .await
            .map_err(|e| Error::Other(format!("fetch task failed: {e}")))?;

        report_termination(&result);

        if result.is_empty() {
            println!("No ads found for this query.");
            return Ok(());
        }

        render_summary(&result);

        if !self.cli.no_save {
            let exporter = Exporter::new(ExportConfig::new().with_directory(&self.cli.output));
            let paths = exporter.export(&result.records, &search.country, &search.keyword)?;
            println!("Saved JSON results to {}", paths.json.display());
            println!("Saved CSV results to {}", paths.csv.display());
        }

        Ok(())
    }

    /// Credential from the flag, else the environment. Never printed.
    fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.cli.access_token {
            if !token.trim().is_empty() {
                return Ok(token.clone());
            }
        }
        std::env::var("ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::missing_field("access_token"))
    }
}

/// One line about why the fetch stopped, when it stopped early.
fn report_termination(result: &FetchResult) {
    match &result.termination {
        Termination::Exhausted => {}
        Termination::PageCapReached => {
            println!("Stopped at the {}-page ceiling.", result.pages_processed);
        }
        Termination::Cancelled => {
            println!("Cancelled; keeping the {} ads fetched so far.", result.len());
        }
        Termination::ApiError(failure) => {
            eprintln!("API error: {failure}");
        }
        Termination::Fatal(e) => {
            eprintln!("Fetch failed: {e}");
        }
    }
}

/// Numbered console summary of the fetched ads
fn render_summary(result: &FetchResult) {
    println!(
        "\nFound {} ads over {} pages.\n",
        result.len(),
        result.pages_processed
    );

    for (index, ad) in result.records.iter().enumerate() {
        let page_name = match text_field(ad, "page_name") {
            name if name.is_empty() => "Unknown Page".to_string(),
            name => name,
        };
        println!("[{}] {page_name}", index + 1);
        println!("    Created:     {}", text_field(ad, "ad_creation_time"));
        println!(
            "    Title:       {}",
            or_dash(joined_field(ad, "ad_creative_link_titles", ", "))
        );
        println!(
            "    Description: {}",
            or_dash(joined_field(ad, "ad_creative_link_descriptions", ", "))
        );
        println!(
            "    Body:        {}",
            or_dash(truncate(&joined_field(ad, "ad_creative_bodies", ", "), 150))
        );
        println!("    Snapshot:    {}", text_field(ad, "ad_snapshot_url"));
        println!("{}", "-".repeat(80));
    }
}

fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// Truncate on a char boundary, appending an ellipsis when cut
fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
