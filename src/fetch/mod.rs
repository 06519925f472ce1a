//! Paginated fetch engine
//!
//! Walks the archive endpoint's cursor pagination: request, decode,
//! classify, accumulate, advance. Every exit path produces a
//! `FetchResult` carrying whatever records were already gathered; the
//! engine never panics, never prints and never aborts the process.

mod cursor;
mod retry;
mod types;

pub use cursor::extract_next_spec;
pub use types::{
    ApiFailure, EventSender, FetchEvent, FetchResult, PageBody, Paging, Record, RequestSpec,
    Termination,
};

use crate::config::FetchLimits;
use crate::http::Transport;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Sequential cursor-pagination fetcher.
///
/// One instance drives one fetch at a time; independent fetches get
/// independent instances and share nothing.
pub struct PaginatedFetcher<T: Transport> {
    transport: T,
    limits: FetchLimits,
    cancel: CancellationToken,
    events: Option<EventSender>,
}

impl<T: Transport> PaginatedFetcher<T> {
    /// Create a fetcher with default limits
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            limits: FetchLimits::default(),
            cancel: CancellationToken::new(),
            events: None,
        }
    }

    /// Set the operational limits
    #[must_use]
    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Use an externally owned cancellation token
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Deliver progress events over the given channel
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// A token that cancels this fetcher when triggered
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fetch every available page starting from `initial`.
    ///
    /// The endpoint stays fixed across pages; each continuation replaces
    /// the query parameters wholesale. All failure modes are encoded in
    /// the returned termination reason together with any records already
    /// accumulated.
    pub async fn fetch_all(&self, endpoint: &str, initial: RequestSpec) -> FetchResult {
        let mut records: Vec<Record> = Vec::new();
        let mut pages: u32 = 0;
        let mut spec = initial;

        loop {
            if self.cancel.is_cancelled() {
                return FetchResult::new(records, Termination::Cancelled, pages);
            }

            if pages >= self.limits.max_pages {
                debug!(pages, "page cap reached");
                return FetchResult::new(records, Termination::PageCapReached, pages);
            }

            // Pause between pages, not before the first one.
            if pages > 0 && !self.pause_between_pages().await {
                return FetchResult::new(records, Termination::Cancelled, pages);
            }

            pages += 1;

            let body = match retry::fetch_page_with_retry(
                &self.transport,
                endpoint,
                &spec,
                &self.limits,
                self.events.as_ref(),
            )
            .await
            {
                Ok(body) => body,
                Err(e) => return FetchResult::new(records, Termination::Fatal(e), pages),
            };

            if let Some(failure) = body.error {
                return FetchResult::new(records, Termination::ApiError(failure), pages);
            }

            if body.data.is_empty() {
                // Trailing cursors occasionally appear on empty pages;
                // an empty page always ends the stream.
                return FetchResult::new(records, Termination::Exhausted, pages);
            }

            debug!(page = pages, records = body.data.len(), "page accepted");
            if let Some(tx) = &self.events {
                let _ = tx.send(FetchEvent::PageFetched {
                    page: pages,
                    records: body.data.len(),
                });
            }

            let next = body.paging.and_then(|p| p.next);
            records.extend(body.data);

            let Some(next_url) = next else {
                return FetchResult::new(records, Termination::Exhausted, pages);
            };

            spec = match cursor::extract_next_spec(&next_url) {
                Ok(next_spec) => next_spec,
                Err(e) => {
                    // A broken continuation must not sink an otherwise
                    // successful fetch.
                    warn!("stopping at unusable continuation URL: {e}");
                    return FetchResult::new(records, Termination::Exhausted, pages);
                }
            };
        }
    }

    /// Cooperative inter-page delay. Returns false when cancellation
    /// fired during the pause.
    async fn pause_between_pages(&self) -> bool {
        tokio::select! {
            () = self.cancel.cancelled() => false,
            () = tokio::time::sleep(self.limits.inter_page_delay) => true,
        }
    }
}
