//! Bounded per-page retry
//!
//! One attempt is one GET plus one decode, classified exactly once.
//! Timeouts are retried with a fixed backoff up to the configured
//! attempt ceiling; transport failures, HTTP status errors and
//! malformed bodies fail the page on the first occurrence.

use super::types::{EventSender, FetchEvent, PageBody, RequestSpec};
use crate::config::FetchLimits;
use crate::error::{Error, Result};
use crate::http::Transport;
use tracing::{debug, warn};

/// Outcome of a single attempt
enum Attempt {
    /// Parseable body, including bodies that encode an API-level error
    Success(PageBody),
    /// Recoverable: the request timed out
    Timeout,
    /// Terminal: transport failure, HTTP error status or undecodable body
    Failed(Error),
}

/// Fetch one page, retrying timeouts up to `limits.max_retries_per_page`
/// attempts in total. The attempt counter is local to this call; it is
/// never carried across pages.
pub(super) async fn fetch_page_with_retry<T: Transport>(
    transport: &T,
    endpoint: &str,
    spec: &RequestSpec,
    limits: &FetchLimits,
    events: Option<&EventSender>,
) -> Result<PageBody> {
    let max_attempts = limits.max_retries_per_page.max(1);

    for attempt in 1..=max_attempts {
        match run_attempt(transport, endpoint, spec, limits).await {
            Attempt::Success(page) => {
                debug!(attempt, "page fetched");
                return Ok(page);
            }
            Attempt::Timeout => {
                if attempt == max_attempts {
                    warn!(attempt, "request timed out, attempts exhausted");
                    return Err(Error::timeout(limits.request_timeout));
                }
                warn!(attempt, max_attempts, "request timed out, retrying");
                if let Some(tx) = events {
                    let _ = tx.send(FetchEvent::Retrying {
                        attempt,
                        max_retries: max_attempts,
                    });
                }
                tokio::time::sleep(limits.retry_backoff).await;
            }
            Attempt::Failed(e) => return Err(e),
        }
    }

    // Loop always returns; kept for totality.
    Err(Error::MaxRetriesExceeded {
        max_retries: max_attempts,
    })
}

/// Issue one request and classify its outcome.
async fn run_attempt<T: Transport>(
    transport: &T,
    endpoint: &str,
    spec: &RequestSpec,
    limits: &FetchLimits,
) -> Attempt {
    let response = match transport
        .send(endpoint, spec.params(), limits.request_timeout)
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_retryable() => return Attempt::Timeout,
        Err(e) => return Attempt::Failed(e),
    };

    if !(200..300).contains(&response.status) {
        return Attempt::Failed(Error::http_status(response.status, response.body));
    }

    match serde_json::from_str::<PageBody>(&response.body) {
        Ok(page) => Attempt::Success(page),
        Err(e) => Attempt::Failed(Error::decode(e.to_string())),
    }
}
