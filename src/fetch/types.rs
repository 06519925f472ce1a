//! Fetch types
//!
//! Data model for the paginated fetch engine: the request parameter set,
//! the decoded page shape and the result handed back to the host.

use crate::error::Error;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One ad record as returned by the archive endpoint.
///
/// The engine treats record contents as opaque; only the presentation and
/// export layers look inside.
pub type Record = JsonObject;

// ============================================================================
// Request Spec
// ============================================================================

/// Query parameters for one archive request.
///
/// Following a continuation replaces the whole set with the parameters
/// parsed from `paging.next`; specs are never merged or patched in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestSpec {
    params: HashMap<String, String>,
}

impl RequestSpec {
    /// Create an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spec from an existing parameter map
    pub fn from_params(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Add a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Check whether a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Borrow the underlying parameter map
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check whether the spec is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

// The credential rides along as a query parameter; keep it out of debug
// output and anything derived from it.
impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.params {
            if key == "access_token" {
                map.entry(key, &"***");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

// ============================================================================
// Wire Shapes
// ============================================================================

/// One decoded response from the archive endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PageBody {
    /// Records on this page, in API order
    #[serde(default)]
    pub data: Vec<Record>,
    /// Continuation reference, when more data may exist
    #[serde(default)]
    pub paging: Option<Paging>,
    /// API-level failure payload
    #[serde(default)]
    pub error: Option<ApiFailure>,
}

impl PageBody {
    /// The continuation URL, if the response carried one
    pub fn next_url(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_deref())
    }
}

/// Pagination block of a response
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    /// Full URL of the next page
    #[serde(default)]
    pub next: Option<String>,
}

/// API-level error payload, surfaced to the caller verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Error category reported by the API
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Numeric error code
    #[serde(default)]
    pub code: Option<i64>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(kind) = &self.kind {
            write!(f, " (type: {kind}")?;
            if let Some(code) = self.code {
                write!(f, ", code: {code}")?;
            }
            write!(f, ")")?;
        } else if let Some(code) = self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

// ============================================================================
// Fetch Result
// ============================================================================

/// Why a fetch stopped
#[derive(Debug)]
pub enum Termination {
    /// Upstream ran out of data
    Exhausted,
    /// The configured page ceiling was reached
    PageCapReached,
    /// A page could not be fetched; records gathered so far are kept
    Fatal(Error),
    /// The response body carried an API-level error payload
    ApiError(ApiFailure),
    /// The fetch was cancelled between pages
    Cancelled,
}

impl Termination {
    /// True when the stream ended normally (no more data)
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// True when the fetch ended on a failure (fatal or API-level)
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fatal(_) | Self::ApiError(_))
    }
}

/// Everything a completed fetch hands back.
///
/// Records are always present, even on failure; the termination reason
/// says how far the fetch got.
#[derive(Debug)]
pub struct FetchResult {
    /// Accumulated records, insertion order = page order = API order
    pub records: Vec<Record>,
    /// Why the fetch stopped
    pub termination: Termination,
    /// Pages for which a request was issued
    pub pages_processed: u32,
}

impl FetchResult {
    /// Create a fetch result
    pub fn new(records: Vec<Record>, termination: Termination, pages_processed: u32) -> Self {
        Self {
            records,
            termination,
            pages_processed,
        }
    }

    /// Number of records fetched
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether any records were fetched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Progress Events
// ============================================================================

/// Progress notification delivered to the host over a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchEvent {
    /// A page was fetched and its records accepted
    PageFetched {
        /// 1-based page number
        page: u32,
        /// Records on the page
        records: usize,
    },
    /// A timed-out attempt is about to be retried
    Retrying {
        /// 1-based attempt that timed out
        attempt: u32,
        /// Total attempts allowed
        max_retries: u32,
    },
}

/// Channel used for progress events
pub type EventSender = tokio::sync::mpsc::UnboundedSender<FetchEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_spec_debug_masks_token() {
        let spec = RequestSpec::new()
            .with("access_token", "super-secret")
            .with("search_terms", "coffee");
        let rendered = format!("{spec:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
        assert!(rendered.contains("coffee"));
    }

    #[test]
    fn test_api_failure_display() {
        let failure = ApiFailure {
            message: "Invalid OAuth access token".to_string(),
            kind: Some("OAuthException".to_string()),
            code: Some(190),
        };
        assert_eq!(
            failure.to_string(),
            "Invalid OAuth access token (type: OAuthException, code: 190)"
        );

        let bare = ApiFailure {
            message: "boom".to_string(),
            kind: None,
            code: None,
        };
        assert_eq!(bare.to_string(), "boom");
    }

    #[test]
    fn test_page_body_deserialize() {
        let body: PageBody = serde_json::from_str(
            r#"{
                "data": [{"id": "1"}, {"id": "2"}],
                "paging": {"next": "https://example.com/next?after=abc"}
            }"#,
        )
        .unwrap();
        assert_eq!(body.data.len(), 2);
        assert_eq!(
            body.next_url(),
            Some("https://example.com/next?after=abc")
        );
        assert!(body.error.is_none());

        let empty: PageBody = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
        assert!(empty.next_url().is_none());
    }

    #[test]
    fn test_page_body_deserialize_error_payload() {
        let body: PageBody = serde_json::from_str(
            r#"{"error": {"message": "nope", "type": "OAuthException", "code": 190}}"#,
        )
        .unwrap();
        let failure = body.error.unwrap();
        assert_eq!(failure.message, "nope");
        assert_eq!(failure.kind.as_deref(), Some("OAuthException"));
        assert_eq!(failure.code, Some(190));
    }
}
