//! # adscope
//!
//! Search the Meta Ad Library archive endpoint, page through the results
//! with bounded retry, and export the records to JSON and CSV.
//!
//! The interesting part is the fetch engine: it walks the API's
//! cursor-based pagination, retries timeouts with a fixed backoff, fails
//! fast on everything else, and always returns whatever records it
//! already has together with a machine-readable termination reason.
//!
//! ```text
//! SearchConfig ──► PaginatedFetcher ──► FetchResult ──► console / JSON / CSV
//!                    │        ▲
//!                    ▼        │
//!                 Transport (reqwest + pacer)
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use adscope::config::{SearchConfig, ARCHIVE_ENDPOINT};
//! use adscope::fetch::PaginatedFetcher;
//! use adscope::http::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let search = SearchConfig::new("coffee", std::env::var("ACCESS_TOKEN").unwrap());
//!     let fetcher = PaginatedFetcher::new(HttpTransport::new());
//!     let result = fetcher.fetch_all(&ARCHIVE_ENDPOINT, search.initial_spec()).await;
//!     println!("{} ads over {} pages", result.len(), result.pages_processed);
//! }
//! ```

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Search configuration and fetch limits
pub mod config;

/// HTTP transport with request pacing
pub mod http;

/// Paginated fetch engine
pub mod fetch;

/// JSON/CSV export
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use fetch::{FetchResult, PaginatedFetcher, RequestSpec, Termination};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
