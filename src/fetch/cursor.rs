//! Continuation-URL handling
//!
//! The archive API hands back a full URL in `paging.next`. Its query
//! string becomes the entire parameter set for the following request;
//! nothing from the previous spec survives.

use super::types::RequestSpec;
use crate::error::{Error, Result};
use std::collections::HashMap;
use url::Url;

/// Parse the query string of a continuation URL into the next request spec.
///
/// Duplicate keys keep their first value. The URL itself (host, path) is
/// discarded; the endpoint stays fixed across pages.
pub fn extract_next_spec(raw: &str) -> Result<RequestSpec> {
    // Error messages must not echo the URL: it embeds the access token.
    let parsed = Url::parse(raw).map_err(|e| Error::cursor_parse(e.to_string()))?;

    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in parsed.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    Ok(RequestSpec::from_params(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_query_params() {
        let spec = extract_next_spec(
            "https://graph.facebook.com/v24.0/ads_archive?access_token=tok&after=abc123&limit=10",
        )
        .unwrap();

        assert_eq!(spec.len(), 3);
        assert!(spec.contains("after"));
        assert_eq!(spec.get("access_token"), Some("tok"));
        assert_eq!(spec.get("after"), Some("abc123"));
        assert_eq!(spec.get("limit"), Some("10"));
    }

    #[test]
    fn test_first_value_wins_for_duplicate_keys() {
        let spec =
            extract_next_spec("https://example.com/page?after=first&after=second").unwrap();
        assert_eq!(spec.get("after"), Some("first"));
    }

    #[test]
    fn test_percent_decoding() {
        let spec =
            extract_next_spec("https://example.com/page?search_terms=flat%20white").unwrap();
        assert_eq!(spec.get("search_terms"), Some("flat white"));
    }

    #[test]
    fn test_no_query_string_yields_empty_spec() {
        let spec = extract_next_spec("https://example.com/page").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_malformed_url_is_cursor_parse_error() {
        let err = extract_next_spec("not a url").unwrap_err();
        assert!(matches!(err, Error::CursorParse { .. }));
    }

    #[test]
    fn test_error_does_not_leak_token() {
        let err = extract_next_spec("::bogus::?access_token=super-secret").unwrap_err();
        assert!(!err.to_string().contains("super-secret"));
    }
}
