//! Property-based tests for selector extraction and scenario lookup

use axum::http::{HeaderMap, HeaderValue};
use proptest::prelude::*;

use dp_mock_server::scenario::{extract_selector, Endpoint};
use dp_mock_server::server::split_action;
use dp_mock_server::catalog;

/// Header-safe tokens, never empty
fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_\\-]{1,40}"
}

fn endpoint() -> impl Strategy<Value = Endpoint> {
    prop::sample::select(Endpoint::ALL.to_vec())
}

proptest! {
    /// A bearer token is returned without its prefix
    #[test]
    fn test_bearer_prefix_stripped(key in token()) {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(&format!("Bearer {}", key)).unwrap());

        let selected = extract_selector(&headers, None).unwrap();
        prop_assert_eq!(selected.as_str(), key.as_str());
    }

    /// Authorization beats x-api-key beats the query parameter
    #[test]
    fn test_source_priority(auth in token(), api_key in token(), query in token()) {
        let query_string = format!("key={}", query);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&api_key).unwrap());
        let selected = extract_selector(&headers, Some(&query_string)).unwrap();
        prop_assert_eq!(selected.as_str(), api_key.as_str());

        headers.insert("authorization", HeaderValue::from_str(&auth).unwrap());
        let selected = extract_selector(&headers, Some(&query_string)).unwrap();
        prop_assert_eq!(selected.as_str(), auth.as_str());

        let selected = extract_selector(&HeaderMap::new(), Some(&query_string)).unwrap();
        prop_assert_eq!(selected.as_str(), query.as_str());
    }

    /// Query values are percent-decoded
    #[test]
    fn test_query_key_decoded(key in "[A-Za-z0-9 ]{1,20}") {
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        let query = format!("alt=sse&key={}", encoded);

        let selected = extract_selector(&HeaderMap::new(), Some(&query)).unwrap();
        prop_assert_eq!(selected.as_str(), key.as_str());
    }

    /// Lookup is a pure function of (endpoint, key)
    #[test]
    fn test_lookup_is_deterministic(ep in endpoint(), key in token()) {
        let first = catalog().select(ep, Some(&key));
        let second = catalog().select(ep, Some(&key));
        prop_assert_eq!(first.scenario, second.scenario);
        prop_assert_eq!(first.behavior, second.behavior);
    }

    /// Keys that are not in an endpoint's table always select its miss response
    #[test]
    fn test_unknown_keys_miss(ep in endpoint(), key in "[a-z]{1,30}") {
        // Catalog keys are upper case, so lower-case keys never match
        let selection = catalog().select(ep, Some(&key));
        prop_assert!(selection.is_miss());
        prop_assert_eq!(
            selection.behavior.fixed_status().map(|s| s.as_u16()),
            Some(400)
        );
    }

    /// Splitting only ever happens in the last segment and loses nothing
    #[test]
    fn test_split_action_reassembles(
        base in "(/[a-z0-9\\-]{1,12}){1,4}",
        action in "[A-Za-z]{1,24}",
    ) {
        let path = format!("{}:{}", base, action);
        let (head, tail) = split_action(&path).unwrap();
        prop_assert_eq!(head, base.as_str());
        prop_assert_eq!(tail, action.as_str());
    }

    /// Paths without a colon are never split
    #[test]
    fn test_plain_paths_not_split(path in "(/[a-z0-9_\\-]{1,12}){1,5}") {
        prop_assert!(split_action(&path).is_none());
    }
}
