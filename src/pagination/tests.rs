//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::listing::{FlairEntry, FlairListing, Listing, ListingItem, ListingResponse, Thing};
use crate::types::{ParamValue, RequestParams};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use test_case::test_case;

// ============================================================================
// Helpers
// ============================================================================

/// Replays canned responses and records every request it receives
#[derive(Debug, Default)]
struct ScriptedFetcher {
    responses: VecDeque<Result<ListingResponse>>,
    calls: Vec<(String, RequestParams)>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<ListingResponse>>) -> Self {
        Self {
            responses: responses.into(),
            calls: Vec::new(),
        }
    }

    fn pages(pages: Vec<ListingResponse>) -> Self {
        Self::new(pages.into_iter().map(Ok).collect())
    }

    fn call_count(&self) -> usize {
        self.calls.len()
    }

    fn requested_afters(&self) -> Vec<Option<String>> {
        self.calls
            .iter()
            .map(|(_, params)| params.after().map(str::to_string))
            .collect()
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&mut self, url: &str, params: &RequestParams) -> Result<ListingResponse> {
        self.calls.push((url.to_string(), params.clone()));
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted response left".to_string())))
    }
}

fn thing(id: &str) -> Thing {
    Thing {
        kind: "t3".to_string(),
        data: json!({"id": id, "name": format!("t3_{id}")}),
    }
}

fn listing(ids: &[&str], after: Option<&str>) -> ListingResponse {
    ListingResponse::Bare(Listing {
        children: ids.iter().map(|id| thing(id)).collect(),
        after: after.map(str::to_string),
        before: None,
        dist: Some(ids.len() as u64),
    })
}

fn names(items: &[ListingItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            ListingItem::Thing(thing) => thing.fullname().unwrap_or_default().to_string(),
            ListingItem::Flair(entry) => entry.user.clone(),
        })
        .collect()
}

fn drain<F: Fetch>(generator: &mut ListingGenerator<F>) -> Vec<ListingItem> {
    let mut items = Vec::new();
    while let Some(item) = generator.next_item().unwrap() {
        items.push(item);
    }
    items
}

const URL: &str = "https://www.reddit.com/r/rust/new.json";

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_construction_fetches_nothing() {
    let generator = ListingGenerator::new(ScriptedFetcher::default(), URL);

    assert_eq!(generator.fetcher().call_count(), 0);
    assert_eq!(generator.state(), GeneratorState::Fresh);
    assert_eq!(generator.yielded(), 0);
    assert_eq!(generator.limit(), Some(DEFAULT_ITEM_LIMIT));
    assert_eq!(generator.url(), URL);
    assert!(!generator.is_exhausted());
}

#[test_case(Some(25), 25 ; "page size follows item limit")]
#[test_case(None, 1024 ; "unbounded uses default page size")]
#[test_case(Some(0), 1024 ; "zero limit uses default page size")]
fn test_page_size_hint(limit: Option<usize>, expected: i64) {
    let generator = ListingGenerator::new(ScriptedFetcher::default(), URL).with_limit(limit);
    assert_eq!(generator.params().limit(), Some(expected));
}

#[test]
fn test_default_page_size_is_configurable() {
    let generator = ListingGenerator::new(ScriptedFetcher::default(), URL)
        .with_default_page_size(500)
        .with_limit(None);
    assert_eq!(generator.params().limit(), Some(500));
}

#[test]
fn test_caller_limit_param_is_replaced() {
    let params = RequestParams::new().with("limit", 5_i64).with("t", "week");
    let generator = ListingGenerator::new(ScriptedFetcher::default(), URL)
        .with_params(params)
        .with_limit(Some(40));

    assert_eq!(generator.params().limit(), Some(40));
    assert_eq!(
        generator.params().get("t"),
        Some(&ParamValue::Str("week".to_string()))
    );
}

// ============================================================================
// Limit Tests
// ============================================================================

#[test]
fn test_limit_stops_within_a_page() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a", "b", "c", "d", "e"], Some("t3_e"))]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(Some(3));

    let items = drain(&mut generator);
    assert_eq!(names(&items), vec!["t3_a", "t3_b", "t3_c"]);
    assert_eq!(generator.state(), GeneratorState::LimitReached);
    assert_eq!(generator.fetcher().call_count(), 1);
}

#[test]
fn test_limit_spanning_pages_makes_no_extra_fetch() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a", "b"], Some("t3_b")),
        listing(&["c", "d"], Some("t3_d")),
        listing(&["e", "f"], Some("t3_f")),
        listing(&["g", "h"], Some("t3_h")),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(Some(5));

    let items = drain(&mut generator);
    assert_eq!(items.len(), 5);
    assert_eq!(generator.fetcher().call_count(), 3);

    // Further pulls stay inert
    assert!(generator.next_item().unwrap().is_none());
    assert_eq!(generator.fetcher().call_count(), 3);
    assert_eq!(generator.yielded(), 5);
}

#[test]
fn test_zero_limit_yields_nothing() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(Some(0));

    assert!(generator.next_item().unwrap().is_none());
    assert_eq!(generator.fetcher().call_count(), 0);
    assert_eq!(generator.state(), GeneratorState::LimitReached);
}

// ============================================================================
// Exhaustion Tests
// ============================================================================

#[test]
fn test_unbounded_runs_until_cursor_disappears() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a", "b"], Some("t3_b")),
        listing(&["c", "d"], Some("t3_d")),
        listing(&["e"], None),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    let items = drain(&mut generator);
    assert_eq!(
        names(&items),
        vec!["t3_a", "t3_b", "t3_c", "t3_d", "t3_e"]
    );
    assert_eq!(generator.fetcher().call_count(), 3);
    assert!(generator.is_exhausted());
    assert_eq!(generator.state(), GeneratorState::Exhausted);

    assert!(generator.next_item().unwrap().is_none());
    assert_eq!(generator.fetcher().call_count(), 3);
}

#[test]
fn test_empty_cursor_string_exhausts() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a"], Some("")), listing(&["b"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    assert_eq!(names(&drain(&mut generator)), vec!["t3_a"]);
    assert_eq!(generator.fetcher().call_count(), 1);
}

#[test]
fn test_repeated_cursor_stops_fetching() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a"], Some("a1")),
        listing(&["b"], Some("a2")),
        listing(&["c"], Some("a2")),
        listing(&["d"], Some("a3")),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    let items = drain(&mut generator);

    // The page that repeats the cursor is still yielded
    assert_eq!(names(&items), vec!["t3_a", "t3_b", "t3_c"]);
    assert_eq!(generator.fetcher().call_count(), 3);
    assert_eq!(
        generator.fetcher().requested_afters(),
        vec![None, Some("a1".to_string()), Some("a2".to_string())]
    );
    assert_eq!(generator.params().after(), Some("a2"));
}

#[test]
fn test_caller_supplied_after_is_compared_verbatim() {
    let params = RequestParams::new().with("after", "t3_x");
    let fetcher = ScriptedFetcher::pages(vec![listing(&["y"], Some("t3_x"))]);
    let mut generator = ListingGenerator::new(fetcher, URL)
        .with_params(params)
        .with_limit(None);

    assert_eq!(names(&drain(&mut generator)), vec!["t3_y"]);
    assert_eq!(
        generator.fetcher().requested_afters(),
        vec![Some("t3_x".to_string())]
    );
}

#[test]
fn test_echoed_numeric_cursor_from_parsed_params_stops() {
    let entry = |user: &str| FlairEntry {
        user: user.to_string(),
        flair_text: None,
        flair_css_class: None,
    };
    let params: RequestParams = [RequestParams::parse_pair("after=12345").unwrap()]
        .into_iter()
        .collect();
    let fetcher = ScriptedFetcher::pages(vec![
        ListingResponse::Flair(FlairListing {
            users: vec![entry("12346"), entry("12347")],
            next: Some("12345".to_string()),
            prev: None,
        }),
        ListingResponse::Flair(FlairListing::default()),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL)
        .with_params(params)
        .with_limit(None);

    assert_eq!(drain(&mut generator).len(), 2);
    assert_eq!(generator.fetcher().call_count(), 1);
    assert_eq!(generator.state(), GeneratorState::Exhausted);
}

#[test]
fn test_first_empty_page_ends_iteration() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&[], Some("t3_z")), listing(&["a"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    assert!(generator.next_item().unwrap().is_none());
    assert!(generator.next_item().unwrap().is_none());
    assert_eq!(generator.fetcher().call_count(), 1);
    assert_eq!(generator.state(), GeneratorState::Exhausted);
    // The empty page's cursor is never adopted
    assert_eq!(generator.params().after(), None);
}

#[test]
fn test_empty_page_after_full_page() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a", "b"], Some("t3_b")),
        listing(&[], Some("t3_c")),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    assert_eq!(names(&drain(&mut generator)), vec!["t3_a", "t3_b"]);
    assert_eq!(generator.fetcher().call_count(), 2);
    assert!(generator.is_exhausted());
}

// ============================================================================
// Response Shape Tests
// ============================================================================

#[test]
fn test_duplicates_response_yields_only_listing() {
    let primary = json!({"kind": "Listing", "data": {"children": [{"kind": "t3", "data": {"name": "t3_primary"}}]}});
    let fetcher = ScriptedFetcher::pages(vec![ListingResponse::Duplicates {
        primary,
        listing: Listing {
            children: vec![thing("d1"), thing("d2")],
            after: None,
            before: None,
            dist: Some(2),
        },
    }]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    assert_eq!(names(&drain(&mut generator)), vec!["t3_d1", "t3_d2"]);
}

#[test]
fn test_flair_listing_paginates_on_next() {
    let entry = |user: &str| FlairEntry {
        user: user.to_string(),
        flair_text: Some(format!("{user}-flair")),
        flair_css_class: None,
    };
    let fetcher = ScriptedFetcher::pages(vec![
        ListingResponse::Flair(FlairListing {
            users: vec![entry("alice"), entry("bob")],
            next: Some("bob".to_string()),
            prev: None,
        }),
        ListingResponse::Flair(FlairListing {
            users: vec![entry("carol")],
            next: None,
            prev: Some("bob".to_string()),
        }),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    let items = drain(&mut generator);
    assert_eq!(names(&items), vec!["alice", "bob", "carol"]);
    assert!(items.iter().all(|item| item.as_flair().is_some()));
    assert_eq!(
        generator.fetcher().requested_afters(),
        vec![None, Some("bob".to_string())]
    );
}

#[test]
fn test_protocol_violation_propagates() {
    let fetcher = |_url: &str, _params: &RequestParams| ListingResponse::from_value(json!(42));
    let mut generator = ListingGenerator::new(fetcher, URL);

    let err = generator.next_item().unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(generator.state(), GeneratorState::Fresh);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_failed_first_fetch_leaves_state_untouched() {
    let fetcher = ScriptedFetcher::new(vec![
        Err(Error::http_status(503, "Service Unavailable")),
        Ok(listing(&["a"], None)),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    let err = generator.next_item().unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(generator.state(), GeneratorState::Fresh);
    assert_eq!(generator.yielded(), 0);
    assert!(!generator.is_exhausted());

    // Retrying repeats the same request
    assert_eq!(names(&drain(&mut generator)), vec!["t3_a"]);
    let calls = &generator.fetcher().calls;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn test_failed_refill_keeps_cursor() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(listing(&["a"], Some("t3_a"))),
        Err(Error::Other("connection reset".to_string())),
        Ok(listing(&["b"], None)),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);

    assert!(generator.next_item().unwrap().is_some());
    assert!(generator.next_item().is_err());
    assert_eq!(generator.params().after(), Some("t3_a"));
    assert_eq!(generator.yielded(), 1);

    assert_eq!(names(&drain(&mut generator)), vec!["t3_b"]);
    assert_eq!(
        generator.fetcher().requested_afters(),
        vec![
            None,
            Some("t3_a".to_string()),
            Some("t3_a".to_string())
        ]
    );
}

// ============================================================================
// Iterator Tests
// ============================================================================

#[test]
fn test_iterator_collects_items() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a", "b"], Some("t3_b")),
        listing(&["c"], None),
    ]);
    let items = ListingGenerator::new(fetcher, URL)
        .with_limit(None)
        .collect::<Result<Vec<_>>>()
        .unwrap();
    assert_eq!(names(&items), vec!["t3_a", "t3_b", "t3_c"]);
}

#[test]
fn test_iterator_is_fused() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL);

    assert!(generator.next().is_some());
    assert!(generator.next().is_none());
    assert!(generator.next().is_none());
    assert_eq!(generator.fetcher().call_count(), 1);
}

#[test]
fn test_iterator_surfaces_errors() {
    let fetcher = ScriptedFetcher::new(vec![Err(Error::http_status(500, ""))]);
    let mut generator = ListingGenerator::new(fetcher, URL);

    assert!(matches!(generator.next(), Some(Err(Error::HttpStatus { .. }))));
}

#[test]
fn test_size_hint() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a", "b", "c"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(Some(2));
    assert_eq!(generator.size_hint(), (0, None));

    generator.next_item().unwrap();
    assert_eq!(generator.size_hint(), (1, Some(1)));
}

#[test]
fn test_state_transitions() {
    let fetcher = ScriptedFetcher::pages(vec![
        listing(&["a"], Some("t3_a")),
        listing(&["b"], None),
    ]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);
    assert_eq!(generator.state(), GeneratorState::Fresh);

    generator.next_item().unwrap();
    assert_eq!(generator.state(), GeneratorState::Active);

    generator.next_item().unwrap();
    assert!(generator.is_exhausted());
    assert_eq!(generator.state(), GeneratorState::Exhausted);
    assert!(generator.state().is_terminal());
}

#[test]
fn test_requests_go_to_configured_url() {
    let fetcher = ScriptedFetcher::pages(vec![listing(&["a"], Some("t3_a")), listing(&["b"], None)]);
    let mut generator = ListingGenerator::new(fetcher, URL).with_limit(None);
    drain(&mut generator);

    let fetcher = generator.into_fetcher();
    assert!(fetcher.calls.iter().all(|(url, _)| url == URL));
    assert!(fetcher
        .calls
        .iter()
        .all(|(_, params)| params.limit() == Some(1024)));
}

#[test]
fn test_collaborator_errors_pass_through() {
    let fetcher = |_: &str, _: &RequestParams| -> Result<ListingResponse> {
        Err(anyhow::anyhow!("token expired").into())
    };
    let mut generator = ListingGenerator::new(fetcher, URL);

    let err = generator.next_item().unwrap_err();
    assert!(matches!(err, Error::Anyhow(_)));
    assert_eq!(err.to_string(), "token expired");
}
