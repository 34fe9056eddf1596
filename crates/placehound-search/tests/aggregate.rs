//! End-to-end tests for `PlaceAggregator` against a wiremock provider.
//!
//! One mock server plays the search endpoint, the detail endpoint and every
//! place website.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use placehound_search::{PlaceAggregator, SearchError, SearchSettings};

fn test_settings(server: &MockServer) -> SearchSettings {
    let mut settings = SearchSettings::new("test-key", server.uri());
    settings.page_token_delay = Duration::ZERO;
    settings.inter_batch_delay = Duration::ZERO;
    settings.search_timeout = Duration::from_secs(5);
    settings.detail_timeout = Duration::from_secs(5);
    settings.email_timeout = Duration::from_secs(2);
    settings
}

fn aggregator(server: &MockServer) -> PlaceAggregator {
    PlaceAggregator::new(&test_settings(server)).expect("failed to build test aggregator")
}

fn page_token(expected: Option<&'static str>) -> impl Fn(&Request) -> bool + Send + Sync {
    move |req: &Request| {
        let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap_or_default();
        body.get("pageToken").and_then(serde_json::Value::as_str) == expected
    }
}

async fn mount_search(server: &MockServer, token: Option<&'static str>, ids: &[&str], next: Option<&str>) {
    let places: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({"id": id, "displayName": {"text": format!("Place {id}")}}))
        .collect();
    let mut body = json!({ "places": places });
    if let Some(next) = next {
        body["nextPageToken"] = json!(next);
    }
    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(page_token(token))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, website: Option<String>) {
    let mut body = json!({
        "id": id,
        "displayName": {"text": format!("Place {id}")},
        "formattedAddress": format!("{id} Evergreen Terrace"),
        "internationalPhoneNumber": "+1 555-0123",
        "rating": 4.0,
        "location": {"latitude": 39.8, "longitude": -89.6}
    });
    if let Some(website) = website {
        body["websiteUri"] = json!(website);
    }
    Mock::given(method("GET"))
        .and(path(format!("/places/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_site(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route.to_owned()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .count()
}

#[tokio::test]
async fn springfield_restaurants_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(body_partial_json(json!({"textQuery": "restaurants in Springfield"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "places": [
                {"id": "krusty", "displayName": {"text": "Krusty Burger"}},
                {"id": "moes", "displayName": {"text": "Moe's Tavern"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_detail(&server, "krusty", Some(format!("{}/site/krusty", server.uri()))).await;
    mount_detail(&server, "moes", None).await;
    mount_site(
        &server,
        "/site/krusty",
        200,
        "<html><body>contact: jane@doe.com</body></html>",
    )
    .await;

    let results = aggregator(&server)
        .search("Springfield", "restaurants")
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "krusty");
    assert_eq!(results[0].name, "Place krusty");
    assert_eq!(results[0].email, "jane@doe.com");
    assert_eq!(results[1].id, "moes");
    assert_eq!(results[1].email, "");
    assert_eq!(results[1].website, "");
    assert_eq!(results[1].phone, "+1 555-0123");
    assert_eq!(results[1].lat, Some(39.8));

    // Only one website exists, so only one site request may have been made.
    assert_eq!(request_count(&server, "/site/").await, 1);
}

#[tokio::test]
async fn empty_search_short_circuits_before_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"places": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/places/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"id": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let report = aggregator(&server)
        .search_report("Nowhere", "unicorns")
        .await
        .expect("empty search is not an error");

    assert!(report.results.is_empty());
    assert_eq!(report.stats.summaries, 0);
}

#[tokio::test]
async fn detail_failure_drops_only_that_place() {
    let server = MockServer::start().await;
    mount_search(&server, None, &["a", "b", "c"], None).await;
    mount_detail(&server, "a", None).await;
    mount_detail(&server, "c", None).await;
    Mock::given(method("GET"))
        .and(path("/places/b"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let report = aggregator(&server)
        .search_report("Shelbyville", "cafes")
        .await
        .expect("a failed detail must not fail the search");

    let ids: Vec<&str> = report.results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(report.stats.summaries, 3);
    assert_eq!(report.stats.detail_failures, 1);
    assert_eq!(report.stats.results, 2);
}

#[tokio::test]
async fn duplicates_across_pages_are_emitted_once_in_first_seen_order() {
    let server = MockServer::start().await;
    mount_search(&server, None, &["a", "b"], Some("tok-2")).await;
    mount_search(&server, Some("tok-2"), &["b", "c"], None).await;
    for id in ["a", "b", "c"] {
        mount_detail(&server, id, None).await;
    }

    let report = aggregator(&server)
        .search_report("Capital City", "bars")
        .await
        .unwrap();

    let ids: Vec<&str> = report.results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(report.stats.summaries, 4);
    assert_eq!(report.stats.duplicates, 1);
}

#[tokio::test]
async fn search_failure_is_fatal_and_skips_details() {
    let server = MockServer::start().await;
    mount_search(&server, None, &["a"], Some("tok-2")).await;
    Mock::given(method("POST"))
        .and(path("/places:searchText"))
        .and(page_token(Some("tok-2")))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/places/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"id": "a"})))
        .expect(0)
        .mount(&server)
        .await;

    let result = aggregator(&server).search("Ogdenville", "gyms").await;
    assert!(
        matches!(result, Err(SearchError::UnexpectedStatus { status: 500, .. })),
        "expected fatal UnexpectedStatus, got: {result:?}"
    );
}

#[tokio::test]
async fn unreachable_or_failing_websites_yield_empty_email() {
    let server = MockServer::start().await;
    mount_search(&server, None, &["ok", "err", "none", "dead"], None).await;
    mount_detail(&server, "ok", Some(format!("{}/site/ok", server.uri()))).await;
    mount_detail(&server, "err", Some(format!("{}/site/err", server.uri()))).await;
    mount_detail(&server, "none", Some(format!("{}/site/none", server.uri()))).await;
    mount_detail(&server, "dead", Some("http://127.0.0.1:1/".to_string())).await;
    mount_site(&server, "/site/ok", 200, "Write to hello@ok.example or sales@ok.example").await;
    mount_site(&server, "/site/err", 500, "contact: hidden@err.example").await;
    mount_site(&server, "/site/none", 200, "<p>Call us instead</p>").await;

    let report = aggregator(&server)
        .search_report("North Haverbrook", "monorails")
        .await
        .unwrap();

    let emails: Vec<&str> = report.results.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(emails, vec!["hello@ok.example", "", "", ""]);
    assert_eq!(report.stats.emails_found, 1);
    assert_eq!(report.results[3].website, "http://127.0.0.1:1/");
}

#[tokio::test]
async fn concurrent_email_fetches_keep_result_order() {
    let server = MockServer::start().await;
    let ids = ["p0", "p1", "p2", "p3"];
    mount_search(&server, None, &ids, None).await;
    for (i, id) in ids.iter().enumerate() {
        mount_detail(&server, id, Some(format!("{}/site/{id}", server.uri()))).await;
        // Earlier sites respond more slowly.
        Mock::given(method("GET"))
            .and(path(format!("/site/{id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("mail {id}@example.com"))
                    .set_delay(Duration::from_millis(((ids.len() - i) * 40) as u64)),
            )
            .mount(&server)
            .await;
    }

    let mut settings = test_settings(&server);
    settings.email_max_concurrent = 4;
    let aggregator = PlaceAggregator::new(&settings).unwrap();

    let results = aggregator.search("Brockway", "shops").await.unwrap();
    let emails: Vec<&str> = results.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "p0@example.com",
            "p1@example.com",
            "p2@example.com",
            "p3@example.com"
        ]
    );
}

#[tokio::test]
async fn details_are_fetched_in_groups_of_batch_size() {
    let server = MockServer::start().await;
    let ids = ["a", "b", "c", "d", "e"];
    mount_search(&server, None, &ids, None).await;
    for id in ids {
        mount_detail(&server, id, None).await;
    }

    let mut settings = test_settings(&server);
    settings.batch_size = 2;
    settings.inter_batch_delay = Duration::from_millis(100);
    let aggregator = PlaceAggregator::new(&settings).unwrap();

    let started = std::time::Instant::now();
    let results = aggregator.search("Springfield", "anything").await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 5);
    // Three groups => two pauses.
    assert!(
        elapsed >= Duration::from_millis(200),
        "expected two inter-batch pauses, took {elapsed:?}"
    );
    assert_eq!(request_count(&server, "/places/").await, 5);
}
