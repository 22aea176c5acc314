//! End-to-end tests for decoding and paging through collections.
//!
//! A mock server plays the search endpoint; `Tweets` is driven through
//! `HttpClient` exactly as an application would use it.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tweetkit::{ApiHost, BearerToken, HttpClient, ResponseError, Tweets, TweetkitConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/2/tweets/search/recent";

fn create_client(server: &MockServer) -> Arc<HttpClient> {
    let config = TweetkitConfig::builder()
        .bearer_token(BearerToken::new("test-bearer-token").unwrap())
        .api_host(ApiHost::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Arc::new(HttpClient::new(&config).unwrap())
}

fn search_query() -> HashMap<String, String> {
    let mut query = HashMap::new();
    query.insert("query".to_string(), "rustlang".to_string());
    query.insert("expansions".to_string(), "author_id".to_string());
    query
}

fn first_page() -> serde_json::Value {
    json!({
        "data": [
            {"id": "1460323737035677698", "text": "first", "author_id": "2244994945"},
            {"id": "1460323737035677699", "text": "second", "author_id": "6253282"}
        ],
        "includes": {
            "users": [
                {"id": "2244994945", "name": "Twitter Dev", "username": "TwitterDev"},
                {"id": "6253282", "name": "Twitter API", "username": "TwitterAPI"}
            ]
        },
        "meta": {
            "newest_id": "1460323737035677699",
            "oldest_id": "1460323737035677698",
            "result_count": 2,
            "next_token": "page-2"
        }
    })
}

fn second_page() -> serde_json::Value {
    json!({
        "data": [{"id": "1460323737035677700", "text": "third"}],
        "meta": {"result_count": 1, "previous_token": "page-1"}
    })
}

async fn mount_search_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("next_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(second_page()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("previous", "page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "rustlang"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page()))
        .mount(server)
        .await;
}

fn ids(tweets: &Tweets) -> Vec<&str> {
    tweets.iter().map(|post| post.identifier()).collect()
}

// ============================================================================
// Decoding
// ============================================================================

#[tokio::test]
async fn test_fetch_decodes_posts_includes_and_meta() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;

    let tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    assert_eq!(ids(&tweets), vec!["1460323737035677698", "1460323737035677699"]);
    assert_eq!(tweets.meta().result_count(), Some(2));
    assert_eq!(tweets.meta().next_token(), Some("page-2"));
    assert!(tweets.has_next_page());
    assert!(!tweets.has_previous_page());

    let post = tweets.first().unwrap();
    let author_id = post.attribute("author_id").and_then(|v| v.as_str()).unwrap();
    let author = tweets.resources().users().lookup(author_id).unwrap();
    assert_eq!(author.attribute("username").unwrap(), "TwitterDev");

    assert!(tweets.resources().users().contains(6_253_282_u64));
    assert!(tweets.resources().media().is_empty());
}

#[tokio::test]
async fn test_fetch_stores_request_context() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;

    let tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    let context = tweets.request_context().unwrap();
    assert_eq!(context.previous_url(), "tweets/search/recent");
    assert_eq!(context.previous_query(), &search_query());
}

// ============================================================================
// Traversal
// ============================================================================

#[tokio::test]
async fn test_next_then_previous_round_trip() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;

    let mut tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    tweets.next_page().await.unwrap();
    assert_eq!(ids(&tweets), vec!["1460323737035677700"]);
    assert!(!tweets.has_next_page());
    assert!(tweets.resources().users().is_empty());

    tweets.previous_page().await.unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets.meta().next_token(), Some("page-2"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    let previous_request: HashMap<_, _> = requests[2].url.query_pairs().into_owned().collect();
    assert_eq!(previous_request.get("previous").map(String::as_str), Some("page-1"));
    assert!(!previous_request.contains_key("next_token"));
    assert_eq!(previous_request.get("query").map(String::as_str), Some("rustlang"));
}

#[tokio::test]
async fn test_walking_forward_until_exhausted() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;

    let mut tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    let mut seen = Vec::new();
    loop {
        seen.extend(tweets.iter().map(|post| post.identifier().to_string()));
        match tweets.next_page().await {
            Ok(_) => {}
            Err(ResponseError::NoNextPage) => break,
            Err(e) => panic!("Unexpected error: {e}"),
        }
    }

    assert_eq!(
        seen,
        vec![
            "1460323737035677698",
            "1460323737035677699",
            "1460323737035677700"
        ]
    );
}

#[tokio::test]
async fn test_failed_traversal_keeps_current_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("next_token", "page-2"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"title": "Too Many Requests", "status": 429})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page()))
        .mount(&server)
        .await;

    let mut tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    let err = tweets.next_page().await.unwrap_err();
    assert!(matches!(
        err,
        ResponseError::Http(tweetkit::HttpError::Response(ref e)) if e.code == 429
    ));

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets.meta().next_token(), Some("page-2"));
    assert!(tweets.resources().users().contains("2244994945"));
}

#[tokio::test]
async fn test_undecodable_next_page_keeps_current_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("next_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page()))
        .mount(&server)
        .await;

    let mut tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    let err = tweets.next_page().await.unwrap_err();
    assert!(matches!(err, ResponseError::Decode(_)));
    assert_eq!(tweets.len(), 2);
}

#[tokio::test]
async fn test_previous_page_on_first_page_sends_nothing() {
    let server = MockServer::start().await;
    mount_search_pages(&server).await;

    let mut tweets = Tweets::fetch(create_client(&server), "tweets/search/recent", search_query())
        .await
        .unwrap();

    let err = tweets.previous_page().await.unwrap_err();
    assert!(matches!(err, ResponseError::NoPreviousPage));
    assert!(err.is_end_of_pages());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_propagates_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
            "type": "about:blank",
            "status": 401,
            "detail": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let result =
        Tweets::fetch(create_client(&server), "tweets/search/recent", search_query()).await;

    match result {
        Err(ResponseError::Http(e)) => assert_eq!(e.status(), Some(401)),
        other => panic!("Expected Http error, got {other:?}"),
    }
}
