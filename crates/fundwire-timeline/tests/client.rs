//! Integration tests for `TimelineClient` using wiremock HTTP mocks.

use fundwire_timeline::TimelineClient;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TimelineClient {
    TimelineClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn timeline_body() -> serde_json::Value {
    serde_json::json!({
        "data": { "user_result": { "result": { "timeline_response": { "timeline": {
            "instructions": [
                { "__typename": "TimelineAddEntries", "entries": [
                    { "content": { "content": { "tweetResult": { "result": {
                        "rest_id": "1881000000000000001",
                        "legacy": {
                            "full_text": "name: Lendora\nRaised: $4M | Stage: Seed | Has token: No",
                            "entities": { "media": [
                                { "media_url_https": "https://pbs.example/banner.jpg" }
                            ] }
                        },
                        "core": { "user_result": { "result": { "legacy": {
                            "screen_name": "codeglitch"
                        } } } }
                    } } } } }
                ] }
            ]
        } } } } }
    })
}

#[tokio::test]
async fn fetch_user_posts_traverses_timeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user-tweets"))
        .and(query_param("username", "codeglitch"))
        .and(header("x-rapidapi-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client.fetch_user_posts("codeglitch", 30).await;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "1881000000000000001");
    assert!(posts[0].text.starts_with("name: Lendora"));
    assert_eq!(
        posts[0].url,
        "https://x.com/codeglitch/status/1881000000000000001"
    );
    assert_eq!(posts[0].media, vec!["https://pbs.example/banner.jpg"]);
}

#[tokio::test]
async fn non_2xx_collapses_to_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_user_posts("codeglitch", 30).await.is_empty());
}

#[tokio::test]
async fn malformed_payload_collapses_to_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_user_posts("codeglitch", 30).await.is_empty());
}

#[tokio::test]
async fn unexpected_schema_collapses_to_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"errors": ["nope"]})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_user_posts("codeglitch", 30).await.is_empty());
}
